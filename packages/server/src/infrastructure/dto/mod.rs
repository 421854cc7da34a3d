//! Data Transfer Objects (DTOs) for the chat application.
//!
//! The DTO types themselves live in `tsudoi_shared::protocol` so the client can
//! share them; this module holds the conversions from domain entities.

pub mod conversion;
