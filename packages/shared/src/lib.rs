//! Shared building blocks for the Tsudoi chat server and client.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and timestamp formatting
//! - `protocol`: wire DTOs and error codes spoken between server and client

pub mod logger;
pub mod protocol;
pub mod time;
