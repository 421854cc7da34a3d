//! Infrastructure layer: concrete implementations of the domain seams.

pub mod dto;
pub mod message_broadcaster;
pub mod repository;
pub mod token;
