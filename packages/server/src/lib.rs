//! Tsudoi chat server.
//!
//! Layers, from the inside out:
//! - `domain`: value objects, entities and the traits the other layers implement
//! - `infrastructure`: in-memory repositories, the message broadcaster, token generation
//! - `usecase`: one use case per operation and the `ChatFacade` composing them
//! - `ui`: axum HTTP/WebSocket dispatch

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
