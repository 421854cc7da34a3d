//! Tsudoi interactive chat client.

pub mod api;
pub mod command;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
pub mod shell;
mod ui;

pub use api::ApiClient;
pub use runner::{ClientOptions, run_client};
