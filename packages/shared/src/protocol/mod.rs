//! Wire protocol spoken between the Tsudoi server and its clients.
//!
//! DTOs are organized by transport:
//! - `http`: request/response bodies of the JSON API
//! - `stream`: frames pushed over the WebSocket message stream
//! - `error`: error kinds and the numeric per-operation codes

pub mod error;
pub mod http;
pub mod stream;

pub use error::{ErrorDto, ErrorKind, Operation};
pub use http::ApiResponse;
pub use stream::{MessageEvent, StreamFrame};
