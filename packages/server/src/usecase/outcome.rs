//! Uniform result shape handed to the dispatch layer.

use super::error::ChatError;

/// `{ success, error?, payload? }` view of an operation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub success: bool,
    pub error: Option<ChatError>,
    pub payload: Option<T>,
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            success: self.success,
            error: self.error,
            payload: self.payload.map(f),
        }
    }
}

impl<T> From<Result<T, ChatError>> for Outcome<T> {
    fn from(result: Result<T, ChatError>) -> Self {
        match result {
            Ok(payload) => Self {
                success: true,
                error: None,
                payload: Some(payload),
            },
            Err(error) => Self {
                success: false,
                error: Some(error),
                payload: None,
            },
        }
    }
}
