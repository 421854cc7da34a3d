//! Shared application state.

use std::sync::Arc;

use crate::usecase::ChatFacade;

/// Shared application state
pub struct AppState {
    /// Session Facade（全操作の入口）
    pub facade: Arc<ChatFacade>,
}
