//! Server configuration and composition root.

use std::{sync::Arc, time::Duration};

use tsudoi_shared::time::{Clock, SystemClock};

use crate::{
    infrastructure::{
        message_broadcaster::InMemoryMessageBroadcaster,
        repository::{InMemoryRoomRepository, InMemorySessionRepository, InMemoryUserRepository},
        token::RandomTokenGenerator,
    },
    usecase::ChatFacade,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("session timeout must be at least one second")]
    ZeroSessionTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Inactivity window after which a token expires
    pub session_timeout: Duration,
    /// `None` disables the background sweep
    pub sweep_interval: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS),
            sweep_interval: Some(Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS)),
        }
    }
}

impl ServerConfig {
    /// Build a config from command-line values. A sweep interval of 0 disables sweeping.
    pub fn new(
        host: String,
        port: u16,
        session_timeout_secs: u64,
        sweep_interval_secs: u64,
    ) -> Result<Self, ConfigError> {
        if session_timeout_secs == 0 {
            return Err(ConfigError::ZeroSessionTimeout);
        }
        Ok(Self {
            host,
            port,
            session_timeout: Duration::from_secs(session_timeout_secs),
            sweep_interval: (sweep_interval_secs > 0)
                .then(|| Duration::from_secs(sweep_interval_secs)),
        })
    }

    /// Wire the in-memory components into a facade using the system clock
    pub fn build_facade(&self) -> ChatFacade {
        self.build_facade_with_clock(Arc::new(SystemClock))
    }

    /// Wire the in-memory components into a facade
    ///
    /// Dependencies are created in order:
    /// 1. Repositories (users, sessions, rooms)
    /// 2. Broadcaster (reads room membership)
    /// 3. Facade
    pub fn build_facade_with_clock(&self, clock: Arc<dyn Clock>) -> ChatFacade {
        let users = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new(
            Arc::new(RandomTokenGenerator),
            clock.clone(),
            self.session_timeout,
        ));
        let rooms = Arc::new(InMemoryRoomRepository::new());

        let broadcaster = Arc::new(InMemoryMessageBroadcaster::new(rooms.clone(), clock.clone()));

        ChatFacade::new(users, sessions, rooms, broadcaster, clock)
    }
}
