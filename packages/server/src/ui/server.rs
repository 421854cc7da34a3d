//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::ChatFacade;

use super::{
    handler::{
        create_room, health_check, join_room, leave_room, list_room_members, list_rooms,
        list_user_rooms, login, logout, register, send_message, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
    sweeper::spawn_session_sweeper,
};

/// Chat server over HTTP and WebSocket
///
/// # Example
///
/// ```ignore
/// let facade = Arc::new(config.build_facade());
/// let server = Server::new(facade, config.sweep_interval);
/// server.run(&config.host, config.port).await?;
/// ```
pub struct Server {
    /// Session Facade（全操作の入口）
    facade: Arc<ChatFacade>,
    /// 期限切れセッションの掃除間隔。`None` なら掃除しない
    sweep_interval: Option<Duration>,
}

impl Server {
    pub fn new(facade: Arc<ChatFacade>, sweep_interval: Option<Duration>) -> Self {
        Self {
            facade,
            sweep_interval,
        }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            facade: self.facade.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/register", post(register))
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            .route("/api/rooms", post(create_room).get(list_rooms))
            .route("/api/me/rooms", get(list_user_rooms))
            .route("/api/rooms/{name}/join", post(join_room))
            .route("/api/rooms/{name}/leave", post(leave_room))
            .route("/api/rooms/{name}/members", get(list_room_members))
            .route("/api/rooms/{name}/messages", post(send_message))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        let sweeper = self
            .sweep_interval
            .map(|interval| spawn_session_sweeper(self.facade.clone(), interval));

        tracing::info!("Chat server listening on {}", listener.local_addr()?);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        if let Some(sweeper) = sweeper {
            sweeper.abort();
        }
        result
    }

    /// Run the chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws?token=<token>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
