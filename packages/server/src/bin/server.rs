//! Tsudoi chat server.
//!
//! Serves the JSON API and the WebSocket message stream.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-server
//! cargo run --bin tsudoi-server -- --host 0.0.0.0 --port 3000 --session-timeout-secs 1800
//! ```

use std::sync::Arc;

use clap::Parser;
use tsudoi_server::{
    config::{
        DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SESSION_TIMEOUT_SECS, DEFAULT_SWEEP_INTERVAL_SECS,
        ServerConfig,
    },
    ui::Server,
};
use tsudoi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsudoi-server")]
#[command(about = "Chat server with rooms and live message streams", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds of inactivity after which a session token expires
    #[arg(long, default_value_t = DEFAULT_SESSION_TIMEOUT_SECS)]
    session_timeout_secs: u64,

    /// Seconds between sweeps of expired sessions (0 disables sweeping)
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL_SECS)]
    sweep_interval_secs: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ServerConfig::new(
        args.host,
        args.port,
        args.session_timeout_secs,
        args.sweep_interval_secs,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Session timeout: {:?}, sweep interval: {:?}",
        config.session_timeout,
        config.sweep_interval
    );

    let facade = Arc::new(config.build_facade());
    let server = Server::new(facade, config.sweep_interval);
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
