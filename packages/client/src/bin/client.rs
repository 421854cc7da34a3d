//! Interactive chat client.
//!
//! Registers (unless `--no-register`), logs in, opens the message stream and
//! reads commands from stdin. Incoming messages are printed as they arrive.
//! The message stream reconnects on connection loss (max 5 attempts with 5
//! second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-client -- --username alice
//! cargo run --bin tsudoi-client -- -n bob --password hunter2 --url http://127.0.0.1:3000
//! ```

use clap::Parser;
use tsudoi_client::{ClientOptions, run_client};
use tsudoi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsudoi-client")]
#[command(about = "Interactive chat client with rooms and live messages", long_about = None)]
struct Args {
    /// Username to register and log in as
    #[arg(short = 'n', long)]
    username: String,

    /// Password (defaults to the username)
    #[arg(short = 'P', long)]
    password: Option<String>,

    /// Chat server URL
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Log in with an existing account without trying to register
    #[arg(long)]
    no_register: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let options = ClientOptions {
        password: args.password.unwrap_or_else(|| args.username.clone()),
        username: args.username,
        url: args.url,
        register: !args.no_register,
    };

    // Run the client
    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
