//! Client execution logic: sign-in, message stream with reconnection, command loop.

use std::time::Duration;

use reqwest::Url;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{api::ApiClient, command::Command, error::ClientError};

use super::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    formatter::MessageFormatter,
    session::run_stream_session,
    shell::{Reply, Shell, is_already_registered},
    ui::redisplay_prompt,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Command-line options of the client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Try to register before logging in
    pub register: bool,
}

/// Run the chat client until the user quits
pub async fn run_client(options: ClientOptions) -> Result<(), ClientError> {
    let mut api = ApiClient::new(&options.url)?;

    if options.register {
        match api.register(&options.username, &options.password).await {
            Ok(()) => tracing::info!("Registered as '{}'", options.username),
            Err(e) if is_already_registered(&e) => {
                tracing::info!("'{}' is already registered", options.username)
            }
            Err(e) => return Err(e),
        }
    }
    api.login(&options.username, &options.password).await?;
    tracing::info!("Logged in as '{}'", options.username);

    let stream_url = api.stream_url()?;
    let username = options.username.clone();
    let mut stream_task =
        tokio::spawn(async move { run_stream_with_reconnect(stream_url, username).await });

    println!(
        "\nYou are '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
        options.username
    );

    let mut input_rx = spawn_readline(options.username.clone());
    let mut shell = Shell::new(api, options.username.clone());

    let result = loop {
        tokio::select! {
            line = input_rx.recv() => {
                let Some(line) = line else { break Ok(()) };
                match execute_line(&mut shell, &line).await {
                    Some(Reply::Quit) => break Ok(()),
                    Some(Reply::Output(output)) => print!("{}", output),
                    None => {}
                }
                redisplay_prompt(&options.username);
            }
            stream_result = &mut stream_task => {
                break match stream_result {
                    Ok(result) => result,
                    Err(e) => Err(ClientError::ConnectionError(e.to_string())),
                };
            }
        }
    };

    stream_task.abort();
    if let Err(e) = shell.api_mut().logout().await {
        tracing::warn!("Logout failed: {}", e);
    }
    result
}

/// Parse and execute one line; failures are printed and never end the session
async fn execute_line(shell: &mut Shell, line: &str) -> Option<Reply> {
    let result = match Command::parse(line) {
        Ok(command) => shell.execute(command).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(reply) => Some(reply),
        Err(ClientError::Api(error)) => {
            print!("{}", MessageFormatter::format_error(&error));
            None
        }
        Err(e) => {
            println!("\n! {}", e);
            None
        }
    }
}

/// Keep the message stream open, reconnecting after connection loss
async fn run_stream_with_reconnect(url: Url, username: String) -> Result<(), ClientError> {
    let mut reconnect_count = 0;

    loop {
        tracing::debug!(
            "Opening message stream (attempt {}/{})",
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let Err(e) = run_stream_session(&url, &username).await else {
            return Ok(());
        };

        if should_exit_immediately(&e) {
            tracing::error!("Message stream rejected: {}", e);
            return Err(e);
        }

        tracing::warn!("Message stream lost: {}", e);
        reconnect_count += 1;

        if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(e);
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            RECONNECT_INTERVAL_SECS,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}

/// Spawn a blocking thread for rustyline (synchronous readline)
fn spawn_readline(username: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", username);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
