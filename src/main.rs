//! Tic-tac-toe server - unified CLI
//!
//! Runs the HTTP game server or acts as a client against one.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, ClientCommand, Command};
use std::path::PathBuf;
use tictactoe_server::{GameClient, ServerConfig, SessionManager, render};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Client(command) => run_client(command).await,
    }
}

/// Run the HTTP game server
async fn run_server(config: PathBuf, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = ServerConfig::load(Some(config.as_path()))?.with_overrides(host, port);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    info!(?config, "Starting tic-tac-toe server");
    tictactoe_server::serve(&config, SessionManager::new()).await
}

/// Run one client command and print the resulting state
async fn run_client(command: ClientCommand) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match command {
        ClientCommand::New { server_url } => {
            let created = GameClient::new(server_url).new_game().await?;
            println!("Game ID: {}\n", created.game_id);
            println!("{}", render(&created.state));
        }
        ClientCommand::State {
            game_id,
            server_url,
        } => {
            let state = GameClient::new(server_url).state(&game_id).await?;
            println!("{}", render(&state));
        }
        ClientCommand::Move {
            game_id,
            row,
            col,
            server_url,
        } => {
            let state = GameClient::new(server_url)
                .make_move(&game_id, row, col)
                .await?;
            println!("{}", render(&state));
        }
        ClientCommand::Reset {
            game_id,
            server_url,
        } => {
            let state = GameClient::new(server_url).reset(&game_id).await?;
            println!("{}", render(&state));
        }
        ClientCommand::Delete {
            game_id,
            server_url,
        } => {
            GameClient::new(server_url).delete(&game_id).await?;
            println!("Deleted game {}", game_id);
        }
    }

    Ok(())
}
