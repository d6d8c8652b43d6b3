//! Command-line interface for tictactoe_server.

use clap::{Parser, Subcommand};

/// Tic-tac-toe session server and client
#[derive(Parser, Debug)]
#[command(name = "tictactoe_server")]
#[command(about = "Tic-tac-toe session server with a REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: std::path::PathBuf,

        /// Host to bind to (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Talk to a running server
    #[command(flatten)]
    Client(ClientCommand),
}

/// Client subcommands. Each prints the state returned by the server.
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Create a new game
    New {
        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server_url: String,
    },

    /// Show the state of a game
    State {
        /// Game ID
        game_id: String,

        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server_url: String,
    },

    /// Place the current player's mark
    Move {
        /// Game ID
        game_id: String,

        /// Row (0-2)
        #[arg(allow_negative_numbers = true)]
        row: i64,

        /// Column (0-2)
        #[arg(allow_negative_numbers = true)]
        col: i64,

        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server_url: String,
    },

    /// Reset a game to an empty board
    Reset {
        /// Game ID
        game_id: String,

        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server_url: String,
    },

    /// Delete a game
    Delete {
        /// Game ID
        game_id: String,

        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server_url: String,
    },
}
