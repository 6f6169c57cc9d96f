//! Command-line interface for strictly_gomoku.

use clap::{Parser, Subcommand};
use strictly_gomoku::Difficulty;

/// Strictly Gomoku - five-in-a-row session server and client
#[derive(Parser, Debug)]
#[command(name = "strictly_gomoku")]
#[command(about = "Five-in-a-row game session server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game server URL used by the client subcommands
    #[arg(
        long,
        global = true,
        env = "GOMOKU_SERVER_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    pub server_url: String,

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
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long, env = "GOMOKU_HOST")]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long, env = "GOMOKU_PORT")]
        port: Option<u16>,

        /// Evict sessions idle for this many seconds (overrides config)
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Create a game and print the code to share
    Create {
        /// Board size (9, 13, 15 or 19)
        #[arg(long)]
        size: Option<u64>,

        /// Host color (black or white)
        #[arg(long)]
        color: Option<String>,
    },

    /// Join a waiting game as the guest
    Join {
        /// Game code
        code: String,
    },

    /// Print the board and status of a game
    Show {
        /// Game code
        code: String,
    },

    /// Suggest a move for the side to move
    Hint {
        /// Game code
        code: String,

        /// easy, medium or hard
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
    },

    /// Place a stone
    Move {
        /// Game code
        code: String,

        /// Player id received on create or join
        #[arg(long)]
        player: String,

        /// Row, counted from zero at the top
        #[arg(long, allow_negative_numbers = true)]
        row: i64,

        /// Column, counted from zero at the left
        #[arg(long, allow_negative_numbers = true)]
        col: i64,
    },
}
