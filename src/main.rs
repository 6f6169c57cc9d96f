//! Strictly Gomoku - Unified CLI
//!
//! Runs the session server, or drives a remote one from the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_gomoku::{
    CreateGameRequest, GameServer, MoveRequest, RestGameClient, ServerConfig, SessionStatus,
    Snapshot, suggest_move,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_gomoku=debug")),
        )
        .init();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            ttl,
        } => run_server(config, host, port, ttl).await,
        Command::Create { size, color } => {
            let client = RestGameClient::new(&cli.server_url);
            let created = client
                .create_game(&CreateGameRequest { size, color })
                .await
                .context("Failed to create game")?;
            println!("Game code: {}", created.game_code);
            println!("Player id: {}", created.player_id);
            println!("Color:     {}", created.color);
            Ok(())
        }
        Command::Join { code } => {
            let code = code.to_uppercase();
            let client = RestGameClient::new(&cli.server_url);
            let seat = client
                .join_game(&code)
                .await
                .with_context(|| format!("Failed to join game {}", code))?;
            println!("Player id: {}", seat.player_id);
            println!("Color:     {}", seat.color);
            Ok(())
        }
        Command::Show { code } => {
            let code = code.to_uppercase();
            let client = RestGameClient::new(&cli.server_url);
            let snapshot = client
                .get_game(&code)
                .await
                .with_context(|| format!("Failed to fetch game {}", code))?;
            print_snapshot(&snapshot);
            Ok(())
        }
        Command::Hint { code, difficulty } => {
            let code = code.to_uppercase();
            let client = RestGameClient::new(&cli.server_url);
            let snapshot = client
                .get_game(&code)
                .await
                .with_context(|| format!("Failed to fetch game {}", code))?;
            if snapshot.status != SessionStatus::Playing {
                anyhow::bail!("Game {} is {}, no move to suggest", code, snapshot.status);
            }
            let pos = suggest_move(&snapshot.board, snapshot.turn, difficulty, &mut rand::rng())
                .context("Board is full")?;
            print_snapshot(&snapshot);
            println!(
                "Suggested move for {}: --row {} --col {}",
                snapshot.turn, pos.row, pos.col
            );
            Ok(())
        }
        Command::Move {
            code,
            player,
            row,
            col,
        } => {
            let code = code.to_uppercase();
            let client = RestGameClient::new(&cli.server_url);
            let snapshot = client
                .make_move(&code, &MoveRequest::new(player, row, col))
                .await
                .with_context(|| format!("Move at ({}, {}) failed", row, col))?;
            print_snapshot(&snapshot);
            Ok(())
        }
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    ttl: Option<u64>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(ttl) = ttl {
        config = config.with_session_ttl_secs(ttl);
    }

    info!(addr = %config.socket_addr(), ttl_secs = ?config.session_ttl_secs(), "Starting Strictly Gomoku server");
    GameServer::new(config).run().await
}

fn print_snapshot(snapshot: &Snapshot) {
    print!("{}", snapshot.board.display());
    match snapshot.winner {
        Some(winner) => println!("Status: {} ({} wins)", snapshot.status, winner),
        None => println!("Status: {} ({} to move)", snapshot.status, snapshot.turn),
    }
}
