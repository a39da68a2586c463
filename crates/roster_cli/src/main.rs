//! Roster server entry point.
//!
//! # Responsibility
//! - Parse configuration, initialize logging, open the database.
//! - Serve the HTTP router until Ctrl-C.

mod config;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{Cli, Command};
use log::info;
use roster_core::db::{open_db, open_db_in_memory};
use rusqlite::Connection;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    roster_core::init_logging(cli.log_level(), cli.log_dir.as_deref())
        .map_err(|err| anyhow!(err))?;

    let conn = open_connection(&cli)?;

    match cli.command() {
        Command::Migrate => {
            info!("event=migrate module=cli status=ok");
            Ok(())
        }
        Command::Serve => serve(&cli, conn).await,
    }
}

fn open_connection(cli: &Cli) -> Result<Connection> {
    match &cli.db {
        Some(path) => {
            open_db(path).with_context(|| format!("failed to open database `{}`", path.display()))
        }
        None => open_db_in_memory().context("failed to open in-memory database"),
    }
}

async fn serve(cli: &Cli, conn: Connection) -> Result<()> {
    let app = roster_http::router(roster_http::AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(
        "event=server_start module=cli status=ok addr={} version={}",
        cli.bind,
        roster_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("event=server_stop module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=signal module=cli status=error error={err}");
    }
}
