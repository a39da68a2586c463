//! Command-line and environment configuration.
//!
//! Precedence: flag > `ROSTER_*` environment variable > default.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Roster - employee directory REST service
#[derive(Debug, Parser)]
#[command(name = "roster", version)]
pub struct Cli {
    /// Address the HTTP server listens on
    #[arg(long, env = "ROSTER_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// SQLite database file; an in-memory database is used when omitted
    #[arg(long, env = "ROSTER_DB")]
    pub db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); defaults per build mode
    #[arg(long, env = "ROSTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotated log files; stderr when omitted
    #[arg(long, env = "ROSTER_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Apply schema migrations to `--db` and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| roster_core::default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn defaults_serve_on_localhost_in_memory() {
        let cli = Cli::try_parse_from(["roster"]).unwrap();

        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.bind.to_string(), "127.0.0.1:8080");
        assert!(cli.db.is_none());
        assert!(cli.log_dir.is_none());
        assert_eq!(cli.log_level(), roster_core::default_log_level());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "roster",
            "--bind",
            "0.0.0.0:9000",
            "--db",
            "/tmp/roster.db",
            "--log-level",
            "warn",
            "migrate",
        ])
        .unwrap();

        assert_eq!(cli.command(), Command::Migrate);
        assert_eq!(cli.bind.port(), 9000);
        assert_eq!(cli.db.unwrap().to_str(), Some("/tmp/roster.db"));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        assert!(Cli::try_parse_from(["roster", "--bind", "not-an-address"]).is_err());
    }
}
