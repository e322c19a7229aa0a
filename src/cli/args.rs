use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{default_database_path, RepoKind, DEFAULT_BIND};
use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Path to the SQLite database (defaults to ~/.commander/commander.db)
    #[arg(short, long, env = "COMMANDER_DATABASE")]
    pub database: Option<PathBuf>,
}

impl DatabaseArgs {
    pub fn path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the commands REST API
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "COMMANDER_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Repository backing the API
        #[arg(short, long, value_enum, default_value_t = RepoKind::Sqlite)]
        repo: RepoKind,

        #[command(flatten)]
        db: DatabaseArgs,

        /// Log output format
        #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
        log_format: LogFormat,
    },
    /// Insert the sample commands into the database
    Seed {
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// List every stored command
    Ls {
        #[command(flatten)]
        db: DatabaseArgs,
    },
}
