use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::ValueEnum;

use crate::db::{CommanderRepo, MockCommanderRepo, SqlCommanderRepo};
use crate::logging::LogFormat;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Which [`CommanderRepo`] implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepoKind {
    /// SQLite database on disk (or `:memory:`)
    Sqlite,
    /// Fixed read-only sample data
    Mock,
}

/// Everything the server needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub repo: RepoKind,
    pub database: PathBuf,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn open_repo(&self) -> Result<Box<dyn CommanderRepo>> {
        match self.repo {
            RepoKind::Mock => Ok(Box::new(MockCommanderRepo::new())),
            RepoKind::Sqlite => Ok(Box::new(open_sql_repo(&self.database)?)),
        }
    }
}

/// `~/.commander/commander.db`, or `commander.db` in the working directory when there is no home.
pub fn default_database_path() -> PathBuf {
    dirs::home_dir()
        .map(|mut path| {
            path.push(".commander");
            path.push("commander.db");
            path
        })
        .unwrap_or_else(|| PathBuf::from("commander.db"))
}

pub fn open_sql_repo(path: &Path) -> Result<SqlCommanderRepo> {
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("database path is not valid UTF-8: {}", path.display()))?;

    if path_str != ":memory:" {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(SqlCommanderRepo::new(path_str)?)
}
