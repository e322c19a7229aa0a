use anyhow::Result;

use super::args::Commands;
use crate::config::{open_sql_repo, ServerConfig};
use crate::db::{mock::sample_commands, Command, CommanderRepo};
use crate::logging::{self, LogFormat};
use crate::server;

pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Serve {
            bind,
            repo,
            db,
            log_format,
        } => {
            logging::init(log_format);
            let config = ServerConfig {
                bind,
                repo,
                database: db.path(),
                log_format,
            };
            server::serve(&config).await?;
        }
        Commands::Seed { db } => {
            logging::init(LogFormat::Pretty);
            let mut repo = open_sql_repo(&db.path())?;
            let created = seed(&mut repo)?;
            for cmd in &created {
                println!("Seeded command with ID: {}", cmd.id.unwrap_or_default());
            }
        }
        Commands::Ls { db } => {
            let repo = open_sql_repo(&db.path())?;
            print_commands(&repo.list_all()?);
        }
    }
    Ok(())
}

/// Insert the sample commands in one save and return them with their ids.
pub fn seed(repo: &mut dyn CommanderRepo) -> Result<Vec<Command>> {
    for cmd in sample_commands() {
        repo.create(cmd)?;
    }
    Ok(repo.save()?.created)
}

fn print_commands(commands: &[Command]) {
    if commands.is_empty() {
        println!("No commands stored.");
        return;
    }

    println!("\n{} stored commands:", commands.len());
    println!("─────────────────────────────────────────────");

    for cmd in commands {
        println!("({}) {}", cmd.id.unwrap_or_default(), cmd.how_to);
        println!("    Line: {}", cmd.line);
        println!("    Platform: {}", cmd.platform);
        println!("─────────────────────────────────────────────");
    }
}
