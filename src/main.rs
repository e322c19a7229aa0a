use anyhow::Result;
use clap::Parser;

use commander::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::handle_command(cli.command).await
}
