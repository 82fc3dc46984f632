//! `db` subcommands.

use clap::{Args, Subcommand};
use jobsender_app::database;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or_else(|| "--database-url or DATABASE_URL is required".to_string())?;

    match command.command {
        DbSubcommand::Migrate => migrate(&database_url).await,
    }
}

async fn migrate(database_url: &str) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}
