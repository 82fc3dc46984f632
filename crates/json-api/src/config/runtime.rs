//! Runtime Config

use clap::Args;

/// Where the server listens and which database it serves from.
#[derive(Debug, Args)]
pub struct RuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port; Cloud Run injects `PORT`
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}
