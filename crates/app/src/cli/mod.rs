use clap::{Parser, Subcommand};

mod db;
mod schedule;

#[derive(Debug, Parser)]
#[command(name = "jobsender-app", about = "Job Sender CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Schedule(schedule::ScheduleCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Schedule(command) => schedule::run(command).await,
        }
    }
}
