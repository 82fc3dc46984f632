//! `schedule` subcommands.

use clap::{Args, Subcommand};
use jiff::Timestamp;
use jobsender_app::{
    database::{self, Db},
    domain::{
        groups::{GroupsService, PgGroupsService, records::GroupUuid},
        schedules::{ScheduleError, evaluate},
    },
};

#[derive(Debug, Args)]
struct CheckArgs {
    /// Group UUID
    #[arg(long)]
    group: GroupUuid,

    /// Instant to evaluate, e.g. 2024-05-27T09:00:00Z; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

async fn check(args: CheckArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let group = PgGroupsService::new(Db::new(pool))
        .get_group(args.group)
        .await
        .map_err(|error| format!("failed to load group: {error}"))?;

    let at = args.at.unwrap_or_else(Timestamp::now);

    println!("group: {} ({})", group.name, group.uuid);
    println!("cron: {} {}", group.schedule.cron_expression(), group.schedule.timezone);

    match evaluate(&group.schedule, at) {
        Ok(period) => {
            println!("due at {at}: period {period}");
            println!("request_id: {}", period.request_id());
        }
        Err(ScheduleError::NotDue(reason)) => println!("not due at {at}: {reason}"),
        Err(error) => return Err(format!("failed to evaluate schedule: {error}")),
    }

    Ok(())
}

#[derive(Debug, Args)]
pub(crate) struct ScheduleCommand {
    #[command(subcommand)]
    command: ScheduleSubcommand,
}

#[derive(Debug, Subcommand)]
enum ScheduleSubcommand {
    /// Evaluate a group's schedule at an instant
    Check(CheckArgs),
}

pub(crate) async fn run(command: ScheduleCommand) -> Result<(), String> {
    match command.command {
        ScheduleSubcommand::Check(args) => check(args).await,
    }
}
