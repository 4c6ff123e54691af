//! Operator tool for checking the task/user reference boundary.
//!
//! Usage:
//!
//! ```text
//! taskgate [--config <path>] [--log-level <filter>] probe-user <ID>
//! taskgate [--config <path>] [--log-level <filter>] user-has-tasks <ID>
//! ```
//!
//! `probe-user` asks the configured user service whether a user exists and
//! prints `yes`, `no`, or `unavailable`. `user-has-tasks` reports whether the
//! task store still holds tasks owned by the user. Both exit non-zero when
//! the answer could not be obtained.

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use taskgate::config::{ConfigArgs, ServiceConfig};
use taskgate::task::{
    adapters::{
        postgres::{PostgresTaskRepository, connect_pool},
        remote::HttpUserExistenceOracle,
    },
    domain::UserId,
    ports::UserExistenceOracle,
    services::TaskConsistencyService,
};
use taskgate::telemetry;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about = "Task/user referential integrity tools")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the user service whether a user exists.
    ProbeUser {
        /// User identifier.
        id: i64,
    },
    /// Report whether any stored task references a user.
    UserHasTasks {
        /// User identifier.
        id: i64,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] taskgate::config::ConfigError),
    #[error(transparent)]
    Telemetry(#[from] telemetry::TelemetryError),
    #[error(transparent)]
    InvalidId(#[from] taskgate::user::domain::UserDomainError),
    #[error(transparent)]
    Lookup(#[from] taskgate::task::ports::UserLookupError),
    #[error(transparent)]
    Store(#[from] taskgate::task::ports::TaskRepositoryError),
    #[error(transparent)]
    Service(#[from] taskgate::task::services::TaskServiceError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    match run(cli, &mut stdout).await {
        Ok(code) => code,
        Err(err) => {
            let mut stderr = io::stderr().lock();
            if writeln!(stderr, "taskgate: {err}").is_err() {
                return ExitCode::from(2);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, out: &mut impl Write) -> Result<ExitCode, CliError> {
    let config = ServiceConfig::load(&cli.config)?;
    telemetry::init(&config.logging.level, config.logging.format)?;

    match cli.command {
        Command::ProbeUser { id } => {
            let user_id = UserId::new(id)?;
            let oracle = HttpUserExistenceOracle::from_settings(&config.user_service)?;
            match oracle.exists(user_id).await {
                Ok(true) => writeln!(out, "yes")?,
                Ok(false) => writeln!(out, "no")?,
                Err(err) => {
                    writeln!(out, "unavailable: {err}")?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::UserHasTasks { id } => {
            let user_id = UserId::new(id)?;
            let pool = connect_pool(&config.database.url, config.database.max_connections)?;
            let service = TaskConsistencyService::new(
                Arc::new(PostgresTaskRepository::new(pool)),
                Arc::new(HttpUserExistenceOracle::from_settings(&config.user_service)?),
                Arc::new(DefaultClock),
            );
            let answer = if service.has_tasks_for_user(user_id).await? {
                "yes"
            } else {
                "no"
            };
            writeln!(out, "{answer}")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
