mod bootstrap;
mod cli;
mod loop_runner;
mod metrics;
mod script;

use std::env;
use std::io;
use std::process::ExitCode;

use fpc_core::{ConfigError, LevelLoadError};
use thiserror::Error;
use tracing::{error, info};

use cli::CliCommand;
use script::ScriptError;

#[derive(Debug, Error)]
pub(crate) enum SandboxError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelLoadError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to encode final state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write final state: {0}")]
    Write(#[source] io::Error),
}

pub(crate) fn run_from_env() -> ExitCode {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let options = match cli::parse_args(&args, |var| env::var(var).ok()) {
        Ok(CliCommand::Run(options)) => options,
        Ok(CliCommand::Help) => {
            println!("{}", cli::usage_text());
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(1);
        }
    };

    bootstrap::init_tracing();
    info!("=== FPC Sandbox Startup ===");

    let app = match bootstrap::build_app(&options) {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "startup_failed");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = loop_runner::run(app, &mut io::stdout()) {
        error!(error = %err, "simulation_failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
