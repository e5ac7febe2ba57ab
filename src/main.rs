//! blasenv CLI Entry Point
//!
//! # Usage
//!
//! ```bash
//! # Show known environments
//! blasenv list
//!
//! # Create every environment, recreating existing ones
//! blasenv spinup --force
//!
//! # Run tests inside the active environment
//! conda activate mkl_openmp
//! blasenv test mkl_openmp
//!
//! # Remove everything (asks first)
//! blasenv teardown
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use blasenv::cli::{Cli, Command};
use blasenv::commands::{AssumeYes, Confirm, Dispatcher, StdinPrompt};
use blasenv::config::Settings;
use blasenv::environment::{CondaManager, EnvTable};

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Resolves the environment table: CLI flag, then env var, then built-in.
fn load_table(cli: &Cli, settings: &Settings) -> blasenv::Result<EnvTable> {
    match cli.env_file.as_ref().or(settings.env_file.as_ref()) {
        Some(path) => EnvTable::load(path),
        None => Ok(EnvTable::builtin()),
    }
}

fn run(cli: Cli) -> blasenv::Result<()> {
    let settings = Settings::from_env();
    debug!("Settings: {:?}", settings);

    let table = load_table(&cli, &settings)?;
    let dispatcher = Dispatcher::new(CondaManager::new(&settings), table);

    match cli.command {
        Command::List => {
            // same shape as `conda env list`
            println!("{}", dispatcher.list());
        }
        Command::Spinup { env, force } => {
            let outcomes = dispatcher.spinup(env.as_deref(), force)?;
            info!("Processed {} environment(s)", outcomes.len());
        }
        Command::Teardown { env, yes } => {
            let mut confirm: Box<dyn Confirm> = if yes {
                Box::new(AssumeYes)
            } else {
                Box::new(StdinPrompt::terminal())
            };
            dispatcher.teardown(env.as_deref(), confirm.as_mut())?;
        }
        Command::Test { env } => {
            dispatcher.test(Some(&env))?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
