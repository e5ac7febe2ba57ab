//! Command-Line Arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage conda environments for BLAS backend variants.
#[derive(Debug, Parser)]
#[command(name = crate::APP_NAME, version = crate::VERSION, about)]
pub struct Cli {
    /// YAML file replacing the built-in environment table [env: BLAS_ENV_FILE]
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the known environment names
    List,

    /// Create one environment, or all of them
    Spinup {
        /// The environment to spin up
        env: Option<String>,

        /// Recreate the environment if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Remove one environment, or all of them after confirmation
    Teardown {
        /// The environment to tear down
        env: Option<String>,

        /// Do not ask before removing all environments
        #[arg(short, long)]
        yes: bool,
    },

    /// Run the test script inside the active environment
    Test {
        /// The environment to test (must be active)
        env: String,
    },
}
