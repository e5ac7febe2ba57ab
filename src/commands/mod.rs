//! Command Handlers
//!
//! The four user-facing operations (`list`, `spinup`, `teardown`, `test`)
//! implemented against an injected [`EnvManager`] and [`EnvTable`].
//!
//! # Architecture
//!
//! - [`Dispatcher`]: runs one operation and prints status lines
//! - [`prompt`]: confirmation strategies for bulk teardown

pub mod prompt;

use colored::Colorize;
use log::{debug, info};

use crate::environment::{exists, is_active, EnvManager, EnvTable};
use crate::error::{EnvError, Result};

pub use prompt::{AssumeYes, Confirm, StdinPrompt};

const TEARDOWN_ALL_QUESTION: &str = "Are you sure you want to delete all environments?";

/// Result of spinning up a single environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinupOutcome {
    Created,
    /// Already present and `--force` not given
    Skipped,
}

/// Result of tearing down a single environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownOutcome {
    Removed,
    /// Nothing to remove
    Missing,
}

/// Executes commands against an environment manager.
pub struct Dispatcher<M: EnvManager> {
    manager: M,
    table: EnvTable,
}

impl<M: EnvManager> Dispatcher<M> {
    pub fn new(manager: M, table: EnvTable) -> Self {
        Self { manager, table }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// Space-separated environment names, in table order.
    pub fn list(&self) -> String {
        self.table.names().collect::<Vec<_>>().join(" ")
    }

    /// Creates one environment, or all of them when `env_name` is `None`.
    pub fn spinup(
        &self,
        env_name: Option<&str>,
        force: bool,
    ) -> Result<Vec<(String, SpinupOutcome)>> {
        println!("Setting up {}!", target_label(env_name));

        let targets = self.targets(env_name);
        let mut outcomes = Vec::with_capacity(targets.len());

        for name in targets {
            let outcome = self.spinup_one(&name, force)?;
            outcomes.push((name, outcome));
        }

        Ok(outcomes)
    }

    fn spinup_one(&self, env_name: &str, force: bool) -> Result<SpinupOutcome> {
        let packages = self.table.packages_for(env_name)?;
        let present = exists(&self.manager, env_name)?;

        if present && !force {
            println!(
                "{}",
                format!(
                    "Environment {} exists already, and --force not specified, skipping...",
                    env_name
                )
                .yellow()
            );
            return Ok(SpinupOutcome::Skipped);
        }

        if present {
            info!("Recreating environment '{}'", env_name);
            self.teardown_one(env_name)?;
        }

        if !self.manager.create_environment(env_name, &packages)? {
            return Err(EnvError::Creation(env_name.to_string()));
        }

        self.manager.run_install()?;
        println!("{}", format!("Environment {} is ready", env_name).green());

        Ok(SpinupOutcome::Created)
    }

    /// Removes one environment, or all known ones after confirmation.
    ///
    /// A named environment is not checked against the table; only its
    /// existence in the manager matters.
    pub fn teardown(
        &self,
        env_name: Option<&str>,
        confirm: &mut dyn Confirm,
    ) -> Result<Vec<(String, TeardownOutcome)>> {
        println!("Removing {}!", target_label(env_name));

        if env_name.is_none() && !confirm.confirm(TEARDOWN_ALL_QUESTION)? {
            info!("Teardown cancelled");
            return Ok(Vec::new());
        }

        let targets = self.targets(env_name);
        let mut outcomes = Vec::with_capacity(targets.len());

        for name in targets {
            let outcome = self.teardown_one(&name)?;
            outcomes.push((name, outcome));
        }

        Ok(outcomes)
    }

    fn teardown_one(&self, env_name: &str) -> Result<TeardownOutcome> {
        if !exists(&self.manager, env_name)? {
            println!(
                "{}",
                format!("Environment {} does not exist, skipping...", env_name).yellow()
            );
            return Ok(TeardownOutcome::Missing);
        }

        self.manager.remove_environment(env_name)?;
        debug!("Removed environment '{}'", env_name);
        Ok(TeardownOutcome::Removed)
    }

    /// Runs the test script; `env_name` must be the active environment.
    pub fn test(&self, env_name: Option<&str>) -> Result<()> {
        let env_name = env_name.ok_or(EnvError::MissingEnvironment)?;

        if !is_active(&self.manager, env_name)? {
            return Err(EnvError::NotActive(env_name.to_string()));
        }

        println!("Running tests in {}", env_name);
        self.manager.run_tests()
    }

    fn targets(&self, env_name: Option<&str>) -> Vec<String> {
        match env_name {
            Some(name) => vec![name.to_string()],
            None => self.table.names().map(str::to_string).collect(),
        }
    }
}

fn target_label(env_name: Option<&str>) -> &str {
    env_name.unwrap_or("all the envs")
}
