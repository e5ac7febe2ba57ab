//! Conda Environment Management
//!
//! Narrow interface over the external environment manager, plus the
//! process-invoking adapter used at runtime.
//!
//! # Manager Commands
//!
//! - `conda env list` - existence checks (text, one environment per line)
//! - `conda info --json` - active environment (`active_prefix_name`)
//! - `conda create -n <env> <packages...> -y`
//! - `conda env remove -n <env> -y`

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Output};

use log::{debug, error, info, warn};
use serde::Deserialize;

use crate::config::Settings;
use crate::error::{exit_label, EnvError, Result};

/// Operations the command handlers need from an environment manager.
pub trait EnvManager {
    /// Whether an environment with this exact name exists.
    fn environment_exists(&self, env_name: &str) -> Result<bool>;

    /// Name of the currently active environment, if any.
    fn active_environment_name(&self) -> Result<Option<String>>;

    /// Creates an environment; `Ok(false)` when the manager exits non-zero.
    fn create_environment(&self, env_name: &str, packages: &[String]) -> Result<bool>;

    fn remove_environment(&self, env_name: &str) -> Result<()>;

    /// Editable install of the local project into the active interpreter.
    fn run_install(&self) -> Result<()>;

    fn run_tests(&self) -> Result<()>;
}

/// Fails with `MissingEnvironment` for blank names.
pub fn require_name(env_name: &str) -> Result<&str> {
    if env_name.trim().is_empty() {
        return Err(EnvError::MissingEnvironment);
    }
    Ok(env_name)
}

/// Checks whether an environment exists.
pub fn exists<M: EnvManager + ?Sized>(manager: &M, env_name: &str) -> Result<bool> {
    manager.environment_exists(require_name(env_name)?)
}

/// Checks whether an environment is the active one.
pub fn is_active<M: EnvManager + ?Sized>(manager: &M, env_name: &str) -> Result<bool> {
    let env_name = require_name(env_name)?;
    let active = manager.active_environment_name()?;
    debug!("Active environment: {:?}", active);
    Ok(active.as_deref() == Some(env_name))
}

/// Returns true if any line of `conda env list` output names `env_name`.
///
/// The name must start the line and be followed by whitespace, so
/// `foo` does not match a line for `foobar`.
pub fn env_list_contains(listing: &str, env_name: &str) -> bool {
    listing.lines().any(|line| {
        line.strip_prefix(env_name)
            .and_then(|rest| rest.chars().next())
            .is_some_and(char::is_whitespace)
    })
}

/// Subset of `conda info --json` used here.
#[derive(Deserialize, Debug)]
struct CondaInfo {
    #[serde(default)]
    active_prefix_name: Option<String>,
}

/// Extracts the active environment name from `conda info --json` output.
pub fn parse_active_name(json: &str) -> Result<Option<String>> {
    let info: CondaInfo = serde_json::from_str(json)?;
    Ok(info.active_prefix_name.filter(|name| !name.is_empty()))
}

/// Process-invoking adapter around the conda executable.
#[derive(Debug, Clone)]
pub struct CondaManager {
    conda_bin: PathBuf,
    pip: PathBuf,
    python: PathBuf,
    test_script: PathBuf,
}

impl CondaManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            conda_bin: settings.conda_bin.clone(),
            pip: settings.pip(),
            python: settings.python(),
            test_script: settings.test_script.clone(),
        }
    }

    fn conda_command(&self) -> Command {
        Command::new(&self.conda_bin)
    }

    /// Runs a conda subcommand and captures its output.
    fn capture<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.conda_command();
        cmd.args(args);
        let label = describe(&cmd);
        debug!("Running: {}", label);

        let output: Output = cmd.output().map_err(|e| EnvError::Manager {
            command: label.clone(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let reason = exit_label(&output.status.code());
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.trim().is_empty() {
                error!("`{}` failed with {}", label, reason);
            } else {
                error!("`{}` failed with {}: {}", label, reason, stderr.trim());
            }
            return Err(EnvError::Manager {
                command: label,
                reason,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs a command with inherited stdio and returns its exit status.
    fn stream(&self, mut cmd: Command) -> Result<ExitStatus> {
        let label = describe(&cmd);
        debug!("Running: {}", label);

        cmd.status().map_err(|e| EnvError::Manager {
            command: label,
            reason: e.to_string(),
        })
    }
}

impl EnvManager for CondaManager {
    fn environment_exists(&self, env_name: &str) -> Result<bool> {
        // `conda env list --json` only reports prefixes, not names
        let listing = self.capture(["env", "list"])?;
        Ok(env_list_contains(&listing, env_name))
    }

    fn active_environment_name(&self) -> Result<Option<String>> {
        let json = self.capture(["info", "--json"])?;
        parse_active_name(&json)
    }

    fn create_environment(&self, env_name: &str, packages: &[String]) -> Result<bool> {
        info!("Creating environment '{}' with packages: {:?}", env_name, packages);

        let mut cmd = self.conda_command();
        cmd.arg("create").arg("-n").arg(env_name).args(packages).arg("-y");

        let status = self.stream(cmd)?;
        if !status.success() {
            error!("Failed to create environment '{}': {}", env_name, status);
        }
        Ok(status.success())
    }

    fn remove_environment(&self, env_name: &str) -> Result<()> {
        let mut cmd = self.conda_command();
        cmd.arg("env").arg("remove").arg("-n").arg(env_name).arg("-y");

        let status = self.stream(cmd)?;
        if !status.success() {
            warn!("Removing environment '{}' exited with {}", env_name, status);
        }
        Ok(())
    }

    fn run_install(&self) -> Result<()> {
        let mut cmd = Command::new(&self.pip);
        cmd.arg("install").arg("-e").arg(".");

        let status = self.stream(cmd)?;
        if !status.success() {
            warn!("Editable install exited with {}", status);
        }
        Ok(())
    }

    fn run_tests(&self) -> Result<()> {
        let mut cmd = Command::new(&self.python);
        cmd.arg(&self.test_script);

        let status = self.stream(cmd)?;
        if status.success() {
            Ok(())
        } else {
            Err(EnvError::TestsFailed(status.code()))
        }
    }
}

/// Renders a command line for logs and error messages.
fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
