//! Runtime Settings
//!
//! Settings are read once at startup from environment variables and
//! handed to the components that need them.
//!
//! | Variable           | Default            | Purpose                                   |
//! |--------------------|--------------------|-------------------------------------------|
//! | `BLAS_CONDA`       | `conda`            | Environment manager executable            |
//! | `BASE_ENV_BINDIR`  | `.`                | Directory holding `pip` and `python`      |
//! | `BLAS_TEST_SCRIPT` | `run_unittests.py` | Test runner script executed by `python`   |
//! | `BLAS_ENV_FILE`    | unset              | YAML file replacing the built-in table    |

use std::path::PathBuf;

/// Environment variable naming the manager binary.
pub const CONDA_VAR: &str = "BLAS_CONDA";
/// Environment variable naming the base environment's bin directory.
pub const BINDIR_VAR: &str = "BASE_ENV_BINDIR";
/// Environment variable naming the test runner script.
pub const TEST_SCRIPT_VAR: &str = "BLAS_TEST_SCRIPT";
/// Environment variable naming an environment table file.
pub const ENV_FILE_VAR: &str = "BLAS_ENV_FILE";

const DEFAULT_CONDA: &str = "conda";
const DEFAULT_BINDIR: &str = ".";
const DEFAULT_TEST_SCRIPT: &str = "run_unittests.py";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Manager executable (mamba is untested)
    pub conda_bin: PathBuf,
    /// Where `pip` and `python` live; usually not inside the BLAS environments
    pub base_bindir: PathBuf,
    pub test_script: PathBuf,
    pub env_file: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            conda_bin: PathBuf::from(get(CONDA_VAR).unwrap_or_else(|| DEFAULT_CONDA.to_string())),
            base_bindir: PathBuf::from(
                get(BINDIR_VAR).unwrap_or_else(|| DEFAULT_BINDIR.to_string()),
            ),
            test_script: PathBuf::from(
                get(TEST_SCRIPT_VAR).unwrap_or_else(|| DEFAULT_TEST_SCRIPT.to_string()),
            ),
            env_file: get(ENV_FILE_VAR).map(PathBuf::from),
        }
    }

    /// Path to `pip` in the base environment.
    pub fn pip(&self) -> PathBuf {
        self.base_bindir.join("pip")
    }

    /// Path to `python` in the base environment.
    pub fn python(&self) -> PathBuf {
        self.base_bindir.join("python")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
