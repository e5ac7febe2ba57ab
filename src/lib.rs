//! blasenv - BLAS Backend Environment Helper
//!
//! Creates, removes, lists and tests conda environments that each pin a
//! different BLAS implementation and threading model.
//!
//! # Architecture
//!
//! - [`environment`]: environment table and conda integration
//! - [`commands`]: `list` / `spinup` / `teardown` / `test` handlers
//! - [`config`]: settings read from environment variables
//! - [`cli`]: command-line argument definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use blasenv::commands::Dispatcher;
//! use blasenv::config::Settings;
//! use blasenv::environment::{CondaManager, EnvTable};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env();
//!     let dispatcher = Dispatcher::new(CondaManager::new(&settings), EnvTable::builtin());
//!
//!     println!("{}", dispatcher.list());
//!     dispatcher.spinup(Some("openblas_pthreads_lp64"), false)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;

// Re-export commonly used types
pub use commands::Dispatcher;
pub use config::Settings;
pub use environment::{CondaManager, EnvManager, EnvTable};
pub use error::{EnvError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "blasenv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_module_exports_table() {
        let table = EnvTable::builtin();
        assert_eq!(table.environments.len(), 7);
    }
}
