//! Environment Management Module
//!
//! Environment specifications and the conda integration used to
//! create, remove and query BLAS backend environments.

pub mod conda;
pub mod spec;

pub use conda::{exists, is_active, CondaManager, EnvManager};
pub use spec::{EnvSpec, EnvTable, BASE_PACKAGES};
