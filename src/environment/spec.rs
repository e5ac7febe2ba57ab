//! Environment Specifications
//!
//! Static mapping from backend variant names to the package constraints
//! that select that BLAS implementation and threading model.
//!
//! # Example YAML Format
//!
//! ```yaml
//! base_packages: [pip, python=3.10, ninja]
//! environments:
//!   - name: openblas_pthreads_lp64
//!     packages: ["libblas=*=*openblas", "openblas=*=pthreads*"]
//!   - name: mkl_openmp
//!     packages: ["libblas=*=*mkl"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::{EnvError, Result};

/// Packages added to every environment on creation.
pub const BASE_PACKAGES: &[&str] = &["pip", "python=3.10", "ninja"];

const BUILTIN_SPECS: &[(&str, &[&str])] = &[
    (
        "openblas_pthreads_lp64",
        &["libblas=*=*openblas", "openblas=*=pthreads*"],
    ),
    ("openblas_pthreads_ilp64", &["openblas-ilp64=*=pthreads*"]),
    (
        "openblas_openmp_lp64",
        &["libblas=*=openblas", "openblas=*=openmp*"],
    ),
    ("openblas_openmp_ilp64", &["openblas-ilp64=*=openmp*"]),
    ("netlib_pthreads", &["libblas=*=*netlib", "blas-devel=3.9.0=5*"]),
    ("blis_pthreads", &["libblas=*=*blis"]),
    ("mkl_openmp", &["libblas=*=*mkl"]),
];

fn default_base_packages() -> Vec<String> {
    BASE_PACKAGES.iter().map(|p| p.to_string()).collect()
}

/// A named backend variant and its package constraints.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EnvSpec {
    /// Environment name, also the conda environment name
    pub name: String,

    /// Package constraints (e.g. "openblas=*=pthreads*")
    #[serde(default)]
    pub packages: Vec<String>,
}

impl EnvSpec {
    pub fn new<I, S>(name: impl Into<String>, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered, immutable table of environment specifications.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EnvTable {
    pub environments: Vec<EnvSpec>,

    #[serde(default = "default_base_packages")]
    pub base_packages: Vec<String>,
}

impl EnvTable {
    /// Creates a table, rejecting empty or duplicate names.
    pub fn new(environments: Vec<EnvSpec>, base_packages: Vec<String>) -> Result<Self> {
        let table = Self {
            environments,
            base_packages,
        };
        table.validate()?;
        Ok(table)
    }

    /// The built-in BLAS backend table.
    pub fn builtin() -> Self {
        let environments = BUILTIN_SPECS
            .iter()
            .map(|(name, packages)| EnvSpec::new(*name, packages.iter().copied()))
            .collect();

        Self {
            environments,
            base_packages: default_base_packages(),
        }
    }

    /// Loads a table from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading environment table from: {}", path.display());

        let content = fs::read_to_string(path)?;
        let table = Self::from_yaml(&content)?;

        debug!("Loaded {} environments", table.environments.len());
        Ok(table)
    }

    /// Parses a table from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let table: EnvTable = serde_yaml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.environments {
            if spec.name.trim().is_empty() {
                return Err(EnvError::InvalidTable(
                    "environment with empty name".to_string(),
                ));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(EnvError::InvalidTable(format!(
                    "duplicate environment '{}'",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    /// Environment names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(|spec| spec.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&EnvSpec> {
        self.environments.iter().find(|spec| spec.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Full package list for creation: the variant's constraints followed
    /// by the base packages.
    pub fn packages_for(&self, name: &str) -> Result<Vec<String>> {
        let spec = self.get(name).ok_or_else(|| self.unknown(name))?;

        Ok(spec
            .packages
            .iter()
            .chain(self.base_packages.iter())
            .cloned()
            .collect())
    }

    /// Builds the error reported for a name missing from the table.
    pub fn unknown(&self, name: &str) -> EnvError {
        EnvError::UnknownEnvironment {
            name: name.to_string(),
            known: self.names().collect::<Vec<_>>().join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let table = EnvTable::builtin();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(
            names,
            vec![
                "openblas_pthreads_lp64",
                "openblas_pthreads_ilp64",
                "openblas_openmp_lp64",
                "openblas_openmp_ilp64",
                "netlib_pthreads",
                "blis_pthreads",
                "mkl_openmp",
            ]
        );
    }

    #[test]
    fn test_packages_for_appends_base() {
        let table = EnvTable::builtin();
        let packages = table.packages_for("netlib_pthreads").unwrap();
        assert_eq!(
            packages,
            vec![
                "libblas=*=*netlib",
                "blas-devel=3.9.0=5*",
                "pip",
                "python=3.10",
                "ninja"
            ]
        );
    }

    #[test]
    fn test_packages_for_unknown() {
        let table = EnvTable::builtin();
        match table.packages_for("accelerate") {
            Err(EnvError::UnknownEnvironment { name, known }) => {
                assert_eq!(name, "accelerate");
                assert!(known.starts_with("openblas_pthreads_lp64, "));
                assert!(known.ends_with("mkl_openmp"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_contains_is_exact() {
        let table = EnvTable::builtin();
        assert!(table.contains("mkl_openmp"));
        assert!(!table.contains("mkl"));
        assert!(!table.contains("MKL_OPENMP"));
    }

    #[test]
    fn test_from_yaml_keeps_order_and_defaults_base() {
        let yaml = r#"
environments:
  - name: zeta
    packages: ["libblas=*=*mkl"]
  - name: alpha
"#;
        let table = EnvTable::from_yaml(yaml).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(table.base_packages, vec!["pip", "python=3.10", "ninja"]);
        assert_eq!(table.packages_for("alpha").unwrap().len(), 3);
    }

    #[test]
    fn test_from_yaml_custom_base() {
        let yaml = r#"
base_packages: ["python=3.12"]
environments:
  - name: blis
    packages: ["libblas=*=*blis"]
"#;
        let table = EnvTable::from_yaml(yaml).unwrap();
        assert_eq!(
            table.packages_for("blis").unwrap(),
            vec!["libblas=*=*blis", "python=3.12"]
        );
    }

    #[test]
    fn test_from_yaml_rejects_duplicates() {
        let yaml = r#"
environments:
  - name: blis
  - name: blis
"#;
        assert!(matches!(
            EnvTable::from_yaml(yaml),
            Err(EnvError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let result = EnvTable::new(vec![EnvSpec::new(" ", ["x"])], vec![]);
        assert!(matches!(result, Err(EnvError::InvalidTable(_))));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "environments:\n  - name: mkl\n    packages: [\"libblas=*=*mkl\"]").unwrap();

        let table = EnvTable::load(file.path()).unwrap();
        assert_eq!(table.environments.len(), 1);
        assert!(table.contains("mkl"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = EnvTable::load("/nonexistent/blasenv/envs.yaml");
        assert!(matches!(result, Err(EnvError::Io(_))));
    }
}
