//! Generation settings.
//!
//! Settings come from a `sqltodal.toml` in the working directory, or from
//! `<config dir>/sqltodal/config.toml`. Every key is optional:
//!
//! ```toml
//! transaction = "*(trans->getDALTransaction())"
//! function_namespace = "DAL"
//! wrapper = "SqlToDal"
//! wrapper_params = "const PkTransactionPtr& trans"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DalError, DalResult};

pub const LOCAL_CONFIG: &str = "sqltodal.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DalConfig {
    /// Constructor argument for every DAL statement object
    pub transaction: String,
    /// Namespace of select-list functions (`DAL::COUNT(...)`)
    pub function_namespace: String,
    /// Name of the function emitted by `wrap_function`
    pub wrapper: String,
    /// Parameter list of the wrapper function
    pub wrapper_params: String,
    /// Comment lines placed inside the result loop of a select
    pub iteration_comment: Vec<String>,
}

impl Default for DalConfig {
    fn default() -> Self {
        Self {
            transaction: "*(trans->getDALTransaction())".to_string(),
            function_namespace: "DAL".to_string(),
            wrapper: "SqlToDal".to_string(),
            wrapper_params: "const PkTransactionPtr& trans".to_string(),
            iteration_comment: vec![
                "Do something with the output host variables here".to_string(),
                "ie use the values of stTableColumn".to_string(),
            ],
        }
    }
}

impl DalConfig {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> DalResult<Self> {
        toml::from_str(text).map_err(|e| DalError::Config(e.to_string()))
    }

    /// Load settings from a file.
    pub fn load(path: impl AsRef<Path>) -> DalResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)
            .map_err(|e| DalError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the first config file found, or fall back to defaults.
    pub fn discover() -> DalResult<Self> {
        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Candidate config locations in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sqltodal").join("config.toml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = DalConfig::from_toml("function_namespace = \"Dal2\"").unwrap();
        assert_eq!(config.function_namespace, "Dal2");
        assert_eq!(config.transaction, DalConfig::default().transaction);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(DalConfig::from_toml("").unwrap(), DalConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DalConfig::from_toml("dialect = \"oracle\"").unwrap_err();
        assert!(matches!(err, DalError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DalConfig::load("/nonexistent/sqltodal.toml").unwrap_err();
        assert!(matches!(err, DalError::Io(_)));
    }

    #[test]
    fn test_search_paths_start_local() {
        assert_eq!(DalConfig::search_paths()[0], PathBuf::from(LOCAL_CONFIG));
    }
}
