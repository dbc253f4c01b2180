//! Configuration file loading for qubit.
//!
//! The file lives at `~/.qubit/config.toml` unless `QUBIT_CONFIG` points
//! somewhere else. A missing file is not an error; everything falls back to
//! the stock whitelist.
//!
//! ```toml
//! [whitelist]
//! functions = ["sin", "cos"]          # replaces the stock list
//! multi_arg_functions = []
//! symbols = ["pi", "i"]
//! node_kinds = ["group", "operator", "literal", "function_call", "identifier"]
//! extra_functions = ["log10"]         # added on top
//! extra_symbols = ["c"]
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;
use toml::de::Error as TomlError;

use qubit_core::Whitelist;
use qubit_expr::NodeKind;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "QUBIT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: TomlError,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QubitConfig {
    pub whitelist: Option<WhitelistConfig>,
}

/// The `[whitelist]` section.
///
/// Full lists replace the stock ones; `extra_*` lists extend whatever the
/// full lists produced.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhitelistConfig {
    pub functions: Option<Vec<String>>,
    pub multi_arg_functions: Option<Vec<String>>,
    pub symbols: Option<Vec<String>>,
    pub node_kinds: Option<Vec<NodeKind>>,
    #[serde(default)]
    pub extra_functions: Vec<String>,
    #[serde(default)]
    pub extra_symbols: Vec<String>,
}

impl WhitelistConfig {
    #[must_use]
    pub fn to_whitelist(&self) -> Whitelist {
        let mut whitelist = Whitelist::default();
        if let Some(functions) = &self.functions {
            whitelist = whitelist.with_functions(functions.iter().cloned());
        }
        if let Some(functions) = &self.multi_arg_functions {
            whitelist = whitelist.with_multi_arg_functions(functions.iter().cloned());
        }
        if let Some(symbols) = &self.symbols {
            whitelist = whitelist.with_symbols(symbols.iter().cloned());
        }
        if let Some(kinds) = &self.node_kinds {
            whitelist = whitelist.with_node_kinds(kinds.iter().copied());
        }
        whitelist.extend_functions(self.extra_functions.iter().cloned());
        whitelist.extend_symbols(self.extra_symbols.iter().cloned());
        whitelist
    }
}

impl QubitConfig {
    /// Load from the default location.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from `path`. A missing file yields `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(Some(config))
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// The effective whitelist: the stock one adjusted by `[whitelist]`.
    #[must_use]
    pub fn whitelist(&self) -> Whitelist {
        self.whitelist
            .as_ref()
            .map_or_else(Whitelist::default, WhitelistConfig::to_whitelist)
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    resolve_path(env::var_os(CONFIG_ENV), dirs::home_dir())
}

fn resolve_path(override_path: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match override_path {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => home.map(|home| home.join(".qubit").join("config.toml")),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::fs;
    use std::path::PathBuf;

    use qubit_core::Whitelist;
    use qubit_expr::NodeKind;

    use super::{ConfigError, QubitConfig, resolve_path};

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = QubitConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_file_uses_stock_whitelist() {
        let (_dir, path) = write_config("");
        let config = QubitConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.whitelist(), Whitelist::default());
    }

    #[test]
    fn full_lists_replace_and_extras_extend() {
        let (_dir, path) = write_config(
            r#"
[whitelist]
functions = ["sin"]
symbols = ["pi"]
node_kinds = ["function_call", "identifier", "literal"]
extra_functions = ["log10"]
extra_symbols = ["c"]
"#,
        );
        let whitelist = QubitConfig::load_from(&path).unwrap().unwrap().whitelist();

        assert!(whitelist.allows_function("sin"));
        assert!(whitelist.allows_function("log10"));
        assert!(!whitelist.allows_function("cos"));
        assert!(whitelist.allows_symbol("c"));
        assert!(!whitelist.allows_symbol("i"));
        assert!(!whitelist.allows_kind(NodeKind::Operator));
        // Not overridden, so the stock multi-argument list stays.
        assert!(whitelist.is_multi_arg("log"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("[whitelist]\nfunctoins = [\"sin\"]\n");
        let err = QubitConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn every_node_kind_can_be_named() {
        let names: Vec<String> = NodeKind::ALL
            .iter()
            .map(|kind| format!("{:?}", kind.as_str()))
            .collect();
        let (_dir, path) =
            write_config(&format!("[whitelist]\nnode_kinds = [{}]\n", names.join(", ")));
        let whitelist = QubitConfig::load_from(&path).unwrap().unwrap().whitelist();
        let kinds: Vec<NodeKind> = whitelist.node_kinds().collect();
        assert_eq!(kinds, NodeKind::ALL);
    }

    #[test]
    fn unknown_node_kind_is_a_parse_error() {
        let (_dir, path) = write_config("[whitelist]\nnode_kinds = [\"matrix\"]\n");
        assert!(matches!(
            QubitConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn directory_path_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = QubitConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("failed to read config"));
    }

    #[test]
    fn env_override_wins_over_home() {
        let home = Some(PathBuf::from("/home/user"));
        assert_eq!(
            resolve_path(Some(OsString::from("/tmp/q.toml")), home.clone()),
            Some(PathBuf::from("/tmp/q.toml"))
        );
        assert_eq!(
            resolve_path(Some(OsString::new()), home.clone()),
            Some(PathBuf::from("/home/user/.qubit/config.toml"))
        );
        assert_eq!(
            resolve_path(None, home),
            Some(PathBuf::from("/home/user/.qubit/config.toml"))
        );
        assert_eq!(resolve_path(None, None), None);
    }
}
