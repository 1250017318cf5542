//! Runtime configuration: `patterngen.toml`, environment and CLI overrides
//!
//! Precedence, highest first: explicit CLI flag, `PATTERNGEN_DEFINITIONS_DIR`,
//! the config file, built-in definitions only.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::definitions::PatternRegistry;

/// Config file looked up in the working directory
pub const FILE_NAME: &str = "patterngen.toml";

/// Environment variable naming an override definitions directory
pub const DEFINITIONS_DIR_ENV: &str = "PATTERNGEN_DEFINITIONS_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Trait for reading environment configuration, so tests can inject values
pub trait ConfigReader {
    fn definitions_dir(&self) -> Option<String>;
}

/// Reads configuration from process environment variables
pub struct EnvConfigReader;

impl ConfigReader for EnvConfigReader {
    fn definitions_dir(&self) -> Option<String> {
        std::env::var(DEFINITIONS_DIR_ENV).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory whose definitions override the built-in ones
    #[serde(default)]
    pub definitions_dir: Option<PathBuf>,
    /// Language used when a command does not name one
    #[serde(default)]
    pub default_language: Option<String>,
}

impl Config {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path` if it exists; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml(path, &content)
    }

    /// Apply environment overrides on top of file values
    pub fn with_env(mut self, reader: &impl ConfigReader) -> Self {
        if let Some(dir) = reader.definitions_dir().filter(|d| !d.trim().is_empty()) {
            self.definitions_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Apply an explicit definitions directory (e.g. a CLI flag)
    pub fn with_definitions_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.definitions_dir = dir;
        }
        self
    }

    /// Build the registry this configuration describes
    pub fn registry(&self) -> PatternRegistry {
        match &self.definitions_dir {
            Some(dir) => {
                debug!("Using definition overrides from {}", dir.display());
                PatternRegistry::with_overrides(dir)
            }
            None => PatternRegistry::embedded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct MockConfigReader(Option<String>);

    impl ConfigReader for MockConfigReader {
        fn definitions_dir(&self) -> Option<String> {
            self.0.clone()
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join(FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(FILE_NAME);
        fs::write(
            &path,
            "definitions_dir = \"defs\"\ndefault_language = \"python\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.definitions_dir, Some(PathBuf::from("defs")));
        assert_eq!(config.default_language.as_deref(), Some("python"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml(Path::new(FILE_NAME), "templates = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_precedence() {
        let file = Config {
            definitions_dir: Some(PathBuf::from("from_file")),
            default_language: None,
        };

        let env = file
            .clone()
            .with_env(&MockConfigReader(Some("from_env".to_string())));
        assert_eq!(env.definitions_dir, Some(PathBuf::from("from_env")));

        let cli = env
            .clone()
            .with_definitions_dir(Some(PathBuf::from("from_cli")));
        assert_eq!(cli.definitions_dir, Some(PathBuf::from("from_cli")));

        let unchanged = file.clone().with_env(&MockConfigReader(None)).with_definitions_dir(None);
        assert_eq!(unchanged, file);
    }

    #[test]
    fn test_registry_uses_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("python.yml"),
            "function:\n  template: \"fn {name}\"\n",
        )
        .unwrap();

        let config = Config::default().with_definitions_dir(Some(temp.path().to_path_buf()));
        let python = config.registry().load("python").unwrap();
        assert_eq!(python.construct("function").unwrap().template, "fn {name}");
        assert!(python.construct("class").is_err());
    }
}
