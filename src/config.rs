//! Runtime configuration, read from a TOML file.
//!
//! Every section is optional; a missing file or key falls back to defaults.
//!
//! ```toml
//! [validator]
//! rustc = "rustc"
//! timeout_secs = 10
//! max_output_bytes = 65536
//!
//! [challenges]
//! dir = "my-challenges"
//!
//! [profile]
//! path = "profile.toml"
//!
//! [logging]
//! level = "debug"
//! file = "termfolio.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::challenge::RustcValidator;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validator: ValidatorConfig,
    pub challenges: ChallengesConfig,
    pub profile: ProfileConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub rustc: PathBuf,
    /// Covers compiling and running one submission.
    pub timeout_secs: u64,
    pub max_output_bytes: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let defaults = RustcValidator::default();
        ValidatorConfig {
            rustc: defaults.rustc,
            timeout_secs: defaults.timeout.as_secs(),
            max_output_bytes: defaults.max_output_bytes,
        }
    }
}

impl ValidatorConfig {
    pub fn build(&self) -> RustcValidator {
        RustcValidator {
            rustc: self.rustc.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            max_output_bytes: self.max_output_bytes,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengesConfig {
    /// Extra `*.toml` challenge definitions, appended after the built-ins.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::load`], but a file that does not exist yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("termfolio.toml");
        std::fs::write(&path, "[validator]\ntimeout_secs = 3\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.validator.timeout_secs, 3);
        assert_eq!(config.validator.rustc, PathBuf::from("rustc"));
        assert_eq!(config.logging.level, "info");
        assert!(config.challenges.dir.is_none());
        assert_eq!(config.validator.build().timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.validator.timeout_secs, 10);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[validator\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }
}
