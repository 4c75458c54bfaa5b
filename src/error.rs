use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading challenge definitions.
#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse challenge {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("bad challenge directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A definition parsed but cannot be graded (unsupported value, no tests, ...).
    #[error("invalid challenge {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Failures of the grading collaborator itself, as opposed to a wrong answer.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not start {program}: {source}")]
    Toolchain {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("malformed result: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid profile: {0}")]
    Invalid(String),
}
