//! Coding challenges: definitions, the registry, and the grading contract.

pub mod loader;
pub mod runner;
pub mod types;

use std::path::Path;
use std::sync::Arc;

pub use runner::RustcValidator;
pub use types::{Challenge, TestCase};

use crate::error::{ChallengeError, ValidationError};

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub success: bool,
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Verdict {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Verdict {
            success: false,
            message: message.into(),
        }
    }
}

/// Grades submitted source against a challenge's test cases.
///
/// `Err` means the grader itself broke (crash, timeout, garbage output), not that
/// the submission was wrong.
pub trait Validator: Send + Sync {
    fn validate(&self, challenge: &Challenge, source: &str) -> Result<Verdict, ValidationError>;
}

impl<F> Validator for F
where
    F: Fn(&Challenge, &str) -> Result<Verdict, ValidationError> + Send + Sync,
{
    fn validate(&self, challenge: &Challenge, source: &str) -> Result<Verdict, ValidationError> {
        self(challenge, source)
    }
}

/// Immutable catalog shared by every session.
#[derive(Debug, Default)]
pub struct ChallengeRegistry {
    challenges: Vec<Arc<Challenge>>,
}

impl ChallengeRegistry {
    pub fn new(challenges: Vec<Challenge>) -> Self {
        ChallengeRegistry {
            challenges: challenges.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn builtin() -> Result<Self, ChallengeError> {
        Ok(Self::new(loader::load_builtin()?))
    }

    /// Built-ins followed by every definition found in `dir`.
    pub fn with_dir(dir: &Path) -> Result<Self, ChallengeError> {
        let mut challenges = loader::load_builtin()?;
        challenges.extend(loader::load_dir(dir)?);
        Ok(Self::new(challenges))
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// 1-based lookup, as typed by the player.
    pub fn get(&self, number: usize) -> Option<Arc<Challenge>> {
        number
            .checked_sub(1)
            .and_then(|i| self.challenges.get(i))
            .cloned()
    }

    pub fn listing(&self) -> Vec<String> {
        self.challenges
            .iter()
            .enumerate()
            .map(|(i, c)| c.listing(i + 1))
            .collect()
    }
}
