use std::path::Path;

use glob::glob;

use super::types::Challenge;
use crate::error::ChallengeError;

const BUILTIN: [(&str, &str); 2] = [
    (
        "reverse_string.toml",
        include_str!("../../challenges/reverse_string.toml"),
    ),
    ("fizz_buzz.toml", include_str!("../../challenges/fizz_buzz.toml")),
];

pub fn parse_challenge(content: &str, origin: &str) -> Result<Challenge, ChallengeError> {
    let challenge: Challenge = toml::from_str(content).map_err(|source| ChallengeError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    challenge.check()?;
    Ok(challenge)
}

pub fn load_challenge(path: &Path) -> Result<Challenge, ChallengeError> {
    let content = std::fs::read_to_string(path).map_err(|source| ChallengeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_challenge(&content, &path.display().to_string())
}

/// The challenges compiled into the binary, in registration order.
pub fn load_builtin() -> Result<Vec<Challenge>, ChallengeError> {
    BUILTIN
        .iter()
        .map(|(origin, content)| parse_challenge(content, origin))
        .collect()
}

/// Every `*.toml` file in `dir`, sorted by file name.
pub fn load_dir(dir: &Path) -> Result<Vec<Challenge>, ChallengeError> {
    let pattern = dir.join("*.toml");
    let mut paths: Vec<_> = glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .collect();

    paths.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

    let mut challenges = Vec::new();
    for path in paths {
        let challenge = load_challenge(&path)?;
        log::debug!("loaded challenge {} from {}", challenge.name, path.display());
        challenges.push(challenge);
    }
    Ok(challenges)
}
