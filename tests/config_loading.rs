use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use termfolio::challenge::ChallengeRegistry;
use termfolio::config::Config;
use termfolio::content::Profile;
use termfolio::dispatch::{Dispatcher, Effect};

const PROFILE: &str = r#"
owner = "Ada Lovelace"
github = "https://github.com/ada"
resume = "ada.pdf"
banner = "ADA"
about = ["Analyst."]
skills = ["Notes"]
contact = ["ada@example.com"]

[[projects]]
name = "Engine"
summary = "Computes Bernoulli numbers."
technologies = "Brass"
url = "https://example.com/engine"
"#;

const DOUBLE: &str = r#"
name = "double"
description = "Double the input."
function = "double"

[[tests]]
input = 2
expected = 4
"#;

#[test]
fn config_file_drives_content_and_challenges() {
    let dir = TempDir::new().unwrap();
    let challenges = dir.path().join("challenges");
    fs::create_dir(&challenges).unwrap();
    fs::write(challenges.join("double.toml"), DOUBLE).unwrap();
    let profile_path = dir.path().join("profile.toml");
    fs::write(&profile_path, PROFILE).unwrap();

    let config_path = dir.path().join("termfolio.toml");
    fs::write(
        &config_path,
        format!(
            "[validator]\ntimeout_secs = 4\n\n[challenges]\ndir = {:?}\n\n[profile]\npath = {:?}\n",
            challenges.display().to_string(),
            profile_path.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load_or_default(&config_path).unwrap();
    assert_eq!(config.validator.build().timeout.as_secs(), 4);

    let profile = Profile::load(config.profile.path.as_deref().unwrap()).unwrap();
    let registry = ChallengeRegistry::with_dir(config.challenges.dir.as_deref().unwrap()).unwrap();
    assert_eq!(registry.len(), 3);

    let mut session = Dispatcher::new(
        Arc::new(profile),
        Arc::new(registry),
        Box::new(config.validator.build()),
    );

    let welcome = session.welcome().texts();
    assert!(welcome.contains(&"Welcome to Ada Lovelace's Portfolio Terminal.".to_string()));

    let list = session.submit("list").texts();
    assert_eq!(list[3], "3. double (Rust): Double the input.");

    let reply = session.submit("launch 1");
    assert_eq!(reply.effects, vec![Effect::OpenUrl("https://example.com/engine".to_string())]);
    let reply = session.submit("launch 2").texts();
    assert_eq!(reply[0], "Invalid project number. Please try again.");
}

#[test]
fn missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.validator.timeout_secs, 10);
    assert!(config.challenges.dir.is_none());
    assert!(config.profile.path.is_none());
}

#[test]
fn broken_challenge_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.toml"), "name = ").unwrap();
    let err = ChallengeRegistry::with_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("bad.toml"), "{}", err);
}
