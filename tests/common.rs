#![allow(dead_code)]

use std::sync::Arc;

use termfolio::challenge::{Challenge, ChallengeRegistry, Verdict};
use termfolio::content::Profile;
use termfolio::dispatch::Dispatcher;
use termfolio::error::ValidationError;

/// A session whose grader accepts anything mentioning `rev()`.
pub fn session() -> Dispatcher {
    let profile = Arc::new(Profile::builtin().expect("profile"));
    let registry = Arc::new(ChallengeRegistry::builtin().expect("registry"));
    let grader = |_: &Challenge, code: &str| -> Result<Verdict, ValidationError> {
        if code.contains("rev()") {
            Ok(Verdict::pass("All test cases passed!"))
        } else {
            Ok(Verdict::fail("Failed on input \"hello\". Expected \"olleh\", but got \"hello\"."))
        }
    };
    Dispatcher::new(profile, registry, Box::new(grader)).with_seed(7)
}

pub fn run_all(session: &mut Dispatcher, lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| session.submit(line).texts())
        .collect()
}
