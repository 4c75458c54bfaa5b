//! Drives the real `rustc` grader end to end.

use std::time::{Duration, Instant};

use termfolio::challenge::{ChallengeRegistry, RustcValidator, Validator};
use termfolio::error::ValidationError;

fn validator(timeout_secs: u64) -> RustcValidator {
    RustcValidator {
        timeout: Duration::from_secs(timeout_secs),
        ..RustcValidator::default()
    }
}

#[test]
fn reverse_string_passes_all_cases() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(1).unwrap();
    let code = "fn reverseString(s: &str) -> String {\n    s.chars().rev().collect()\n}";
    let verdict = validator(60).validate(&challenge, code).unwrap();
    assert!(verdict.success, "{}", verdict.message);
    assert_eq!(verdict.message, "All test cases passed!");
}

#[test]
fn identity_fails_on_first_case() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(1).unwrap();
    let code = "fn reverseString(s: &str) -> String { s.to_string() }";
    let verdict = validator(60).validate(&challenge, code).unwrap();
    assert!(!verdict.success);
    assert_eq!(
        verdict.message,
        "Failed on input \"hello\". Expected \"olleh\", but got \"hello\"."
    );
}

#[test]
fn fizzbuzz_compares_vectors() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(2).unwrap();
    let code = r#"
fn fizzBuzz(n: u32) -> Vec<String> {
    (1..=n)
        .map(|i| match (i % 3, i % 5) {
            (0, 0) => "FizzBuzz".to_string(),
            (0, _) => "Fizz".to_string(),
            (_, 0) => "Buzz".to_string(),
            _ => i.to_string(),
        })
        .collect()
}
"#;
    let verdict = validator(60).validate(&challenge, code).unwrap();
    assert!(verdict.success, "{}", verdict.message);
}

#[test]
fn compile_errors_are_reported_not_raised() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(1).unwrap();
    let verdict = validator(60)
        .validate(&challenge, "fn reverseString(s: &str) -> String { undefined_thing }")
        .unwrap();
    assert!(!verdict.success);
    assert!(verdict.message.starts_with("Error: "));
    assert!(verdict.message.contains("undefined_thing"));
    assert!(!verdict.message.contains("/tmp/"));
}

#[test]
fn runaway_submission_times_out() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(1).unwrap();
    let code = "fn reverseString(s: &str) -> String { loop { std::hint::spin_loop(); } }";
    let err = validator(3).validate(&challenge, code).unwrap_err();
    assert!(matches!(err, ValidationError::Timeout(_)));
    assert_eq!(err.to_string(), "timed out after 3s");
}

#[cfg(unix)]
#[test]
fn lingering_descendant_cannot_outlast_the_deadline() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(1).unwrap();
    let code = r#"
fn reverseString(s: &str) -> String {
    let _ = std::process::Command::new("/bin/sleep").arg("20").spawn();
    s.chars().rev().collect()
}
"#;
    let started = Instant::now();
    let err = validator(5).validate(&challenge, code).unwrap_err();
    assert!(matches!(err, ValidationError::Timeout(_)), "{}", err);
    assert!(started.elapsed() < Duration::from_secs(15), "{:?}", started.elapsed());
}

#[test]
fn wide_whitespace_in_diagnostics_is_reported() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(1).unwrap();
    let code = "fn reverseString(s: &str) -> String { let _x = \"\u{3000}solution.rs\"; undefined_thing }";
    let verdict = validator(60).validate(&challenge, code).unwrap();
    assert!(!verdict.success);
    assert!(verdict.message.contains("undefined_thing"));
}

#[test]
fn missing_toolchain_is_an_error() {
    let registry = ChallengeRegistry::builtin().unwrap();
    let challenge = registry.get(1).unwrap();
    let broken = RustcValidator {
        rustc: "/nonexistent/rustc".into(),
        ..RustcValidator::default()
    };
    let err = broken.validate(&challenge, "fn reverseString(s: &str) -> String { s.into() }").unwrap_err();
    assert!(matches!(err, ValidationError::Toolchain { .. }));
}
