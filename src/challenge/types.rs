use serde::Deserialize;
use toml::Value;

use crate::error::ChallengeError;

fn default_language() -> String {
    "Rust".to_string()
}

/// A coding exercise as read from its TOML definition.
#[derive(Debug, Deserialize)]
pub struct Challenge {
    pub name: String,
    pub description: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Name of the function the submitted source must define.
    pub function: String,
    /// Shown to the player when the challenge starts.
    #[serde(default)]
    pub signature: Option<String>,
    pub tests: Vec<TestCase>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TestCase {
    pub input: Value,
    pub expected: Value,
}

impl Challenge {
    /// Reject definitions the runner could not turn into a harness.
    pub fn check(&self) -> Result<(), ChallengeError> {
        let invalid = |reason: String| ChallengeError::Invalid {
            name: self.name.clone(),
            reason,
        };
        if !is_identifier(&self.function) {
            return Err(invalid(format!("'{}' is not a function name", self.function)));
        }
        if self.tests.is_empty() {
            return Err(invalid("no test cases".to_string()));
        }
        for (i, case) in self.tests.iter().enumerate() {
            if rust_literal(&case.input).is_none() {
                return Err(invalid(format!("test {} has an unsupported input", i + 1)));
            }
            if debug_rendering(&case.expected).is_none() {
                return Err(invalid(format!("test {} has an unsupported expected value", i + 1)));
            }
        }
        Ok(())
    }

    /// `"1. reverseString (Rust): Write a function..."`
    pub fn listing(&self, index: usize) -> String {
        format!("{}. {} ({}): {}", index, self.name, self.language, self.description)
    }
}

impl TestCase {
    pub fn input_literal(&self) -> Option<String> {
        rust_literal(&self.input)
    }

    pub fn expected_rendering(&self) -> Option<String> {
        debug_rendering(&self.expected)
    }

    pub fn input_rendering(&self) -> String {
        debug_rendering(&self.input).unwrap_or_else(|| self.input.to_string())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Source text for passing `value` as a Rust argument. Arrays become `vec![..]`.
pub fn rust_literal(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts = items.iter().map(rust_literal).collect::<Option<Vec<_>>>()?;
            Some(format!("vec![{}]", parts.join(", ")))
        }
        scalar => scalar_rendering(scalar),
    }
}

/// What `{:?}` prints for the Rust value equivalent to `value`.
///
/// Arrays render like `Vec<T>` so comparison is structural.
pub fn debug_rendering(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(debug_rendering)
                .collect::<Option<Vec<_>>>()?;
            Some(format!("[{}]", parts.join(", ")))
        }
        scalar => scalar_rendering(scalar),
    }
}

fn scalar_rendering(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(format!("{:?}", s)),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(format!("{:?}", f)),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(_) | Value::Table(_) | Value::Array(_) => None,
    }
}
