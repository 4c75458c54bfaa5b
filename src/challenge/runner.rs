//! Grades submissions by compiling them with `rustc` outside this process.
//!
//! The submitted source is wrapped in a generated `main` that calls the
//! challenge function once per test case and prints the `{:?}` rendering of each
//! result behind a random marker. Compile and run share one deadline; the
//! compiled program gets an empty environment, no stdin, and a throwaway working
//! directory.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tempfile::TempDir;

use super::types::Challenge;
use super::{Validator, Verdict};
use crate::error::ValidationError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone)]
pub struct RustcValidator {
    pub rustc: PathBuf,
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for RustcValidator {
    fn default() -> Self {
        RustcValidator {
            rustc: PathBuf::from("rustc"),
            timeout: Duration::from_secs(10),
            max_output_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug)]
struct Captured {
    success: bool,
    exit: String,
    stdout: String,
    stderr: String,
}

impl Validator for RustcValidator {
    fn validate(&self, challenge: &Challenge, source: &str) -> Result<Verdict, ValidationError> {
        let temp_dir = TempDir::new()?;
        let source_path = temp_dir.path().join("solution.rs");
        let binary_path = temp_dir
            .path()
            .join(format!("solution{}", std::env::consts::EXE_SUFFIX));

        let marker = format!("__case_{:016x}_", rand::thread_rng().gen::<u64>());
        std::fs::write(&source_path, build_harness(challenge, source, &marker)?)?;

        let deadline = Instant::now() + self.timeout;

        let mut compile = Command::new(&self.rustc);
        compile
            .arg(&source_path)
            .arg("-o")
            .arg(&binary_path)
            .arg("--edition=2021")
            .arg("-A")
            .arg("warnings")
            .current_dir(temp_dir.path());
        let child = compile.spawn_piped().map_err(|source| ValidationError::Toolchain {
            program: self.rustc.display().to_string(),
            source,
        })?;
        let compiled = self.wait(child, deadline)?;
        if !compiled.success {
            log::debug!("submission for {} did not compile", challenge.name);
            return Ok(Verdict::fail(format!(
                "Error: {}",
                clean_error_output(&compiled.stderr)
            )));
        }

        let mut run = Command::new(&binary_path);
        run.env_clear().current_dir(temp_dir.path());
        let ran = self.wait(run.spawn_piped()?, deadline)?;

        Ok(grade(challenge, &marker, &ran))
    }
}

trait SpawnPiped {
    fn spawn_piped(&mut self) -> std::io::Result<Child>;
}

impl SpawnPiped for Command {
    fn spawn_piped(&mut self) -> std::io::Result<Child> {
        self.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
    }
}

impl RustcValidator {
    fn wait(&self, mut child: Child, deadline: Instant) -> Result<Captured, ValidationError> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ValidationError::Malformed("stdout was not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ValidationError::Malformed("stderr was not captured".into()))?;
        let limit = self.max_output_bytes as u64;
        let (out_tx, out_rx) = mpsc::channel();
        let (err_tx, err_rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = out_tx.send(read_bounded(stdout, limit));
        });
        thread::spawn(move || {
            let _ = err_tx.send(read_bounded(stderr, limit));
        });

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ValidationError::Timeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        // A descendant that inherited the pipes can hold them open after the
        // child exits, so the readers are bounded by the same deadline.
        Ok(Captured {
            success: status.success(),
            exit: status.to_string(),
            stdout: self.collect(&out_rx, deadline)?,
            stderr: self.collect(&err_rx, deadline)?,
        })
    }

    fn collect(
        &self,
        reader: &Receiver<std::io::Result<String>>,
        deadline: Instant,
    ) -> Result<String, ValidationError> {
        match reader.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(output) => Ok(output?),
            Err(RecvTimeoutError::Timeout) => Err(ValidationError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(ValidationError::Malformed("output reader stopped".into()))
            }
        }
    }
}

/// Keep the first `limit` bytes and drain the rest so the child never blocks on a full pipe.
fn read_bounded<R: Read>(reader: R, limit: u64) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut limited = reader.take(limit);
    limited.read_to_end(&mut buf)?;
    std::io::copy(&mut limited.into_inner(), &mut std::io::sink())?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn build_harness(challenge: &Challenge, source: &str, marker: &str) -> Result<String, ValidationError> {
    let mut harness = String::from("#![allow(dead_code, non_snake_case, unused)]\n\n");
    harness.push_str(source);
    harness.push_str("\n\nfn main() {\n");
    for (i, case) in challenge.tests.iter().enumerate() {
        let input = case.input_literal().ok_or_else(|| {
            ValidationError::Malformed(format!("test {} input cannot be expressed in Rust", i + 1))
        })?;
        let _ = writeln!(
            harness,
            "    println!(\"{}{}:{{:?}}\", {}({}));",
            marker, i, challenge.function, input
        );
    }
    harness.push_str("}\n");
    Ok(harness)
}

fn grade(challenge: &Challenge, marker: &str, run: &Captured) -> Verdict {
    let results: HashMap<usize, &str> = run
        .stdout
        .lines()
        .filter_map(|line| line.strip_prefix(marker))
        .filter_map(|rest| rest.split_once(':'))
        .filter_map(|(idx, value)| idx.parse().ok().map(|idx| (idx, value)))
        .collect();

    for (i, case) in challenge.tests.iter().enumerate() {
        let expected = case.expected_rendering().unwrap_or_default();
        match results.get(&i) {
            Some(got) if *got == expected => {}
            Some(got) => {
                return Verdict::fail(format!(
                    "Failed on input {}. Expected {}, but got {}.",
                    case.input_rendering(),
                    expected,
                    got
                ));
            }
            None => {
                let detail = run.stderr.trim();
                return Verdict::fail(if detail.is_empty() {
                    format!("Error: program stopped early ({})", run.exit)
                } else {
                    format!("Error: {}", detail)
                });
            }
        }
    }
    Verdict::pass("All test cases passed!")
}

fn clean_error_output(stderr: &str) -> String {
    // Strip the temp directory from paths, keep the diagnostics
    stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.find("solution.rs") {
            Some(pos) => {
                let start = line[..pos]
                    .char_indices()
                    .rev()
                    .find(|(_, c)| c.is_whitespace())
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(0);
                format!("{}{}", &line[..start], &line[pos..])
            }
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::loader::load_builtin;

    fn captured(stdout: &str, stderr: &str) -> Captured {
        Captured {
            success: stderr.is_empty(),
            exit: "exit status: 0".to_string(),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn harness_calls_function_per_case() {
        let challenges = load_builtin().unwrap();
        let harness = build_harness(&challenges[0], "fn reverseString(s: &str) -> String { s.into() }", "@@").unwrap();
        assert!(harness.starts_with("#![allow("));
        assert!(harness.contains("println!(\"@@0:{:?}\", reverseString(\"hello\"));"));
        assert!(harness.contains("println!(\"@@2:{:?}\", reverseString(\"racecar\"));"));
    }

    #[test]
    fn grade_reports_first_mismatch() {
        let challenges = load_builtin().unwrap();
        let run = captured("@@0:\"hello\"\n@@1:\"radar\"\n@@2:\"racecar\"\n", "");
        let verdict = grade(&challenges[0], "@@", &run);
        assert!(!verdict.success);
        assert_eq!(
            verdict.message,
            "Failed on input \"hello\". Expected \"olleh\", but got \"hello\"."
        );
    }

    #[test]
    fn grade_ignores_unmarked_output() {
        let challenges = load_builtin().unwrap();
        let run = captured(
            "@@0:\"olleh\"\ndebug noise\n@@1:\"radar\"\n@@2:\"racecar\"\n",
            "",
        );
        let verdict = grade(&challenges[0], "@@", &run);
        assert!(verdict.success, "{}", verdict.message);
        assert_eq!(verdict.message, "All test cases passed!");
    }

    #[test]
    fn grade_surfaces_panic_output() {
        let challenges = load_builtin().unwrap();
        let run = captured("@@0:\"olleh\"\n", "thread 'main' panicked at solution.rs:1:1");
        let verdict = grade(&challenges[0], "@@", &run);
        assert!(!verdict.success);
        assert!(verdict.message.starts_with("Error: thread 'main' panicked"));
    }

    #[test]
    fn fizzbuzz_arrays_compare_structurally() {
        let challenges = load_builtin().unwrap();
        let good15 = format!(
            "{:?}",
            (1..=15)
                .map(|i| match (i % 3, i % 5) {
                    (0, 0) => "FizzBuzz".to_string(),
                    (0, _) => "Fizz".to_string(),
                    (_, 0) => "Buzz".to_string(),
                    _ => i.to_string(),
                })
                .collect::<Vec<_>>()
        );
        let stdout = format!("@@0:{}\n@@1:[\"1\", \"2\", \"Fizz\", \"4\", \"5\"]\n", good15);
        let verdict = grade(&challenges[1], "@@", &captured(&stdout, ""));
        assert!(!verdict.success);
        assert_eq!(
            verdict.message,
            "Failed on input 5. Expected [\"1\", \"2\", \"Fizz\", \"4\", \"Buzz\"], but got [\"1\", \"2\", \"Fizz\", \"4\", \"5\"]."
        );
    }

    #[test]
    fn compiler_paths_are_shortened() {
        let raw = "error[E0425]: cannot find value `x` in this scope\n --> /tmp/.tmpAbC/solution.rs:2:5\n\n";
        assert_eq!(
            clean_error_output(raw),
            "error[E0425]: cannot find value `x` in this scope\n --> solution.rs:2:5"
        );
    }

    #[test]
    fn wide_whitespace_before_file_name_is_kept_whole() {
        let echoed = "1 | fn reverseString(s: &str) -> String { let _x = \"\u{3000}solution.rs\"; x }";
        assert_eq!(clean_error_output(echoed), echoed);

        let nbsp = "note:\u{00A0}/tmp/.tmpQ/solution.rs:1:1";
        assert_eq!(clean_error_output(nbsp), "note:\u{00A0}solution.rs:1:1");
    }

    #[test]
    fn bounded_reader_truncates() {
        let data = vec![b'a'; 100];
        let out = read_bounded(&data[..], 10).unwrap();
        assert_eq!(out, "aaaaaaaaaa");
    }
}
