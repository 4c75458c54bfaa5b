//! # termfolio
//!
//! A personal portfolio presented as a retro terminal. Visitors type commands to
//! read about the owner, open project links, play a number-guessing game and a
//! small text adventure, or attempt coding challenges graded by an isolated
//! `rustc` runner.
//!
//! The library holds the command interpreter: a single [`dispatch::Dispatcher`]
//! per session routes every submitted line to the active [`dispatch::SessionMode`].
//! Rendering, key capture and opening external links live in the binary.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use termfolio::challenge::{ChallengeRegistry, RustcValidator};
//! use termfolio::content::Profile;
//! use termfolio::dispatch::Dispatcher;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = Arc::new(ChallengeRegistry::builtin()?);
//!     let profile = Arc::new(Profile::builtin()?);
//!     let mut session = Dispatcher::new(profile, registry, Box::new(RustcValidator::default()));
//!     for line in session.submit("help").lines {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adventure;
pub mod challenge;
pub mod command;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod guess;
pub mod logutil;
