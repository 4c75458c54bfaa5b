//! Number-guessing game started with `play game`.

use std::num::IntErrorKind;

use rand::Rng;

pub const MIN_SECRET: u32 = 1;
pub const MAX_SECRET: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessState {
    pub secret: u32,
    pub attempts: u32,
    pub won: bool,
}

/// Result of comparing one guess with the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    TooLow,
    TooHigh,
    Correct { secret: u32, attempts: u32 },
}

impl GuessState {
    /// Draw a fresh secret uniformly from 1..=100.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_secret(rng.gen_range(MIN_SECRET..=MAX_SECRET))
    }

    pub fn with_secret(secret: u32) -> Self {
        GuessState {
            secret,
            attempts: 0,
            won: false,
        }
    }

    pub fn guess(&mut self, value: i64) -> Feedback {
        self.attempts += 1;
        let secret = i64::from(self.secret);
        if value < secret {
            Feedback::TooLow
        } else if value > secret {
            Feedback::TooHigh
        } else {
            self.won = true;
            Feedback::Correct {
                secret: self.secret,
                attempts: self.attempts,
            }
        }
    }
}

impl Feedback {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Feedback::TooLow => vec!["Too low! Try again.".to_string()],
            Feedback::TooHigh => vec!["Too high! Try again.".to_string()],
            Feedback::Correct { secret, attempts } => vec![
                format!(
                    "Congratulations! You guessed the number {} in {} {}!",
                    secret,
                    attempts,
                    if *attempts == 1 { "attempt" } else { "attempts" }
                ),
                "Game over. Type 'play game' to play again.".to_string(),
            ],
        }
    }
}

/// A complete base-10 integer, optionally signed. Values beyond `i64` saturate,
/// so they still compare as too high or too low.
pub fn parse_guess(text: &str) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
