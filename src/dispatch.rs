//! The session state machine.
//!
//! Exactly one [`SessionMode`] is active at a time. Each submitted line goes to
//! the handler for that mode, which returns the next mode plus a [`Reply`]. The
//! portfolio commands (help, about, theme, ...) are only reachable from
//! [`SessionMode::Normal`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use strum::{Display, EnumString, IntoStaticStr};

use crate::adventure::{self, AdventureState};
use crate::challenge::{Challenge, ChallengeRegistry, Validator, Verdict};
use crate::command::Command;
use crate::content::{self, to_lines, Profile};
use crate::guess::{parse_guess, Feedback, GuessState};
use crate::logutil::escape_log;

/// A single key press, as far as Konami capture cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Other(String),
}

pub const KONAMI_CODE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

impl FromStr for Key {
    type Err = std::convert::Infallible;

    /// `Up`/`ArrowUp` and friends, a single character, or anything else verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "Up" | "ArrowUp" => Key::Up,
            "Down" | "ArrowDown" => Key::Down,
            "Left" | "ArrowLeft" => Key::Left,
            "Right" | "ArrowRight" => Key::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeName {
    Dark,
    Light,
}

/// Something the presentation layer must do; the core never does it itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClearTranscript,
    OpenUrl(String),
    OpenDocument(String),
    SetTheme(ThemeName),
    /// Reopen the code editor, pre-filled with the previous submission.
    EditCode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Code(String),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) | Output::Code(text) => f.write_str(text),
        }
    }
}

/// Lines to append to the transcript, then effects to perform, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<Output>,
    pub effects: Vec<Effect>,
}

impl Reply {
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Reply {
            lines: lines.into_iter().map(|l| Output::Text(l.into())).collect(),
            effects: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(Output::Text(line.into()));
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Plain text of every line, code included.
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.effects.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ChallengeState {
    pub challenge: Arc<Challenge>,
    /// Replaced wholesale on every edit.
    pub user_code: String,
    /// The editor is open and owns input until code (or nothing) is entered.
    pub editing: bool,
}

#[derive(Debug, Clone, Default, IntoStaticStr)]
pub enum SessionMode {
    #[default]
    Normal,
    Adventure(AdventureState),
    Guessing(GuessState),
    Challenge(ChallengeState),
    KonamiCapture(Vec<Key>),
}

impl SessionMode {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, SessionMode::Normal)
    }
}

const NOT_RECOGNIZED: &str = "Command not recognized. Type \"help\" for available commands.";
const CHALLENGE_VERBS: &str =
    "Type 'submit' to submit your code, 'edit' to modify your code, or 'quit' to exit the challenge.";

/// One visitor's terminal session.
pub struct Dispatcher {
    mode: SessionMode,
    profile: Arc<Profile>,
    registry: Arc<ChallengeRegistry>,
    validator: Box<dyn Validator>,
    rng: StdRng,
}

impl Dispatcher {
    pub fn new(
        profile: Arc<Profile>,
        registry: Arc<ChallengeRegistry>,
        validator: Box<dyn Validator>,
    ) -> Self {
        Dispatcher {
            mode: SessionMode::Normal,
            profile,
            registry,
            validator,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic secrets and quotes.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Resume from a known mode.
    pub fn with_mode(mut self, mode: SessionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn welcome(&self) -> Reply {
        Reply::text(self.profile.welcome())
    }

    pub fn prompt(&self) -> &'static str {
        match self.mode {
            SessionMode::Challenge(_) => "Challenge>",
            SessionMode::KonamiCapture(_) => "Konami>",
            _ => ">",
        }
    }

    /// True while the challenge editor is open.
    pub fn awaiting_code(&self) -> bool {
        matches!(&self.mode, SessionMode::Challenge(state) if state.editing)
    }

    /// True while raw keys, not lines, are expected.
    pub fn capturing_keys(&self) -> bool {
        matches!(self.mode, SessionMode::KonamiCapture(_))
    }

    /// Handle one submitted line. Blank input is ignored in every mode.
    pub fn submit(&mut self, raw: &str) -> Reply {
        let Some(cmd) = Command::parse(raw) else {
            return Reply::default();
        };
        let mode = std::mem::take(&mut self.mode);
        let before = mode.name();
        let (next, reply) = match mode {
            SessionMode::KonamiCapture(keys) => (
                SessionMode::KonamiCapture(keys),
                Reply::text(["Please finish entering the Konami code.", ""]),
            ),
            SessionMode::Challenge(state) => self.challenge_command(state, &cmd),
            SessionMode::Adventure(state) => self.adventure_command(state, raw, &cmd),
            SessionMode::Guessing(state) => self.guess_command(state, &cmd),
            SessionMode::Normal => self.normal_command(&cmd),
        };
        self.transition(before, next);
        reply
    }

    /// Handle one raw key press. Only Konami capture consumes keys.
    pub fn press_key(&mut self, key: Key) -> Reply {
        let SessionMode::KonamiCapture(keys) = &mut self.mode else {
            return Reply::default();
        };
        keys.push(key);
        if keys.len() < KONAMI_CODE.len() {
            return Reply::default();
        }
        let matched = keys.as_slice() == KONAMI_CODE.as_slice();
        debug!(
            "konami attempt {}: {}",
            if matched { "matched" } else { "failed" },
            keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
        );
        self.transition("KonamiCapture", SessionMode::Normal);
        if matched {
            Reply::text(to_lines(content::KONAMI_SUCCESS))
        } else {
            Reply::text(["Incorrect sequence. Konami code entry failed.", ""])
        }
    }

    /// Store code typed into the challenge editor, replacing any previous code.
    /// Closing the editor empty hands input back to the challenge prompt.
    pub fn enter_code(&mut self, code: &str) -> Reply {
        let SessionMode::Challenge(state) = &mut self.mode else {
            return Reply::default();
        };
        state.editing = false;
        if code.trim().is_empty() {
            return Reply::text(["No code entered. Use 'edit' to enter your code."]);
        }
        state.user_code = code.to_string();
        let mut reply = Reply::default();
        reply.lines.push(Output::Code(code.to_string()));
        reply.push("Type 'submit' to submit the challenge, 'edit' to modify your code, or 'quit' to exit.");
        reply
    }

    fn transition(&mut self, before: &'static str, next: SessionMode) {
        if before != next.name() {
            debug!("mode {} -> {}", before, next.name());
        }
        self.mode = next;
    }

    fn normal_command(&mut self, cmd: &Command) -> (SessionMode, Reply) {
        let arg = cmd.argument.as_str();
        let reply = match cmd.verb.as_str() {
            "help" | "h" => Reply::text(to_lines(content::HELP)),
            "about" | "a" => Reply::text(self.profile.about_lines()),
            "projects" | "p" => Reply::text(self.profile.project_lines()),
            "skills" | "s" => Reply::text(self.profile.skills_lines()),
            "contact" | "c" => Reply::text(self.profile.contact_lines()),
            "resume" | "r" => Reply::text(["Opening resume...", ""])
                .with_effect(Effect::OpenDocument(self.profile.resume.clone())),
            "github" | "g" => Reply::text(["Redirecting to GitHub...", ""])
                .with_effect(Effect::OpenUrl(self.profile.github.clone())),
            "launch" => self.launch(arg),
            "clear" | "clr" => Reply::default().with_effect(Effect::ClearTranscript),
            "easter" if arg.eq_ignore_ascii_case("egg") => Reply::text(to_lines(content::EASTER_EGG)),
            "play" if arg.eq_ignore_ascii_case("game") => {
                let state = GuessState::new(&mut self.rng);
                return (SessionMode::Guessing(state), Reply::text(to_lines(content::GUESS_INTRO)));
            }
            "play" if arg.eq_ignore_ascii_case("adventure") => {
                let state = AdventureState::new();
                let reply = Reply::text([
                    "Starting Coder's Quest...",
                    adventure::room(state.current).description,
                    "",
                ]);
                return (SessionMode::Adventure(state), reply);
            }
            "list" | "l" => {
                let mut reply = Reply::text(["Available challenges:"]);
                for line in self.registry.listing() {
                    reply.push(line);
                }
                reply.push("");
                reply
            }
            "challenge" => return self.start_challenge(arg),
            "konami" => {
                return (
                    SessionMode::KonamiCapture(Vec::new()),
                    Reply::text(to_lines(content::KONAMI_PROMPT)),
                );
            }
            "theme" => match arg.parse::<ThemeName>() {
                Ok(theme) => Reply::text([format!("Theme changed to {}.", theme), String::new()])
                    .with_effect(Effect::SetTheme(theme)),
                Err(_) => Reply::text(["Unknown theme. Use 'dark' or 'light'.", ""]),
            },
            "quote" => Reply::text([content::random_quote(&mut self.rng), ""]),
            _ => Reply::text([NOT_RECOGNIZED, ""]),
        };
        (SessionMode::Normal, reply)
    }

    fn launch(&self, arg: &str) -> Reply {
        let project = arg
            .parse::<usize>()
            .ok()
            .and_then(|n| self.profile.project(n).map(|p| (n, p)));
        match project {
            Some((n, p)) => Reply::text([format!("Launching project {} in a new tab...", n), String::new()])
                .with_effect(Effect::OpenUrl(p.url.clone())),
            None => Reply::text(["Invalid project number. Please try again.", ""]),
        }
    }

    fn start_challenge(&self, arg: &str) -> (SessionMode, Reply) {
        let Ok(number) = arg.parse::<usize>() else {
            return (
                SessionMode::Normal,
                Reply::text([
                    "Please specify a challenge number. Type 'list challenges' to see available challenges.",
                ]),
            );
        };
        let Some(challenge) = self.registry.get(number) else {
            return (
                SessionMode::Normal,
                Reply::text([format!("Challenge number {} not found.", number)]),
            );
        };

        let mut reply = Reply::text([
            format!("Starting challenge: {}", challenge.name),
            format!("Language: {}", challenge.language),
            challenge.description.clone(),
        ]);
        if let Some(signature) = &challenge.signature {
            reply.push(format!("Signature: {}", signature));
        }
        reply.push("Type your code in the editor below.");
        reply.push("After entering it, type 'submit' to submit the challenge, 'edit' to modify your code, or 'quit' to exit.");
        info!("challenge {} started", challenge.name);
        let state = ChallengeState {
            challenge,
            user_code: String::new(),
            editing: true,
        };
        (SessionMode::Challenge(state), reply)
    }

    fn challenge_command(&mut self, mut state: ChallengeState, cmd: &Command) -> (SessionMode, Reply) {
        if cmd.is_bare("submit") {
            if state.user_code.trim().is_empty() {
                let reply = Reply::text(["No code to submit. Use 'edit' to enter your code."]);
                return (SessionMode::Challenge(state), reply);
            }
            let verdict = self.grade(&state);
            let reply = Reply::text(["Submitting challenge...".to_string(), verdict.message]);
            if verdict.success {
                (SessionMode::Normal, reply)
            } else {
                (SessionMode::Challenge(state), reply)
            }
        } else if cmd.is_bare("quit") {
            (
                SessionMode::Normal,
                Reply::text(["Challenge aborted. Returning to main terminal."]),
            )
        } else if cmd.is_bare("edit") {
            let previous = std::mem::take(&mut state.user_code);
            state.editing = true;
            (
                SessionMode::Challenge(state),
                Reply::default().with_effect(Effect::EditCode(previous)),
            )
        } else {
            let reply = Reply::text([format!("Unrecognized command: {}. {}", cmd.line(), CHALLENGE_VERBS)]);
            (SessionMode::Challenge(state), reply)
        }
    }

    /// Grader failures become a failed verdict so the session never gets stuck.
    fn grade(&self, state: &ChallengeState) -> Verdict {
        let name = &state.challenge.name;
        info!("grading {}: {}", name, escape_log(&state.user_code));
        match self.validator.validate(&state.challenge, &state.user_code) {
            Ok(verdict) => {
                info!("{} graded: success={}", name, verdict.success);
                verdict
            }
            Err(e) => {
                warn!("grader failed for {}: {}", name, e);
                Verdict::fail(format!("validation failed: {}", e))
            }
        }
    }

    fn adventure_command(&mut self, state: AdventureState, raw: &str, cmd: &Command) -> (SessionMode, Reply) {
        if cmd.is("adventure", "exit") {
            return (
                SessionMode::Normal,
                Reply::text(["Exiting Coder's Quest. Thanks for playing!", ""]),
            );
        }
        if cmd.is("adventure", "help") {
            return (
                SessionMode::Adventure(state),
                Reply::text(to_lines(content::ADVENTURE_HELP)),
            );
        }

        let (state, message) = adventure::advance(state, raw);
        let mut reply = Reply::text([message, String::new()]);
        if state.is_finished() {
            reply.push("Congratulations! You've completed Coder's Quest!");
            reply.push("");
            return (SessionMode::Normal, reply);
        }
        (SessionMode::Adventure(state), reply)
    }

    fn guess_command(&mut self, mut state: GuessState, cmd: &Command) -> (SessionMode, Reply) {
        if cmd.is_bare("quit") {
            return (
                SessionMode::Normal,
                Reply::text(["Game ended. Thanks for playing!", ""]),
            );
        }
        let Some(value) = parse_guess(&cmd.line()) else {
            return (
                SessionMode::Guessing(state),
                Reply::text(["Please enter a valid number or 'quit'.", ""]),
            );
        };

        let feedback = state.guess(value);
        let mut reply = Reply::text(feedback.lines());
        reply.push("");
        match feedback {
            Feedback::Correct { .. } => (SessionMode::Normal, reply),
            Feedback::TooLow | Feedback::TooHigh => (SessionMode::Guessing(state), reply),
        }
    }
}
