//! Tokenizing submitted lines and matching free-form names against candidates.

/// One submitted line split into a lower-cased verb and its argument.
///
/// Leading, trailing and repeated whitespace is collapsed, so `"  GO   north "`
/// parses the same as `"go north"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub argument: String,
}

impl Command {
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Command> {
        let mut words = raw.split_whitespace();
        let verb = words.next()?.to_lowercase();
        let argument = words.collect::<Vec<_>>().join(" ");
        Some(Command { verb, argument })
    }

    /// Case-insensitive whole-line comparison, e.g. `cmd.is("adventure", "exit")`.
    pub fn is(&self, verb: &str, argument: &str) -> bool {
        self.verb == verb && self.argument.eq_ignore_ascii_case(argument)
    }

    /// True when the line is exactly `verb` with no argument.
    pub fn is_bare(&self, verb: &str) -> bool {
        self.is(verb, "")
    }

    /// The normalized line: verb and argument joined by a single space.
    pub fn line(&self) -> String {
        if self.argument.is_empty() {
            self.verb.clone()
        } else {
            format!("{} {}", self.verb, self.argument)
        }
    }
}

/// First candidate (in the given order) that starts with `query`, ignoring case.
/// An empty query matches nothing.
pub fn first_prefix_match<'a, I>(candidates: I, query: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if query.is_empty() {
        return None;
    }
    let query = query.to_lowercase();
    candidates
        .into_iter()
        .find(|candidate| candidate.to_lowercase().starts_with(&query))
}

/// First candidate (in the given order) that contains `query`, ignoring case.
/// An empty query matches the first candidate.
pub fn first_substring_match<'a, I>(candidates: I, query: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.to_lowercase();
    candidates
        .into_iter()
        .find(|candidate| candidate.to_lowercase().contains(&query))
}
