//! Everything the terminal prints that is not computed: the owner's profile,
//! help pages, easter eggs and quotes.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::ProfileError;

const BUILTIN_PROFILE: &str = include_str!("../content/profile.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub summary: String,
    pub technologies: String,
    pub url: String,
}

/// The portfolio owner's details.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub owner: String,
    #[serde(default)]
    pub banner: String,
    pub github: String,
    /// Handle passed to the document opener for `resume`.
    pub resume: String,
    pub about: Vec<String>,
    pub skills: Vec<String>,
    pub contact: Vec<String>,
    pub projects: Vec<Project>,
}

impl Profile {
    pub fn builtin() -> Result<Self, ProfileError> {
        Self::parse(BUILTIN_PROFILE)
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ProfileError> {
        let profile: Profile = toml::from_str(content)?;
        if let Some(p) = profile.projects.iter().find(|p| p.url.trim().is_empty()) {
            return Err(ProfileError::Invalid(format!("project '{}' has no url", p.name)));
        }
        Ok(profile)
    }

    /// 1-based, as typed after `launch`.
    pub fn project(&self, number: usize) -> Option<&Project> {
        number.checked_sub(1).and_then(|i| self.projects.get(i))
    }

    pub fn welcome(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.banner.lines().map(str::to_string).collect();
        lines.push(String::new());
        let possessive = if self.owner.ends_with('s') { "'" } else { "'s" };
        lines.push(format!("Welcome to {}{} Portfolio Terminal.", self.owner, possessive));
        lines.push("Type 'help' to see available commands.".to_string());
        lines.push(String::new());
        lines
    }

    pub fn about_lines(&self) -> Vec<String> {
        with_blank(self.about.clone())
    }

    pub fn skills_lines(&self) -> Vec<String> {
        let mut lines = vec!["My Skills:".to_string()];
        lines.extend(self.skills.iter().cloned());
        with_blank(lines)
    }

    pub fn contact_lines(&self) -> Vec<String> {
        let mut lines = vec!["Contact Information:".to_string()];
        lines.extend(self.contact.iter().cloned());
        with_blank(lines)
    }

    pub fn project_lines(&self) -> Vec<String> {
        let mut lines = vec!["My Projects:".to_string()];
        for (i, p) in self.projects.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, p.name));
            lines.push(format!("   {}", p.summary));
            lines.push(format!("   Technologies: {}", p.technologies));
            lines.push(format!("   Link: {}", p.url));
            lines.push(String::new());
        }
        lines.push("To open a project, type \"launch <project number>\" (e.g., \"launch 1\")".to_string());
        with_blank(lines)
    }
}

fn with_blank(mut lines: Vec<String>) -> Vec<String> {
    lines.push(String::new());
    lines
}

pub fn to_lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|s| s.to_string()).collect()
}

pub const HELP: &[&str] = &[
    "Available commands:",
    "  about (a)   - Display information about me",
    "  projects (p) - Show my projects",
    "  skills (s)  - List my skills",
    "  contact (c) - Display contact information",
    "  resume (r)  - Open my resume in a new tab",
    "  github (g)  - Open my GitHub in a new tab",
    "  launch <project number> - Open a project in a new tab",
    "  clear (clr) - Clear the terminal",
    "  list (challenges/l) - List of coding challenges",
    "  challenge <challenge number> - Start a challenge",
    "  play game  - Start a number guessing game",
    "  konami     - Will not unlock 1999 mode",
    "  theme <dark/light> - Change terminal theme",
    "  quote      - Display a random programming quote",
    "  play adventure - Start the Coder's Quest adventure game",
    "    In the adventure, you can use commands like:",
    "    - adventure help",
    "    - adventure exit",
    "",
];

pub const ADVENTURE_HELP: &[&str] = &[
    "Coder's Quest Commands:",
    "  look [object]  - Examine your surroundings or a specific object",
    "  go [direction] - Move in a specified direction (north, south, east, west, up, down)",
    "  take [item]    - Pick up an item",
    "  use [item]     - Use an item in your inventory",
    "  inventory      - Check what items you're carrying",
    "  adventure exit - Exit the game",
    "",
];

pub const EASTER_EGG: &[&str] = &[
    "You found a secret!",
    "Here's a fun fact: The first computer bug was an actual bug.",
    "In 1947, Grace Hopper found a moth causing issues in the Harvard Mark II computer.",
    "This incident popularized the term 'debugging' in computer programming.",
    "",
];

pub const KONAMI_PROMPT: &[&str] = &[
    "Enter the Konami code:",
    "Use arrow keys for ↑↓←→, and 'b' and 'a' keys.",
    "",
];

pub const KONAMI_SUCCESS: &[&str] = &[
    "⬆️ ⬆️ ⬇️ ⬇️ ⬅️ ➡️ ⬅️ ➡️ 🅱️ 🅰️",
    "Congratulations! You've unlocked the Konami Code!",
    "Here's a virtual high five! ✋",
    "30 lives added! (Just kidding, this is a portfolio)",
    "",
];

pub const GUESS_INTRO: &[&str] = &[
    "Let's play a number guessing game!",
    "I'm thinking of a number between 1 and 100.",
    "Type a number to guess, or 'quit' to end the game.",
    "",
];

pub const QUOTES: [&str; 9] = [
    "The best way to predict the future is to invent it. - Alan Kay",
    "The most disastrous thing that you can ever learn is your first programming language. - Alan Kay",
    "The computer was born to solve problems that did not exist before. - Bill Gates",
    "The function of good software is to make the complex appear to be simple. - Grady Booch",
    "First, solve the problem. Then, write the code. - John Johnson",
    "Any fool can write code that a computer can understand. Good programmers write code that humans can understand. - Martin Fowler",
    "The most important property of a program is whether it accomplishes the intention of its user. - C.A.R. Hoare",
    "Programming isn't about what you know; it's about what you can figure out. - Chris Pine",
    "The only way to learn a new programming language is by writing programs in it. - Dennis Ritchie",
];

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builtin_profile_parses() {
        let profile = Profile::builtin().unwrap();
        assert_eq!(profile.projects.len(), 2);
        assert_eq!(profile.project(1).unwrap().url, "https://www.beaktobasics.com");
        assert!(profile.project(0).is_none());
        assert!(profile.project(3).is_none());
        assert!(profile.banner.lines().count() >= 5);
    }

    #[test]
    fn project_lines_are_numbered() {
        let profile = Profile::builtin().unwrap();
        let lines = profile.project_lines();
        assert_eq!(lines[0], "My Projects:");
        assert_eq!(lines[1], "1. ReactJS Bird App");
        assert!(lines.contains(&"2. Graffiti Wall Tagging Web App".to_string()));
        assert_eq!(lines.last().unwrap(), "");
    }

    #[test]
    fn project_without_url_is_rejected() {
        let text = BUILTIN_PROFILE.replace("url = \"https://tagmaster.netlify.app\"", "url = \"\"");
        assert!(matches!(Profile::parse(&text), Err(ProfileError::Invalid(_))));
    }

    #[test]
    fn quotes_come_from_the_list() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(QUOTES.contains(&random_quote(&mut rng)));
        }
    }
}
