//! Keeps logged user input (commands, submitted code) on a single line.

use std::fmt::Write;

const MAX_PREVIEW: usize = 200;

/// One-line preview of user text for a log record.
///
/// Each source line is trimmed and blank lines are dropped, so indentation does
/// not eat the preview. Lines are joined with a literal `\n`, remaining control
/// characters are escaped, and the result is capped at `MAX_PREVIEW` characters.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    let mut written = 0;
    let lines = s.lines().map(str::trim).filter(|line| !line.is_empty());
    for (n, line) in lines.enumerate() {
        if n > 0 {
            out.push_str("\\n");
            written += 1;
        }
        for ch in line.chars() {
            if written >= MAX_PREVIEW {
                out.push('…');
                return out;
            }
            match ch {
                '\\' => out.push_str("\\\\"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push(' '),
                c if c.is_control() => {
                    let _ = write!(&mut out, "\\x{:02X}", c as u32);
                }
                c => out.push(c),
            }
            written += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn indentation_and_blank_lines_collapse() {
        let code = "fn a() {\n    let x = 1;\n\n\tx\n}\n";
        assert_eq!(escape_log(code), "fn a() {\\nlet x = 1;\\nx\\n}");
    }

    #[test]
    fn inner_control_characters_are_escaped() {
        assert_eq!(escape_log("a\tb\u{7}c\\"), "a b\\x07c\\\\");
    }

    #[test]
    fn truncates_long_input() {
        let long = "x".repeat(500);
        let esc = escape_log(&long);
        assert!(esc.ends_with('…'));
        assert_eq!(esc.chars().count(), 201);
    }
}
