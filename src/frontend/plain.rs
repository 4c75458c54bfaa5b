//! Line-oriented front end for pipes and dumb terminals.
//!
//! While the Konami code is being captured each input line is one key name
//! (`Up`, `Down`, `Left`, `Right`, or a single character). Challenge code is
//! read until a line holding only `.`.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use termfolio::dispatch::{Dispatcher, Effect, Key, Output, Reply};

use super::opener;

const END_OF_CODE: &str = ".";

pub fn run(mut session: Dispatcher) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    print_reply(&mut out, &session.welcome())?;

    loop {
        if session.awaiting_code() {
            writeln!(out, "(enter your code, finish with a line containing only '{}')", END_OF_CODE)?;
            let Some(code) = read_code(&mut input)? else { break };
            let reply = session.enter_code(&code);
            print_reply(&mut out, &reply)?;
            continue;
        }

        write!(out, "{} ", session.prompt())?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        let reply = if session.capturing_keys() {
            let key = match line.trim().parse::<Key>() {
                Ok(key) => key,
                Err(never) => match never {},
            };
            session.press_key(key)
        } else {
            session.submit(line)
        };
        print_reply(&mut out, &reply)?;
    }
    Ok(())
}

fn read_code(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut code = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == END_OF_CODE {
            return Ok(Some(code.join("\n")));
        }
        code.push(line.to_string());
    }
}

fn print_reply(out: &mut impl Write, reply: &Reply) -> Result<()> {
    for line in &reply.lines {
        match line {
            Output::Text(text) => writeln!(out, "{}", text)?,
            Output::Code(code) => {
                for code_line in code.lines() {
                    writeln!(out, "    {}", code_line)?;
                }
            }
        }
    }
    for effect in &reply.effects {
        match effect {
            Effect::ClearTranscript => writeln!(out, "\x1b[2J\x1b[H")?,
            Effect::OpenUrl(target) | Effect::OpenDocument(target) => {
                if let Err(e) = opener::open(target) {
                    log::warn!("could not open {}: {}", target, e);
                    writeln!(out, "Could not open {} ({})", target, e)?;
                }
            }
            Effect::SetTheme(_) => {}
            Effect::EditCode(previous) => {
                if !previous.is_empty() {
                    writeln!(out, "Previous code:")?;
                    for code_line in previous.lines() {
                        writeln!(out, "    {}", code_line)?;
                    }
                }
            }
        }
    }
    Ok(())
}
