//! Hands URLs and documents to the desktop's default handler.

use std::io;
use std::process::{Command, Stdio};
use std::thread;

fn opener() -> Command {
    if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    }
}

pub fn open(target: &str) -> io::Result<()> {
    let mut child = opener()
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    log::info!("opening {}", target);
    // Reap in the background; the handler may outlive this call.
    thread::spawn(move || child.wait());
    Ok(())
}
