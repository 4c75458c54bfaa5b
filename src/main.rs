//! `termfolio` binary: full-screen terminal UI, or a plain line REPL with `--plain`
//! (also chosen automatically when stdout is not a terminal).

mod frontend;

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use termfolio::challenge::ChallengeRegistry;
use termfolio::config::{Config, LoggingConfig};
use termfolio::content::Profile;
use termfolio::dispatch::Dispatcher;

#[derive(Parser)]
#[command(name = "termfolio")]
#[command(about = "A portfolio you explore from a retro terminal")]
#[command(version)]
struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "termfolio.toml")]
    config: PathBuf,

    /// Directory of extra challenge definitions (*.toml)
    #[arg(long)]
    challenges: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Line-oriented mode without the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Skip the boot animation
    #[arg(long)]
    no_boot: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let plain = cli.plain || !std::io::stdout().is_terminal();
    init_logging(&config.logging, cli.log_file.as_deref(), cli.verbose, plain)?;
    info!("termfolio v{} starting", env!("CARGO_PKG_VERSION"));

    let profile = match &config.profile.path {
        Some(path) => Profile::load(path)?,
        None => Profile::builtin()?,
    };
    let registry = match cli.challenges.as_ref().or(config.challenges.dir.as_ref()) {
        Some(dir) => ChallengeRegistry::with_dir(dir)?,
        None => ChallengeRegistry::builtin()?,
    };
    info!("{} challenges registered", registry.len());

    let session = Dispatcher::new(
        Arc::new(profile),
        Arc::new(registry),
        Box::new(config.validator.build()),
    );

    if plain {
        frontend::plain::run(session)
    } else {
        frontend::tui::run(session, !cli.no_boot)
    }
}

/// The full-screen UI owns the terminal, so logs go to a file. In plain mode
/// `-v` without a file logs to stderr.
fn init_logging(config: &LoggingConfig, log_file: Option<&Path>, verbosity: u8, plain: bool) -> Result<()> {
    let level = match verbosity {
        0 => config.level.parse().unwrap_or(LevelFilter::Info),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}: {}",
            fmt.timestamp_seconds(),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match log_file.or(config.file.as_deref()) {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if plain && verbosity > 0 => {
            builder.target(env_logger::Target::Stderr);
        }
        None => return Ok(()),
    }
    builder.init();
    Ok(())
}
