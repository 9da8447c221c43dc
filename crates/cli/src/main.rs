//! Interactive shell for a gentable store
//!
//! ```text
//! $ gentable --pretty
//! gentable> set user.name "Ada"
//! OK
//! gentable> push user.tags admin
//! 1
//! gentable> show
//! {
//!   "user":{
//!     "name":"Ada",
//!     "tags":[
//!       "admin"
//!     ]
//!   }
//! }
//! ```

mod command;
mod config;
mod error;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use command::Command;
use config::ShellConfig;
use gentable_json::EscapeMode;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use session::{Output, Session};
use std::path::PathBuf;
use tracing::{info, Level};

const PROMPT: &str = "gentable> ";

#[derive(Debug, Parser)]
#[command(name = "gentable", version, about = "Interactive shell for a gentable store")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render output indented
    #[arg(short, long)]
    pretty: bool,

    /// Write strings without JSON escaping
    #[arg(long)]
    raw_strings: bool,

    /// Line history file (overrides the config file)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Run these commands instead of starting the prompt
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    exec: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = shell_config(&args)?;
    let mut session = Session::new(&config).context("failed to create store")?;

    if args.exec.is_empty() {
        repl(&mut session, config.history_file.as_deref())?;
    } else {
        for line in &args.exec {
            if !run_line(&mut session, line) {
                break;
            }
        }
    }

    info!(
        target: "gentable::shell",
        entries = session.store().len(),
        buckets = session.store().bucket_count(),
        "session ended"
    );
    Ok(())
}

/// Merge the config file with command-line overrides
fn shell_config(args: &Args) -> Result<ShellConfig> {
    let mut config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if args.pretty {
        config.pretty = true;
    }
    if args.raw_strings {
        config.escape = EscapeMode::Raw;
    }
    if let Some(history) = &args.history {
        config.history_file = Some(history.clone());
    }
    Ok(config)
}

fn repl(session: &mut Session, history: Option<&std::path::Path>) -> Result<()> {
    let mut editor = DefaultEditor::new().context("failed to initialise line editor")?;
    if let Some(path) = history {
        // A missing history file is normal on first run
        if let Err(err) = editor.load_history(path) {
            info!(target: "gentable::shell", path = %path.display(), error = %err, "no history loaded");
        }
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if !run_line(session, &line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read input"),
        }
    }

    if let Some(path) = history {
        editor
            .save_history(path)
            .with_context(|| format!("failed to save history to {}", path.display()))?;
    }
    Ok(())
}

/// Execute one line, printing its output. Returns false once the session
/// should end.
fn run_line(session: &mut Session, line: &str) -> bool {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return true,
        Err(err) => {
            println!("(error) {}", err);
            return true;
        }
    };

    match session.execute(command) {
        Ok(Output::Exit) => false,
        Ok(output) => {
            println!("{}", output);
            true
        }
        Err(err) => {
            println!("(error) {}", err);
            true
        }
    }
}
