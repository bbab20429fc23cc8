//! Platoon -- a 5-vs-5 battle arrangement engine speaking the PBI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to see them.

use std::io::{self, BufRead};

use tracing_subscriber::EnvFilter;

use platoon::engine::Engine;
use platoon::protocol::parser::{parse_command, Command};

/// Runs the main PBI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Pbi => engine.handle_pbi(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewBattle => engine.new_battle(),
            Command::Roster { side, text } => engine.handle_roster(side, &text, &mut out)?,
            Command::Go => engine.handle_go(&mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
