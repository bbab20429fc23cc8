//! PBI command parser.
//!
//! Parses incoming PBI (Platoon Battle Interface) commands from raw text into
//! structured `Command` variants that the main loop can dispatch on.

use tracing::warn;

use crate::army::roster::Side;

/// A parsed caller-to-engine PBI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the PBI handshake.
    Pbi,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Forget both rosters.
    NewBattle,

    /// Set one side's roster from its text encoding.
    Roster { side: Side, text: String },

    /// Search for a winning arrangement of the current rosters.
    Go,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "pbi" => Some(Command::Pbi),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newbattle" => Some(Command::NewBattle),
        "go" => Some(Command::Go),

        "setoption" => {
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            parse_setoption(&tokens)
        }
        "own" => parse_roster_command(Side::Own, rest),
        "enemy" => parse_roster_command(Side::Enemy, rest),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `own <roster>` / `enemy <roster>`. The roster text is kept verbatim
/// so that it can contain spaces around type names.
fn parse_roster_command(side: Side, rest: &str) -> Option<Command> {
    if rest.is_empty() {
        warn!(side = side.name(), "malformed roster command: expected '<side> <roster>'");
        return None;
    }
    Some(Command::Roster {
        side,
        text: rest.to_string(),
    })
}
