//! Engine state management.
//!
//! Holds the pending own and enemy rosters and the engine options between
//! commands, and runs the arrangement search for the `go` command.

use std::collections::HashMap;
use std::io::{self, Write};

use tracing::{debug, warn};

use crate::army::roster::{Roster, Side};
use crate::protocol::report::{OutputFormat, Report};
use crate::protocol::roster::{parse_roster_with, RosterError, UnknownTypePolicy};
use crate::search::search;

/// Option controlling how unknown unit type names are parsed.
pub const OPTION_UNKNOWN_TYPES: &str = "UnknownTypes";

/// Option controlling the report format.
pub const OPTION_FORMAT: &str = "Format";

/// Holds the mutable state of the engine between commands.
#[derive(Debug, Default)]
pub struct Engine {
    pub own: Option<Roster>,
    pub enemy: Option<Roster>,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates a new engine with no rosters and default options.
    pub fn new() -> Self {
        Engine::default()
    }

    /// Forgets both rosters. Options are kept.
    pub fn new_battle(&mut self) {
        self.own = None;
        self.enemy = None;
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        let known = match name.as_str() {
            OPTION_UNKNOWN_TYPES => UnknownTypePolicy::from_name(&value).is_some(),
            OPTION_FORMAT => OutputFormat::from_name(&value).is_some(),
            _ => {
                warn!(option = %name, "unknown option");
                true
            }
        };
        if !known {
            warn!(option = %name, value = %value, "invalid option value, default applies");
        }
        self.options.insert(name, value);
    }

    /// Returns the configured unknown-type policy, or the default.
    pub fn unknown_types(&self) -> UnknownTypePolicy {
        self.options
            .get(OPTION_UNKNOWN_TYPES)
            .and_then(|v| UnknownTypePolicy::from_name(v))
            .unwrap_or_default()
    }

    /// Returns the configured report format, or the default.
    pub fn format(&self) -> OutputFormat {
        self.options
            .get(OPTION_FORMAT)
            .and_then(|v| OutputFormat::from_name(v))
            .unwrap_or_default()
    }

    fn slot(&mut self, side: Side) -> &mut Option<Roster> {
        match side {
            Side::Own => &mut self.own,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Parses and stores one side's roster. On failure that side is cleared,
    /// so a stale roster is never searched.
    pub fn set_roster(&mut self, side: Side, text: &str) -> Result<(), RosterError> {
        let policy = self.unknown_types();
        let parsed = parse_roster_with(text, policy);
        let slot = self.slot(side);
        match parsed {
            Ok(roster) => {
                debug!(side = side.name(), roster = %roster, "roster set");
                *slot = Some(roster);
                Ok(())
            }
            Err(e) => {
                *slot = None;
                Err(e)
            }
        }
    }

    /// Handles a roster command, reporting a rejected roster to the caller.
    pub fn handle_roster<W: Write>(&mut self, side: Side, text: &str, out: &mut W) -> io::Result<()> {
        match self.set_roster(side, text) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(side = side.name(), error = %e, "roster rejected");
                Report::invalid(side, e).write(self.format(), out)
            }
        }
    }

    /// Handles the PBI handshake: writes id, options, protocol_version, and pbiok.
    pub fn handle_pbi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name platoon")?;
        writeln!(out, "id author platoon")?;
        writeln!(
            out,
            "option name {} type combo default reject var reject var neutral",
            OPTION_UNKNOWN_TYPES
        )?;
        writeln!(
            out,
            "option name {} type combo default text var text var json",
            OPTION_FORMAT
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "pbiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Builds the report for the `go` command without writing it.
    pub fn go(&self) -> Report {
        let (own, enemy) = match (&self.own, &self.enemy) {
            (Some(own), Some(enemy)) => (own, enemy),
            (None, _) => return Report::invalid(Side::Own, "no roster set"),
            (_, None) => return Report::invalid(Side::Enemy, "no roster set"),
        };
        let outcome = search(own, enemy);
        debug!(
            candidates = outcome.stats.candidates,
            resolutions = outcome.stats.resolutions,
            found = outcome.result.is_some(),
            "search finished"
        );
        Report::from_outcome(&outcome)
    }

    /// Handles the `go` command.
    pub fn handle_go<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.go().write(self.format(), out)
    }
}
