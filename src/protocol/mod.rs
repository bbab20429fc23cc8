//! PBI protocol handling.
//!
//! This module implements the roster text encoding, the command parser for
//! the main loop, and the rendering of battle reports as text or JSON.

pub mod parser;
pub mod report;
pub mod roster;

pub use parser::{parse_command, Command};
pub use report::{OutputFormat, Report, RoundReport};
pub use roster::{
    parse_roster, parse_roster_with, FormatReason, RosterError, UnknownTypePolicy,
};
