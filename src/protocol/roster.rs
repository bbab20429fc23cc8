//! Roster text encoding.
//!
//! A roster is written as five `;`-separated segments, each a unit type name
//! and a non-negative headcount joined by `#`:
//!
//! `Spearmen#10;Militia#30;FootArcher#20;LightCavalry#1000;HeavyCavalry#120`
//!
//! Whitespace around the type name and the count is ignored; whitespace inside
//! a type name is rejected. Type names are case-sensitive.

use thiserror::Error;

use crate::army::roster::{Roster, RosterSizeError};
use crate::army::unit::{UnitGroup, UnitType};

/// Separator between unit-group segments.
pub const SEGMENT_SEPARATOR: char = ';';

/// Separator between the type name and the count inside a segment.
pub const COUNT_SEPARATOR: char = '#';

/// Errors that can occur when parsing a roster string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("segment {index} '{segment}': {reason}")]
    Format {
        index: usize,
        segment: String,
        reason: FormatReason,
    },

    #[error("expected 5 unit groups, got {found}")]
    Count { found: usize },

    #[error("segment {index}: unknown unit type '{name}'")]
    UnknownType { index: usize, name: String },
}

impl From<RosterSizeError> for RosterError {
    fn from(e: RosterSizeError) -> Self {
        RosterError::Count { found: e.found }
    }
}

/// Why a segment could not be split into a type and a count.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormatReason {
    #[error("missing '#' between type and count")]
    MissingSeparator,

    #[error("more than one '#'")]
    ExtraSeparator,

    #[error("empty unit type")]
    EmptyType,

    #[error("whitespace inside unit type")]
    WhitespaceInType,

    #[error("count is not a non-negative integer")]
    InvalidCount,
}

/// How to treat type names that are not in the advantage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTypePolicy {
    /// Fail the parse with `RosterError::UnknownType`.
    #[default]
    Reject,
    /// Keep the group as an unrecognized class with no advantages.
    Neutral,
}

impl UnknownTypePolicy {
    pub const fn name(self) -> &'static str {
        match self {
            UnknownTypePolicy::Reject => "reject",
            UnknownTypePolicy::Neutral => "neutral",
        }
    }

    pub fn from_name(name: &str) -> Option<UnknownTypePolicy> {
        match name {
            "reject" => Some(UnknownTypePolicy::Reject),
            "neutral" => Some(UnknownTypePolicy::Neutral),
            _ => None,
        }
    }
}

/// Parses a roster string, rejecting unknown unit types.
pub fn parse_roster(text: &str) -> Result<Roster, RosterError> {
    parse_roster_with(text, UnknownTypePolicy::Reject)
}

/// Parses a roster string with an explicit unknown-type policy.
///
/// Every segment is checked before the group count, so a malformed segment
/// is reported as `Format` even when the count is also wrong.
pub fn parse_roster_with(text: &str, policy: UnknownTypePolicy) -> Result<Roster, RosterError> {
    let groups = text
        .split(SEGMENT_SEPARATOR)
        .enumerate()
        .map(|(index, segment)| parse_group(index, segment, policy))
        .collect::<Result<Vec<_>, _>>()?;
    Roster::try_from(groups).map_err(RosterError::from)
}

/// Parses a single `type#count` segment.
fn parse_group(
    index: usize,
    segment: &str,
    policy: UnknownTypePolicy,
) -> Result<UnitGroup, RosterError> {
    let format_err = |reason| RosterError::Format {
        index,
        segment: segment.to_string(),
        reason,
    };

    let (name, count) = segment
        .split_once(COUNT_SEPARATOR)
        .ok_or_else(|| format_err(FormatReason::MissingSeparator))?;
    if count.contains(COUNT_SEPARATOR) {
        return Err(format_err(FormatReason::ExtraSeparator));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(format_err(FormatReason::EmptyType));
    }
    // Reports print groups as space-separated fields.
    if name.contains(char::is_whitespace) {
        return Err(format_err(FormatReason::WhitespaceInType));
    }

    let count = count.trim();
    // u64::from_str accepts a leading '+', which is not part of the encoding.
    if !count.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_err(FormatReason::InvalidCount));
    }
    let strength = count
        .parse::<u64>()
        .map_err(|_| format_err(FormatReason::InvalidCount))?;

    match UnitType::from_name(name) {
        Some(unit_type) => Ok(UnitGroup::new(unit_type, strength)),
        None => match policy {
            UnknownTypePolicy::Reject => Err(RosterError::UnknownType {
                index,
                name: name.to_string(),
            }),
            UnknownTypePolicy::Neutral => Ok(UnitGroup::unrecognized(name, strength)),
        },
    }
}
