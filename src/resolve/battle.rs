//! Single-round battle resolution.
//!
//! An attacker whose type counters the defender's type fights at double
//! strength. There is no defender bonus and no randomness.

use std::fmt;

use crate::army::advantage::has_advantage;
use crate::army::unit::UnitGroup;

/// The outcome of one round, from the attacker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    Win,
    Draw,
    Loss,
}

impl RoundOutcome {
    pub const fn name(self) -> &'static str {
        match self {
            RoundOutcome::Win => "Win",
            RoundOutcome::Draw => "Draw",
            RoundOutcome::Loss => "Loss",
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if the attacker's type counters the defender's type.
/// Unrecognized classes never match.
pub fn attacker_has_advantage(attacker: &UnitGroup, defender: &UnitGroup) -> bool {
    match (attacker.unit_type(), defender.unit_type()) {
        (Some(a), Some(d)) => has_advantage(a, d),
        _ => false,
    }
}

/// Returns the attacker's strength for this matchup, doubled when it has the
/// advantage. Widened so that doubling cannot overflow.
pub fn effective_strength(attacker: &UnitGroup, defender: &UnitGroup) -> u128 {
    let raw = u128::from(attacker.strength);
    if attacker_has_advantage(attacker, defender) {
        raw * 2
    } else {
        raw
    }
}

/// Resolves one round between an attacking and a defending group.
pub fn resolve(attacker: &UnitGroup, defender: &UnitGroup) -> RoundOutcome {
    let effective = effective_strength(attacker, defender);
    let defending = u128::from(defender.strength);
    match effective.cmp(&defending) {
        std::cmp::Ordering::Greater => RoundOutcome::Win,
        std::cmp::Ordering::Equal => RoundOutcome::Draw,
        std::cmp::Ordering::Less => RoundOutcome::Loss,
    }
}
