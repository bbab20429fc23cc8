//! Platoon engine library.
//!
//! Exposes the army representation, the battle resolver, the arrangement
//! search, and the protocol modules for use by integration tests and the
//! binary entry points.

pub mod army;
pub mod batch;
pub mod engine;
pub mod protocol;
pub mod resolve;
pub mod search;

pub use army::{Roster, UnitGroup, UnitType};
pub use protocol::roster::{parse_roster, RosterError};
pub use resolve::{resolve, RoundOutcome};
pub use search::{find_winning_arrangement, ArrangementResult};

/// Searches for a winning arrangement of `own` against `enemy`.
///
/// Same as [`find_winning_arrangement`]; `None` means no ordering of the own
/// roster wins three rounds.
pub fn simulate_battle(own: &Roster, enemy: &Roster) -> Option<ArrangementResult> {
    find_winning_arrangement(own, enemy)
}
