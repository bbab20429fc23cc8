//! Army representation.
//!
//! Contains the unit types, unit groups, five-slot rosters, and the static
//! type-advantage table.

pub mod advantage;
pub mod roster;
pub mod unit;

pub use advantage::{counters, has_advantage, ADVANTAGE};
pub use roster::{Roster, RosterSizeError, Side, ROSTER_SIZE};
pub use unit::{UnitClass, UnitGroup, UnitType, ALL_UNIT_TYPES, UNIT_TYPE_COUNT};
