//! Battle resolution.
//!
//! Decides the outcome of a single slot-to-slot confrontation using the
//! static type-advantage table.

pub mod battle;

pub use battle::{attacker_has_advantage, effective_strength, resolve, RoundOutcome};
