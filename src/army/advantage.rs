//! Static type-advantage table.
//!
//! The relation is directed: `counters(a)` containing `b` says nothing about
//! whether `b` counters `a`. The lookup matrix is built at compile time from
//! the per-type counter lists.

use super::unit::{UnitType, ALL_UNIT_TYPES, UNIT_TYPE_COUNT};

/// Returns the unit types that `attacker` counters.
pub const fn counters(attacker: UnitType) -> &'static [UnitType] {
    use UnitType::*;
    match attacker {
        Militia => &[Spearmen, LightCavalry],
        Spearmen => &[LightCavalry, HeavyCavalry],
        FootArcher => &[Militia, CavalryArcher],
        LightCavalry => &[FootArcher, CavalryArcher],
        HeavyCavalry => &[Militia, FootArcher, LightCavalry],
        CavalryArcher => &[Spearmen, HeavyCavalry],
    }
}

const fn build_matrix() -> [[bool; UNIT_TYPE_COUNT]; UNIT_TYPE_COUNT] {
    let mut matrix = [[false; UNIT_TYPE_COUNT]; UNIT_TYPE_COUNT];
    let mut a = 0;
    while a < UNIT_TYPE_COUNT {
        let list = counters(ALL_UNIT_TYPES[a]);
        let mut j = 0;
        while j < list.len() {
            matrix[a][list[j] as usize] = true;
            j += 1;
        }
        a += 1;
    }
    matrix
}

/// `ADVANTAGE[a][d]` is true when unit type `a` counters unit type `d`.
pub static ADVANTAGE: [[bool; UNIT_TYPE_COUNT]; UNIT_TYPE_COUNT] = build_matrix();

/// Returns true if `attacker` counters `defender`.
#[inline]
pub fn has_advantage(attacker: UnitType, defender: UnitType) -> bool {
    ADVANTAGE[attacker as usize][defender as usize]
}
