//! Five-slot rosters.

use std::fmt;
use std::ops::Index;

use thiserror::Error;

use super::unit::UnitGroup;

/// The number of unit groups on each side.
pub const ROSTER_SIZE: usize = 5;

/// A roster was built from the wrong number of groups.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("expected 5 unit groups, got {found}")]
pub struct RosterSizeError {
    pub found: usize,
}

/// Which side of the battle a roster belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Own,
    Enemy,
}

impl Side {
    pub const fn name(self) -> &'static str {
        match self {
            Side::Own => "own",
            Side::Enemy => "enemy",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered roster of exactly five unit groups.
///
/// For the enemy side the slot order is fixed; for the own side it is the
/// thing the arrangement search permutes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Roster {
    groups: [UnitGroup; ROSTER_SIZE],
}

impl Roster {
    pub fn new(groups: [UnitGroup; ROSTER_SIZE]) -> Self {
        Roster { groups }
    }

    /// Returns the groups in slot order.
    pub fn groups(&self) -> &[UnitGroup; ROSTER_SIZE] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnitGroup> {
        self.groups.iter()
    }

    /// Returns a copy of this roster with slot `i` holding `self[order[i]]`.
    pub fn permuted(&self, order: &[usize; ROSTER_SIZE]) -> Roster {
        Roster {
            groups: order.map(|i| self.groups[i].clone()),
        }
    }
}

impl TryFrom<Vec<UnitGroup>> for Roster {
    type Error = RosterSizeError;

    fn try_from(groups: Vec<UnitGroup>) -> Result<Self, Self::Error> {
        let found = groups.len();
        let groups: [UnitGroup; ROSTER_SIZE] = groups
            .try_into()
            .map_err(|_| RosterSizeError { found })?;
        Ok(Roster { groups })
    }
}

impl Index<usize> for Roster {
    type Output = UnitGroup;

    fn index(&self, slot: usize) -> &UnitGroup {
        &self.groups[slot]
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a UnitGroup;
    type IntoIter = std::slice::Iter<'a, UnitGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Formats the roster in its wire encoding, e.g. `Militia#10;Spearmen#10;...`.
impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}
