//! Unit types and unit groups.
//!
//! A unit group (platoon) is a unit class paired with a headcount. Groups
//! are built once when a roster is parsed and never mutated afterwards.

use std::fmt;

/// The number of known unit types.
pub const UNIT_TYPE_COUNT: usize = 6;

/// A known unit class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum UnitType {
    Militia = 0,
    Spearmen = 1,
    FootArcher = 2,
    LightCavalry = 3,
    HeavyCavalry = 4,
    CavalryArcher = 5,
}

/// All unit types in discriminant order.
pub const ALL_UNIT_TYPES: [UnitType; UNIT_TYPE_COUNT] = [
    UnitType::Militia,
    UnitType::Spearmen,
    UnitType::FootArcher,
    UnitType::LightCavalry,
    UnitType::HeavyCavalry,
    UnitType::CavalryArcher,
];

impl UnitType {
    /// Returns the name used in the roster encoding.
    pub const fn name(self) -> &'static str {
        match self {
            UnitType::Militia => "Militia",
            UnitType::Spearmen => "Spearmen",
            UnitType::FootArcher => "FootArcher",
            UnitType::LightCavalry => "LightCavalry",
            UnitType::HeavyCavalry => "HeavyCavalry",
            UnitType::CavalryArcher => "CavalryArcher",
        }
    }

    /// Parses a unit type from its roster name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<UnitType> {
        match name {
            "Militia" => Some(UnitType::Militia),
            "Spearmen" => Some(UnitType::Spearmen),
            "FootArcher" => Some(UnitType::FootArcher),
            "LightCavalry" => Some(UnitType::LightCavalry),
            "HeavyCavalry" => Some(UnitType::HeavyCavalry),
            "CavalryArcher" => Some(UnitType::CavalryArcher),
            _ => None,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The class of a unit group as written in a roster.
///
/// `Unrecognized` only appears when rosters are parsed with the neutral
/// unknown-type policy. Such groups neither gain nor grant advantage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnitClass {
    Known(UnitType),
    Unrecognized(Box<str>),
}

impl UnitClass {
    /// Returns the known unit type, if any.
    pub const fn unit_type(&self) -> Option<UnitType> {
        match self {
            UnitClass::Known(t) => Some(*t),
            UnitClass::Unrecognized(_) => None,
        }
    }

    /// Returns the name as it appears in the roster encoding.
    pub fn name(&self) -> &str {
        match self {
            UnitClass::Known(t) => t.name(),
            UnitClass::Unrecognized(name) => name.as_ref(),
        }
    }
}

impl From<UnitType> for UnitClass {
    fn from(t: UnitType) -> Self {
        UnitClass::Known(t)
    }
}

/// One platoon: a unit class and its headcount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitGroup {
    pub class: UnitClass,
    pub strength: u64,
}

impl UnitGroup {
    /// Creates a group of a known unit type.
    pub fn new(unit_type: UnitType, strength: u64) -> Self {
        UnitGroup {
            class: UnitClass::Known(unit_type),
            strength,
        }
    }

    /// Creates a group whose class is not in the advantage table.
    pub fn unrecognized(name: &str, strength: u64) -> Self {
        UnitGroup {
            class: UnitClass::Unrecognized(name.into()),
            strength,
        }
    }

    /// Returns the known unit type, if any.
    pub const fn unit_type(&self) -> Option<UnitType> {
        self.class.unit_type()
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class.name(), self.strength)
    }
}
