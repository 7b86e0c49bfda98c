#![forbid(unsafe_code)]

//! Ribbon items and the two collections they can live in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Precedence rank of a ribbon within its branch.
///
/// Lower rank means higher precedence, i.e. earlier in the rack. Ranks are
/// assigned by the catalog loader and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(u32);

impl Rank {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Rank {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One ribbon: a display name keyed by its precedence rank.
///
/// The name doubles as the external key (image file, UI label) and must be
/// unique within a branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub rank: Rank,
    pub name: String,
}

impl Item {
    #[must_use]
    pub fn new(rank: impl Into<Rank>, name: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rank, self.name)
    }
}

/// Which of the two collections an item occupies.
///
/// An item is always in exactly one of them; `transfer` is the only way to
/// move between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    /// The master list of every ribbon not yet on the rack.
    Catalog,
    /// The ribbons currently on the rack.
    Selected,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Catalog => Self::Selected,
            Self::Selected => Self::Catalog,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Selected => "selected",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        assert_eq!(Side::Catalog.opposite(), Side::Selected);
        assert_eq!(Side::Selected.opposite().opposite(), Side::Selected);
    }

    #[test]
    fn rank_orders_numerically() {
        assert!(Rank::new(2) < Rank::new(10));
        assert_eq!(Rank::from(7).get(), 7);
    }

    #[test]
    fn side_serializes_kebab_case() {
        let json = serde_json::to_string(&Side::Selected).unwrap();
        assert_eq!(json, "\"selected\"");
    }
}
