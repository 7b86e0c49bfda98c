#![forbid(unsafe_code)]

//! Fixed-width rack grid arithmetic.
//!
//! A rack is laid out in rows of [`GridConfig::width`] cells (three for a
//! ribbon rack). The item at sorted index `i` sits in row `i / width`,
//! counted from the origin edge, and in the `i % width`-th cell counted from
//! the origin side.
//!
//! # Coordinates
//!
//! [`GridPosition`] is anchored to the configured [`GridOrigin`]:
//!
//! - `col` is always counted from the left edge. For a right-hand origin the
//!   fill direction is mirrored, so index 0 lands in `col = width - 1`.
//! - `row` is counted from the origin edge. For a top origin that is the top
//!   row, for a bottom origin the bottom row.
//!
//! Both depend only on the index, width and origin, so inserting an item
//! never moves cells in front of it. Converting to top-down screen rows
//! needs the total row count; see [`GridConfig::screen_cell`].
//!
//! # Invariants
//!
//! 1. `width >= 1` for any config that passed [`GridConfig::validate`].
//! 2. `position(i)` is injective over indices for a fixed config.
//! 3. `rows_for(len)` is the smallest row count holding `len` cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RackError, Result};
use crate::item::Item;

/// Default number of cells per rack row.
pub const DEFAULT_GRID_WIDTH: usize = 3;

/// Corner the first cell of the rack anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridOrigin {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl GridOrigin {
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Whether rows fill upward from the bottom edge.
    #[must_use]
    pub const fn fills_upward(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    /// Whether cells fill right-to-left within a row.
    #[must_use]
    pub const fn fills_leftward(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for GridOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GridOrigin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|origin| origin.as_str() == s)
            .ok_or_else(|| {
                format!("unknown grid origin {s:?} (expected top-left, top-right, bottom-left or bottom-right)")
            })
    }
}

/// Grid shape used to place selected items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells per row.
    pub width: usize,
    /// Corner the first cell anchors to.
    pub origin: GridOrigin,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            origin: GridOrigin::default(),
        }
    }
}

impl GridConfig {
    /// # Errors
    ///
    /// [`RackError::InvalidGridWidth`] when `width` is zero.
    pub fn new(width: usize, origin: GridOrigin) -> Result<Self> {
        let config = Self { width, origin };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// [`RackError::InvalidGridWidth`] when `width` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(RackError::InvalidGridWidth);
        }
        Ok(())
    }

    /// Origin-anchored position of the cell at a sorted index.
    #[must_use]
    pub fn position(&self, index: usize) -> GridPosition {
        let width = self.width.max(1);
        let row = index / width;
        let along = index % width;
        let col = if self.origin.fills_leftward() {
            width - 1 - along
        } else {
            along
        };
        GridPosition { row, col }
    }

    /// Rows needed to hold `len` cells.
    #[must_use]
    pub fn rows_for(&self, len: usize) -> usize {
        len.div_ceil(self.width.max(1))
    }

    /// Project a position onto top-down screen coordinates for a grid that
    /// currently spans `rows` rows.
    #[must_use]
    pub fn screen_cell(&self, position: GridPosition, rows: usize) -> ScreenCell {
        let row = if self.origin.fills_upward() {
            rows.saturating_sub(1).saturating_sub(position.row)
        } else {
            position.row
        };
        ScreenCell {
            row,
            col: position.col,
        }
    }
}

/// Where an item sits on the rack, relative to the configured origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    /// Rows away from the origin edge.
    pub row: usize,
    /// Column counted from the left edge.
    pub col: usize,
}

impl GridPosition {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

/// Top-down, left-to-right cell coordinates on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenCell {
    pub row: usize,
    pub col: usize,
}

/// An item together with its sorted index and grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub item: Item,
    pub position: GridPosition,
}

/// Order in which reflowed cells are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReflowOrder {
    /// Lowest index first.
    #[default]
    Ascending,
    /// Highest index first.
    Descending,
}

impl ReflowOrder {
    /// Order used when cells shift down to fill a removed slot.
    #[must_use]
    pub const fn for_removal() -> Self {
        Self::Descending
    }

    /// Order used when cells shift up to open a slot for an insert.
    #[must_use]
    pub const fn for_insertion() -> Self {
        Self::Ascending
    }
}
