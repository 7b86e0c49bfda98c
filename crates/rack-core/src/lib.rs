#![forbid(unsafe_code)]

//! Precedence-ordered selection and rack grid reflow.
//!
//! A branch view holds two disjoint, rank-sorted collections drawn from the
//! same set of ribbons: the catalog and the selection. [`SelectionEngine`]
//! moves one item at a time between them and reports the grid cells that
//! changed, so a UI repaints only what moved.
//!
//! ```
//! use rack_core::{GridConfig, GridPosition, Item, SelectionEngine, Side};
//!
//! let mut engine = SelectionEngine::from_items(
//!     [Item::new(0, "A"), Item::new(1, "B"), Item::new(2, "C")],
//!     GridConfig::default(),
//! )?;
//! let result = engine.transfer("B", Side::Catalog)?;
//! assert_eq!(result.new_index, 0);
//! assert_eq!(engine.position_of("B", Side::Selected)?, GridPosition::new(0, 0));
//! # Ok::<(), rack_core::RackError>(())
//! ```

pub mod collection;
pub mod engine;
pub mod error;
pub mod grid;
pub mod item;
pub mod shared;

pub use collection::OrderedCollection;
pub use engine::{ObserverId, SelectionEngine, TransferOutcome, TransferResult};
pub use error::{RackError, Result};
pub use grid::{
    DEFAULT_GRID_WIDTH, GridConfig, GridOrigin, GridPosition, Placement, ReflowOrder, ScreenCell,
};
pub use item::{Item, Rank, Side};
pub use shared::SharedEngine;
