#![forbid(unsafe_code)]

//! The dual-list selection engine.
//!
//! [`SelectionEngine`] owns the catalog and selected collections for one
//! branch view. `transfer` moves a single item across, keeping both sides in
//! rank order, and reports enough for a UI to repaint only the cells that
//! moved.
//!
//! # Invariants
//!
//! 1. `catalog ∪ selected` is the universe given to `initialize`.
//! 2. `catalog ∩ selected = ∅`.
//! 3. Both collections are strictly ascending by rank.
//! 4. A failed `transfer` leaves both collections untouched.
//!
//! # Failure Modes
//!
//! - Transferring a name that is not in the `from` side returns
//!   [`RackError::NotFound`]. This happens when a UI delivers a stale
//!   activation; the caller should ignore it and resync.
//! - `initialize` with duplicate ranks or names fails and keeps the previous
//!   state.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::collection::OrderedCollection;
use crate::error::{RackError, Result};
use crate::grid::{GridConfig, GridPosition, Placement, ReflowOrder};
use crate::item::{Item, Rank, Side};

/// What a successful transfer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// The item that moved.
    pub item: Item,
    /// Side it left.
    pub from: Side,
    /// Side it joined.
    pub to: Side,
    /// Index it held in `from` before removal.
    pub old_index: usize,
    /// Index it now holds in `to`.
    pub new_index: usize,
    /// Grid position at `new_index`.
    pub position: GridPosition,
    /// Size of `from` after removal.
    pub source_len: usize,
    /// Size of `to` after insertion.
    pub destination_len: usize,
}

/// A transfer plus the placements whose index changed on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub result: TransferResult,
    /// Items that shifted to fill the removed slot, highest index first.
    pub source: Vec<Placement>,
    /// The moved item and everything pushed back by it, lowest index first.
    pub destination: Vec<Placement>,
}

/// Handle returned by [`SelectionEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&TransferResult) + Send>;

/// Catalog and selected collections for a single branch.
pub struct SelectionEngine {
    grid: GridConfig,
    catalog: OrderedCollection,
    selected: OrderedCollection,
    ranks: FxHashMap<String, Rank>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("grid", &self.grid)
            .field("catalog", &self.catalog)
            .field("selected", &self.selected)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SelectionEngine {
    /// An engine with empty collections.
    ///
    /// # Errors
    ///
    /// [`RackError::InvalidGridWidth`] if the grid is zero cells wide.
    pub fn new(grid: GridConfig) -> Result<Self> {
        grid.validate()?;
        Ok(Self {
            grid,
            catalog: OrderedCollection::new(),
            selected: OrderedCollection::new(),
            ranks: FxHashMap::default(),
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    /// Build an engine and initialize it in one step.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new) and [`initialize`](Self::initialize).
    pub fn from_items(items: impl IntoIterator<Item = Item>, grid: GridConfig) -> Result<Self> {
        let mut engine = Self::new(grid)?;
        engine.initialize(items)?;
        Ok(engine)
    }

    /// Put every item in the catalog and empty the selection.
    ///
    /// # Errors
    ///
    /// [`RackError::DuplicateRank`] or [`RackError::DuplicateName`] for
    /// malformed input. The engine keeps its previous state on error.
    pub fn initialize(&mut self, items: impl IntoIterator<Item = Item>) -> Result<()> {
        let catalog = OrderedCollection::from_unsorted(items)?;
        self.ranks = catalog
            .iter()
            .map(|item| (item.name.clone(), item.rank))
            .collect();
        self.catalog = catalog;
        self.selected.clear();

        debug!(
            target: "rack.engine",
            items = self.catalog.len(),
            "selection engine initialized"
        );
        Ok(())
    }

    #[must_use]
    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    #[must_use]
    pub fn collection(&self, side: Side) -> &OrderedCollection {
        match side {
            Side::Catalog => &self.catalog,
            Side::Selected => &self.selected,
        }
    }

    fn collection_mut(&mut self, side: Side) -> &mut OrderedCollection {
        match side {
            Side::Catalog => &mut self.catalog,
            Side::Selected => &mut self.selected,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &OrderedCollection {
        &self.catalog
    }

    #[must_use]
    pub fn selected(&self) -> &OrderedCollection {
        &self.selected
    }

    /// Number of items across both sides.
    #[must_use]
    pub fn universe_len(&self) -> usize {
        self.ranks.len()
    }

    /// Rank of a known item, regardless of side.
    #[must_use]
    pub fn rank_of(&self, name: &str) -> Option<Rank> {
        self.ranks.get(name).copied()
    }

    /// Sorted index of `name` within `side`.
    #[must_use]
    pub fn index_of(&self, name: &str, side: Side) -> Option<usize> {
        let rank = self.rank_of(name)?;
        self.collection(side).index_of(rank, name)
    }

    /// Which side currently holds `name`.
    #[must_use]
    pub fn side_of(&self, name: &str) -> Option<Side> {
        [Side::Catalog, Side::Selected]
            .into_iter()
            .find(|&side| self.index_of(name, side).is_some())
    }

    /// Move `name` from `from` to the opposite side.
    ///
    /// The item is removed from `from` and inserted into the other side at
    /// its binary-search slot. Observers run after both sides are
    /// consistent.
    ///
    /// # Errors
    ///
    /// [`RackError::NotFound`] if `name` is not in `from`. Nothing is
    /// modified in that case.
    pub fn transfer(&mut self, name: &str, from: Side) -> Result<TransferResult> {
        let Some(old_index) = self.index_of(name, from) else {
            warn!(
                target: "rack.engine",
                name = %name,
                from = %from,
                "transfer target not found"
            );
            return Err(RackError::not_found(name, from));
        };

        let to = from.opposite();
        let item = self.collection_mut(from).remove(old_index);
        let new_index = self.collection_mut(to).insert(item.clone());

        let result = TransferResult {
            position: self.grid.position(new_index),
            item,
            from,
            to,
            old_index,
            new_index,
            source_len: self.collection(from).len(),
            destination_len: self.collection(to).len(),
        };

        debug_assert!(self.catalog.is_strictly_sorted());
        debug_assert!(self.selected.is_strictly_sorted());

        debug!(
            target: "rack.engine",
            name = %result.item.name,
            rank = result.item.rank.get(),
            from = %from,
            to = %to,
            old_index,
            new_index,
            "item transferred"
        );

        for (_, observer) in &mut self.observers {
            observer(&result);
        }
        Ok(result)
    }

    /// [`transfer`](Self::transfer), then reflow both sides from the
    /// affected slots.
    ///
    /// # Errors
    ///
    /// Same as [`transfer`](Self::transfer).
    pub fn transfer_with_reflow(&mut self, name: &str, from: Side) -> Result<TransferOutcome> {
        let result = self.transfer(name, from)?;
        let source = self.reflow_from(result.from, result.old_index, ReflowOrder::for_removal());
        let destination =
            self.reflow_from(result.to, result.new_index, ReflowOrder::for_insertion());
        Ok(TransferOutcome {
            result,
            source,
            destination,
        })
    }

    /// Grid position of `name` within `side`.
    ///
    /// # Errors
    ///
    /// [`RackError::NotFound`] if `name` is not in `side`.
    pub fn position_of(&self, name: &str, side: Side) -> Result<GridPosition> {
        self.index_of(name, side)
            .map(|index| self.grid.position(index))
            .ok_or_else(|| RackError::not_found(name, side))
    }

    /// Placements for every item at or after `start` in `side`.
    ///
    /// A `start` past the end yields nothing, so an emptied collection never
    /// reports stale cells.
    #[must_use]
    pub fn reflow_from(&self, side: Side, start: usize, order: ReflowOrder) -> Vec<Placement> {
        let items = self.collection(side).as_slice();
        let start = start.min(items.len());
        let mut placements: Vec<Placement> = items[start..]
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let index = start + offset;
                Placement {
                    index,
                    item: item.clone(),
                    position: self.grid.position(index),
                }
            })
            .collect();

        if order == ReflowOrder::Descending {
            placements.reverse();
        }

        trace!(
            target: "rack.engine",
            side = %side,
            start,
            reported = placements.len(),
            "reflow computed"
        );
        placements
    }

    /// Every placement in `side`, for a full paint.
    #[must_use]
    pub fn layout(&self, side: Side) -> Vec<Placement> {
        self.reflow_from(side, 0, ReflowOrder::Ascending)
    }

    /// Register a callback run after each successful transfer.
    ///
    /// The callback runs while the engine is mutably borrowed. When the
    /// engine sits inside a [`SharedEngine`](crate::SharedEngine), that
    /// borrow is under the handle's lock, so a callback that calls
    /// `lock()` or `transfer()` on the same handle deadlocks. Register such
    /// callbacks with [`SharedEngine::subscribe`](crate::SharedEngine::subscribe),
    /// which runs them after the lock is released.
    pub fn subscribe(&mut self, observer: impl FnMut(&TransferResult) + Send + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }
}
