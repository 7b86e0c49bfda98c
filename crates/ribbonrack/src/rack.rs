#![forbid(unsafe_code)]

//! Cell cache for the rack panel.
//!
//! The panel does not know precedence. It only remembers which ribbon each
//! grid cell shows, and it changes that map solely from the placements an
//! engine transfer reports. A full rebuild is needed only when a branch view
//! opens.

use std::collections::HashMap;

use rack_core::{GridConfig, GridPosition, Placement, ScreenCell, Side, TransferOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackCells {
    grid: GridConfig,
    cells: HashMap<GridPosition, String>,
}

impl RackCells {
    #[must_use]
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            cells: HashMap::new(),
        }
    }

    /// Replace every cell from a full layout of the selected side.
    pub fn rebuild(&mut self, layout: &[Placement]) {
        self.cells = layout
            .iter()
            .map(|placement| (placement.position, placement.item.name.clone()))
            .collect();
    }

    /// Update the cells touched by a transfer. Returns how many cells were
    /// repainted or cleared.
    pub fn apply(&mut self, outcome: &TransferOutcome) -> usize {
        let result = &outcome.result;
        let mut touched = 0;
        match result.to {
            Side::Selected => {
                for placement in &outcome.destination {
                    self.paint(placement);
                    touched += 1;
                }
            }
            Side::Catalog => {
                // The old last cell is left empty once the tail shifts down.
                let vacated = self.grid.position(result.source_len);
                if self.cells.remove(&vacated).is_some() {
                    touched += 1;
                }
                for placement in &outcome.source {
                    self.paint(placement);
                    touched += 1;
                }
            }
        }
        touched
    }

    fn paint(&mut self, placement: &Placement) {
        self.cells
            .insert(placement.position, placement.item.name.clone());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: GridPosition) -> Option<&str> {
        self.cells.get(&position).map(String::as_str)
    }

    #[must_use]
    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    /// Rows the rack spans right now.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows_for(self.cells.len())
    }

    /// Cells in top-down, left-to-right screen order.
    #[must_use]
    pub fn screen_cells(&self) -> Vec<(ScreenCell, &str)> {
        let rows = self.rows();
        let mut cells: Vec<(ScreenCell, &str)> = self
            .cells
            .iter()
            .map(|(&position, name)| (self.grid.screen_cell(position, rows), name.as_str()))
            .collect();
        cells.sort_unstable_by_key(|(cell, _)| *cell);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rack_core::{GridOrigin, Item, SelectionEngine};

    fn engine(grid: GridConfig) -> SelectionEngine {
        SelectionEngine::from_items((0..7).map(|rank| Item::new(rank, format!("R{rank}"))), grid)
            .unwrap()
    }

    fn assert_matches_layout(rack: &RackCells, engine: &SelectionEngine) {
        let layout = engine.layout(Side::Selected);
        assert_eq!(rack.len(), layout.len());
        for placement in layout {
            assert_eq!(rack.get(placement.position), Some(placement.item.name.as_str()));
        }
    }

    #[test]
    fn incremental_updates_track_full_layout() {
        let grid = GridConfig::default();
        let mut engine = engine(grid);
        let mut rack = RackCells::new(grid);

        for name in ["R5", "R1", "R3", "R0", "R6"] {
            let outcome = engine.transfer_with_reflow(name, Side::Catalog).unwrap();
            rack.apply(&outcome);
            assert_matches_layout(&rack, &engine);
        }
        for name in ["R1", "R6", "R0"] {
            let outcome = engine.transfer_with_reflow(name, Side::Selected).unwrap();
            rack.apply(&outcome);
            assert_matches_layout(&rack, &engine);
        }
    }

    #[test]
    fn appending_touches_one_cell() {
        let grid = GridConfig::default();
        let mut engine = engine(grid);
        let mut rack = RackCells::new(grid);
        rack.apply(&engine.transfer_with_reflow("R0", Side::Catalog).unwrap());
        let touched = rack.apply(&engine.transfer_with_reflow("R4", Side::Catalog).unwrap());
        assert_eq!(touched, 1);
    }

    #[test]
    fn removing_last_item_empties_rack() {
        let grid = GridConfig::default();
        let mut engine = engine(grid);
        let mut rack = RackCells::new(grid);
        rack.apply(&engine.transfer_with_reflow("R2", Side::Catalog).unwrap());
        let touched = rack.apply(&engine.transfer_with_reflow("R2", Side::Selected).unwrap());
        assert_eq!(touched, 1);
        assert!(rack.is_empty());
        assert_eq!(rack.rows(), 0);
    }

    #[test]
    fn bottom_right_screen_order() {
        let grid = GridConfig::new(3, GridOrigin::BottomRight).unwrap();
        let mut engine = engine(grid);
        for name in ["R0", "R1", "R2", "R3"] {
            engine.transfer(name, Side::Catalog).unwrap();
        }
        let mut rack = RackCells::new(grid);
        rack.rebuild(&engine.layout(Side::Selected));

        let cells = rack.screen_cells();
        let order: Vec<_> = cells
            .iter()
            .map(|(cell, name)| (cell.row, cell.col, *name))
            .collect();
        assert_eq!(
            order,
            [(0, 2, "R3"), (1, 0, "R2"), (1, 1, "R1"), (1, 2, "R0")]
        );
    }
}
