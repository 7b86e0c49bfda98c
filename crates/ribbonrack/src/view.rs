#![forbid(unsafe_code)]

//! Text rendering of a branch view.
//!
//! The screen is split into three columns: catalog list, selected list and
//! the rack. Rendering is a pure function from [`App`] state to one string
//! per terminal row, so it can be checked without a terminal.
//!
//! ```text
//!  RibbonRack: USAF  Tab switch  Enter move  Esc quit
//! Catalog (2)       │Selected (2)      │Rack (2)
//! >  0 Medal of Hon │   1 Air Force Cr │[Air F][Silve]
//!    3 Bronze Star  │   2 Silver Star  │
//!  added Silver Star at row 1, column 2
//! ```

use rack_core::{ScreenCell, Side};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::rack::RackCells;

const SEPARATOR: char = '│';
const LIST_TOP: u16 = 2;

/// A vertical strip of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub x: u16,
    pub width: u16,
}

impl Column {
    #[must_use]
    pub fn contains(&self, x: u16) -> bool {
        x >= self.x && x < self.x.saturating_add(self.width)
    }
}

/// Screen geometry for a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    width: u16,
    height: u16,
    catalog: Column,
    selected: Column,
    rack: Column,
}

impl ViewLayout {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let list_width = width.saturating_sub(2) / 3;
        let rack_x = list_width.saturating_mul(2).saturating_add(2);
        Self {
            width,
            height,
            catalog: Column {
                x: 0,
                width: list_width,
            },
            selected: Column {
                x: list_width + 1,
                width: list_width,
            },
            rack: Column {
                x: rack_x,
                width: width.saturating_sub(rack_x),
            },
        }
    }

    #[must_use]
    pub fn column(&self, side: Side) -> Column {
        match side {
            Side::Catalog => self.catalog,
            Side::Selected => self.selected,
        }
    }

    #[must_use]
    pub fn rack(&self) -> Column {
        self.rack
    }

    /// First screen row used by list entries.
    #[must_use]
    pub fn list_top(&self) -> u16 {
        LIST_TOP
    }

    /// Visible list rows between the header and the status line.
    #[must_use]
    pub fn list_height(&self) -> usize {
        usize::from(self.height.saturating_sub(LIST_TOP + 1))
    }

    /// List and visible row under a screen coordinate.
    #[must_use]
    pub fn hit(&self, x: u16, y: u16) -> Option<(Side, usize)> {
        let row = usize::from(y.checked_sub(LIST_TOP)?);
        if row >= self.list_height() {
            return None;
        }
        [Side::Catalog, Side::Selected]
            .into_iter()
            .find(|&side| self.column(side).contains(x))
            .map(|side| (side, row))
    }
}

/// First list index to show, starting from `current` and moving only as far
/// as needed to keep `cursor` inside a window of `visible` rows.
#[must_use]
pub fn scroll_offset(current: usize, cursor: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1);
    let offset = current.min(len.saturating_sub(visible));
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

/// Truncate or pad `text` to exactly `width` display columns.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Rack rows as text, top row first. Each cell is `[name]` clipped to the
/// cell width; empty cells are blank.
#[must_use]
pub fn rack_lines(rack: &RackCells, width: usize) -> Vec<String> {
    let grid = rack.grid();
    let cell_width = (width / grid.width.max(1)).max(3);
    let rows = rack.rows();
    let mut matrix: Vec<Vec<Option<&str>>> = vec![vec![None; grid.width]; rows];
    for (ScreenCell { row, col }, name) in rack.screen_cells() {
        matrix[row][col] = Some(name);
    }
    matrix
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .map(|cell| match cell {
                    Some(name) => format!("[{}]", fit(name, cell_width - 2)),
                    None => " ".repeat(cell_width),
                })
                .collect::<String>()
        })
        .collect()
}

fn list_lines(app: &App, side: Side, visible: usize) -> Vec<String> {
    let collection = app.engine().collection(side);
    let cursor = app.cursor(side);
    let offset = scroll_offset(app.scroll(side), cursor, collection.len(), visible);
    collection
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, item)| {
            let marker = if side == app.focus() && index == cursor {
                '>'
            } else {
                ' '
            };
            format!("{marker}{:>3} {}", item.rank, item.name)
        })
        .collect()
}

fn status_line(app: &App) -> String {
    let mut line = format!(" {}", app.status());
    if app.focus() == Side::Selected {
        if let Some(name) = app.highlighted() {
            match app.images().find(app.branch(), name) {
                Some(path) => line.push_str(&format!("  image: {}", path.display())),
                None => line.push_str("  image: missing"),
            }
        }
    }
    line
}

/// One string per terminal row, each exactly `layout` wide.
#[must_use]
pub fn render(app: &App, layout: &ViewLayout) -> Vec<String> {
    let width = usize::from(layout.width);
    let height = usize::from(layout.height);
    let catalog_width = usize::from(layout.catalog.width);
    let selected_width = usize::from(layout.selected.width);
    let rack_width = usize::from(layout.rack.width);

    let visible = layout.list_height();
    let catalog = list_lines(app, Side::Catalog, visible);
    let selected = list_lines(app, Side::Selected, visible);
    let rack = rack_lines(app.rack(), rack_width);

    let row = |left: &str, middle: &str, right: &str| {
        let mut line = fit(left, catalog_width);
        line.push(SEPARATOR);
        line.push_str(&fit(middle, selected_width));
        line.push(SEPARATOR);
        line.push_str(&fit(right, rack_width));
        fit(&line, width)
    };

    let mut lines = Vec::with_capacity(height);
    for y in 0..height {
        let line = if y == 0 {
            fit(
                &format!(" RibbonRack: {}  Tab switch  Enter move  Esc quit", app.branch()),
                width,
            )
        } else if y + 1 == height {
            fit(&status_line(app), width)
        } else if y == 1 {
            row(
                &format!("Catalog ({})", app.engine().catalog().len()),
                &format!("Selected ({})", app.engine().selected().len()),
                &format!("Rack ({})", app.rack().len()),
            )
        } else {
            let i = y - usize::from(LIST_TOP);
            let cell = |lines: &[String]| lines.get(i).cloned().unwrap_or_default();
            row(&cell(&catalog), &cell(&selected), &cell(&rack))
        };
        lines.push(line);
    }
    lines
}
