#![forbid(unsafe_code)]

//! Interactive branch view state.
//!
//! [`App`] ties one [`SelectionEngine`] to the UI: two list cursors, the
//! focused list, the rack cell cache and a status line. Input handlers map
//! keys and mouse clicks onto `transfer` calls; rendering lives in
//! [`crate::view`].

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rack_catalog::{ImageStore, PrecedenceCatalog};
use rack_core::{SelectionEngine, Side, TransferOutcome};
use tracing::{info, warn};

use crate::config::RackConfig;
use crate::error::Result;
use crate::rack::RackCells;
use crate::view::{ViewLayout, scroll_offset};

/// Two clicks on the same row within this window count as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Detects double-clicks on list rows.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    last: Option<(Side, usize, Instant)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW)
    }
}

impl ClickTracker {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Record a click; true when it completes a double-click.
    pub fn register(&mut self, side: Side, index: usize, now: Instant) -> bool {
        let double = self.last.is_some_and(|(last_side, last_index, at)| {
            last_side == side
                && last_index == index
                && now.saturating_duration_since(at) <= self.window
        });
        self.last = if double { None } else { Some((side, index, now)) };
        double
    }
}

#[derive(Debug)]
pub struct App {
    branch: String,
    engine: SelectionEngine,
    images: ImageStore,
    rack: RackCells,
    focus: Side,
    catalog_cursor: usize,
    selected_cursor: usize,
    catalog_scroll: usize,
    selected_scroll: usize,
    viewport: usize,
    clicks: ClickTracker,
    status: String,
    quit: bool,
}

impl App {
    #[must_use]
    pub fn new(branch: impl Into<String>, engine: SelectionEngine, images: ImageStore) -> Self {
        let mut rack = RackCells::new(engine.grid());
        rack.rebuild(&engine.layout(Side::Selected));
        Self {
            branch: branch.into(),
            engine,
            images,
            rack,
            focus: Side::Catalog,
            catalog_cursor: 0,
            selected_cursor: 0,
            catalog_scroll: 0,
            selected_scroll: 0,
            viewport: 0,
            clicks: ClickTracker::default(),
            status: String::from("Enter or double-click moves a ribbon; Esc quits"),
            quit: false,
        }
    }

    /// Open the configured branch of `catalog`.
    ///
    /// # Errors
    ///
    /// Unknown branch or malformed branch data.
    pub fn from_catalog(catalog: &PrecedenceCatalog, config: &RackConfig) -> Result<Self> {
        let engine = catalog.engine(&config.branch, config.grid)?;
        info!(
            target: "rack.app",
            branch = %config.branch,
            ribbons = engine.universe_len(),
            "branch view opened"
        );
        Ok(Self::new(
            config.branch.clone(),
            engine,
            ImageStore::new(&config.image_dir),
        ))
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    #[must_use]
    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    #[must_use]
    pub fn rack(&self) -> &RackCells {
        &self.rack
    }

    #[must_use]
    pub fn focus(&self) -> Side {
        self.focus
    }

    #[must_use]
    pub fn cursor(&self, side: Side) -> usize {
        match side {
            Side::Catalog => self.catalog_cursor,
            Side::Selected => self.selected_cursor,
        }
    }

    fn cursor_mut(&mut self, side: Side) -> &mut usize {
        match side {
            Side::Catalog => &mut self.catalog_cursor,
            Side::Selected => &mut self.selected_cursor,
        }
    }

    /// First visible row of `side`'s list.
    #[must_use]
    pub fn scroll(&self, side: Side) -> usize {
        match side {
            Side::Catalog => self.catalog_scroll,
            Side::Selected => self.selected_scroll,
        }
    }

    /// Set how many list rows are on screen and bring both cursors into
    /// view. Called on startup and whenever the terminal is resized.
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows;
        self.follow_cursors();
    }

    /// Scroll each list only as far as needed to keep its cursor visible.
    fn follow_cursors(&mut self) {
        for side in [Side::Catalog, Side::Selected] {
            let len = self.engine.collection(side).len();
            let offset = scroll_offset(self.scroll(side), self.cursor(side), len, self.viewport);
            match side {
                Side::Catalog => self.catalog_scroll = offset,
                Side::Selected => self.selected_scroll = offset,
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Name under the cursor of the focused list.
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.engine
            .collection(self.focus)
            .get(self.cursor(self.focus))
            .map(|item| item.name.as_str())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.opposite(),
            KeyCode::Left => self.focus = Side::Catalog,
            KeyCode::Right => self.focus = Side::Selected,
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Home => *self.cursor_mut(self.focus) = 0,
            KeyCode::End => {
                let last = self.engine.collection(self.focus).len().saturating_sub(1);
                *self.cursor_mut(self.focus) = last;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => {}
        }
        self.follow_cursors();
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, layout: &ViewLayout, now: Instant) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.viewport != layout.list_height() {
                    self.set_viewport(layout.list_height());
                }
                let Some((side, row)) = layout.hit(event.column, event.row) else {
                    return;
                };
                let len = self.engine.collection(side).len();
                let index = self.scroll(side) + row;
                if index >= len {
                    return;
                }
                self.focus = side;
                *self.cursor_mut(side) = index;
                if self.clicks.register(side, index, now) {
                    self.activate();
                }
            }
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            MouseEventKind::ScrollDown => self.move_cursor(1),
            _ => {}
        }
        self.follow_cursors();
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.engine.collection(self.focus).len();
        let cursor = self.cursor_mut(self.focus);
        *cursor = cursor
            .saturating_add_signed(delta)
            .min(len.saturating_sub(1));
    }

    /// Transfer the highlighted item out of the focused list.
    pub fn activate(&mut self) {
        let Some(name) = self.highlighted().map(str::to_owned) else {
            self.status = format!("{} is empty", self.focus);
            return;
        };
        // A failed transfer has already been surfaced through the status line.
        let _ = self.transfer(&name, self.focus);
    }

    /// Move `name` out of `from`, updating the rack and cursors.
    ///
    /// A stale name (already moved) is reported on the status line and the
    /// rack is rebuilt from the engine. Any other error only updates the
    /// status line.
    pub fn transfer(&mut self, name: &str, from: Side) -> Option<TransferOutcome> {
        match self.engine.transfer_with_reflow(name, from) {
            Ok(outcome) => {
                let touched = self.rack.apply(&outcome);
                let result = &outcome.result;

                let source_len = result.source_len;
                let cursor = self.cursor_mut(from);
                *cursor = (*cursor).min(source_len.saturating_sub(1));
                *self.cursor_mut(result.to) = result.new_index;
                self.follow_cursors();

                self.status = match result.to {
                    Side::Selected => format!(
                        "added {} at row {}, column {}",
                        result.item.name,
                        result.position.row + 1,
                        result.position.col + 1
                    ),
                    Side::Catalog => format!("removed {}", result.item.name),
                };
                info!(
                    target: "rack.app",
                    name = %result.item.name,
                    to = %result.to,
                    repainted = touched,
                    "rack updated"
                );
                Some(outcome)
            }
            Err(error) if error.is_recoverable() => {
                warn!(target: "rack.app", %error, "stale activation ignored");
                self.rack.rebuild(&self.engine.layout(Side::Selected));
                self.status = format!("{name} already moved");
                None
            }
            Err(error) => {
                self.status = error.to_string();
                None
            }
        }
    }
}
