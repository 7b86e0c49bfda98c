#![forbid(unsafe_code)]

//! Terminal session and the interactive event loop.
//!
//! # Invariants
//!
//! - Raw mode, the alternate screen, the hidden cursor and mouse capture are
//!   undone in reverse order when [`TerminalSession`] drops, including on
//!   an early `?` return out of the loop.
//! - A panic while the session is live restores the terminal before the
//!   panic message prints. Once the session has dropped, the panic hook
//!   writes nothing.
//!
//! # Failure Modes
//!
//! - Cleanup errors are ignored; there is nowhere left to report them.

use std::io::{self, Stdout, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use rack_catalog::PrecedenceCatalog;
use tracing::{debug, info};

use crate::app::App;
use crate::config::RackConfig;
use crate::error::Result;
use crate::view::{ViewLayout, render};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Set while a [`TerminalSession`] owns the terminal.
static SESSION_LIVE: AtomicBool = AtomicBool::new(false);

/// RAII guard over the terminal modes the UI needs.
#[derive(Debug)]
pub struct TerminalSession {
    stdout: Stdout,
    alternate_screen: bool,
    mouse: bool,
}

impl TerminalSession {
    /// # Errors
    ///
    /// Returns an error if raw mode or any terminal mode cannot be enabled.
    /// Modes enabled before the failure are restored.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        SESSION_LIVE.store(true, Ordering::SeqCst);
        let mut session = Self {
            stdout: io::stdout(),
            alternate_screen: false,
            mouse: false,
        };
        execute!(session.stdout, EnterAlternateScreen, Clear(ClearType::All), Hide)?;
        session.alternate_screen = true;
        execute!(session.stdout, EnableMouseCapture)?;
        session.mouse = true;
        debug!(target: "rack.app", "terminal session started");
        Ok(session)
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Paint `lines` from the top-left corner.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        for (y, line) in lines.iter().enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            queue!(self.stdout, MoveTo(0, y))?;
            self.stdout.write_all(line.as_bytes())?;
        }
        self.stdout.flush()
    }

    fn cleanup(&mut self) {
        if self.mouse {
            let _ = execute!(self.stdout, DisableMouseCapture);
            self.mouse = false;
        }
        let _ = execute!(self.stdout, Show);
        if self.alternate_screen {
            let _ = execute!(self.stdout, LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
        SESSION_LIVE.store(false, Ordering::SeqCst);
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_after_panic(&mut io::stdout());
            previous(info);
        }));
    });
}

/// Undo the session's terminal modes if one is live. Returns whether
/// anything was written.
fn restore_after_panic(out: &mut impl Write) -> bool {
    if !SESSION_LIVE.swap(false, Ordering::SeqCst) {
        return false;
    }
    let _ = execute!(out, DisableMouseCapture, Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    true
}

/// Open the configured branch and run the UI until the user quits.
///
/// # Errors
///
/// Catalog errors before the terminal is touched, then terminal I/O errors.
pub fn run_interactive(config: &RackConfig) -> Result<()> {
    let catalog = PrecedenceCatalog::load_file(&config.catalog_path)?;
    let mut app = App::from_catalog(&catalog, config)?;
    let mut session = TerminalSession::new()?;
    event_loop(&mut session, &mut app)?;
    drop(session);
    info!(
        target: "rack.app",
        branch = app.branch(),
        selected = app.engine().selected().len(),
        "branch view closed"
    );
    Ok(())
}

fn event_loop(session: &mut TerminalSession, app: &mut App) -> Result<()> {
    let (width, height) = session.size()?;
    let mut layout = ViewLayout::new(width, height);
    app.set_viewport(layout.list_height());
    let mut dirty = true;
    while !app.should_quit() {
        if dirty {
            session.draw(&render(app, &layout))?;
            dirty = false;
        }
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse, &layout, Instant::now()),
            Event::Resize(width, height) => {
                layout = ViewLayout::new(width, height);
                app.set_viewport(layout.list_height());
                execute!(session.stdout, Clear(ClearType::All))?;
            }
            _ => continue,
        }
        dirty = true;
    }
    Ok(())
}
