#![forbid(unsafe_code)]

//! Terminal front end for the ribbon rack.
//!
//! `ribbonrack` with no subcommand opens the interactive selector for one
//! branch: the catalog list, the selected list and the rack preview. The
//! `branches`, `precedence` and `rack` subcommands print the same data
//! without taking over the terminal.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod rack;
pub mod terminal;
pub mod view;

pub use cli::run_from_env;
pub use error::{AppError, Result};
