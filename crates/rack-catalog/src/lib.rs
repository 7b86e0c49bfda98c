#![forbid(unsafe_code)]

//! Precedence catalogs and ribbon images on disk.
//!
//! This crate is the boundary between the selection engine and whatever
//! produced the ranking data. It never scrapes; it reads and writes the
//! persisted mapping and resolves image files by ribbon name.

pub mod catalog;
pub mod error;
pub mod images;

pub use catalog::{DEFAULT_CATALOG_PATH, KNOWN_BRANCHES, PrecedenceCatalog};
pub use error::{CatalogError, Result};
pub use images::{DEFAULT_IMAGE_DIR, IMAGE_EXTENSIONS, ImageStore, file_stem};
