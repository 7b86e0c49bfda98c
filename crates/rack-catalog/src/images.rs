#![forbid(unsafe_code)]

//! Ribbon image lookup.
//!
//! Images live under `<root>/<branch>/<stem>.<ext>`, where the stem is the
//! ribbon name with characters that are awkward in file names stripped.
//! The extension depends on what the source page served, so lookups probe
//! the known image types in order.

use std::path::{Path, PathBuf};

/// Default image root.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Extensions probed by [`ImageStore::find`], in order.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

/// Strip spaces, apostrophes, slashes and periods from a ribbon name.
///
/// `"Air Force Outstanding Unit Award"` becomes
/// `"AirForceOutstandingUnitAward"`.
#[must_use]
pub fn file_stem(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '\'' | '/' | '.'))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStore {
    root: PathBuf,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_DIR)
    }
}

impl ImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn branch_dir(&self, branch: &str) -> PathBuf {
        self.root.join(branch)
    }

    /// Where the image for `name` with extension `ext` is stored.
    #[must_use]
    pub fn path_for(&self, branch: &str, name: &str, ext: &str) -> PathBuf {
        self.branch_dir(branch)
            .join(format!("{}.{ext}", file_stem(name)))
    }

    /// First existing image for `name`, if any.
    #[must_use]
    pub fn find(&self, branch: &str, name: &str) -> Option<PathBuf> {
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| self.path_for(branch, name, ext))
            .find(|path| path.is_file())
    }
}
