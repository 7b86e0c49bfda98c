#![forbid(unsafe_code)]

//! Ribbon precedence per service branch.
//!
//! The persisted form is a JSON object keyed by branch, each mapping a rank
//! (as a string key) to a ribbon name:
//!
//! ```json
//! {
//!     "USAF": {
//!         "0": "Medal of Honor",
//!         "1": "Air Force Cross"
//!     }
//! }
//! ```
//!
//! The scraper that produces this data lives outside this crate; it builds a
//! catalog through [`PrecedenceCatalog::insert`] and calls
//! [`PrecedenceCatalog::store_file`].

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use rack_core::{GridConfig, Item, Rank, SelectionEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};

/// Branches the bundled scraper knows how to fetch.
pub const KNOWN_BRANCHES: [&str; 2] = ["AFROTC", "USAF"];

/// Default on-disk location of the precedence file.
pub const DEFAULT_CATALOG_PATH: &str = "precedence.json";

/// Read-only `(branch → rank → name)` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecedenceCatalog {
    branches: BTreeMap<String, BTreeMap<Rank, String>>,
}

impl PrecedenceCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` at `rank` for `branch`, returning any name it replaced.
    pub fn insert(
        &mut self,
        branch: impl Into<String>,
        rank: impl Into<Rank>,
        name: impl Into<String>,
    ) -> Option<String> {
        self.branches
            .entry(branch.into())
            .or_default()
            .insert(rank.into(), name.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.values().all(BTreeMap::is_empty)
    }

    /// Branch names, sorted.
    pub fn branches(&self) -> impl Iterator<Item = &str> + '_ {
        self.branches.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains_branch(&self, branch: &str) -> bool {
        self.branches.contains_key(branch)
    }

    /// Ranked items for `branch`, ascending by rank.
    ///
    /// # Errors
    ///
    /// [`CatalogError::BranchNotFound`] if no data exists for `branch`.
    pub fn load(&self, branch: &str) -> Result<Vec<Item>> {
        let ribbons = self
            .branches
            .get(branch)
            .ok_or_else(|| CatalogError::BranchNotFound {
                branch: branch.to_string(),
            })?;
        Ok(ribbons
            .iter()
            .map(|(&rank, name)| Item::new(rank, name.clone()))
            .collect())
    }

    /// Rank of `name` within `branch`.
    #[must_use]
    pub fn rank_of(&self, branch: &str, name: &str) -> Option<Rank> {
        self.branches
            .get(branch)?
            .iter()
            .find_map(|(&rank, candidate)| (candidate == name).then_some(rank))
    }

    /// A selection engine for `branch` with every ribbon in its catalog.
    ///
    /// # Errors
    ///
    /// [`CatalogError::BranchNotFound`] for an unknown branch, or
    /// [`CatalogError::Rack`] if the branch data is malformed (for example a
    /// name listed under two ranks).
    pub fn engine(&self, branch: &str, grid: GridConfig) -> Result<SelectionEngine> {
        let items = self.load(branch)?;
        Ok(SelectionEngine::from_items(items, grid)?)
    }

    /// Parse the persisted JSON form.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Corrupt`] if the text is not a branch → rank → name
    /// object.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| CatalogError::Corrupt {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a catalog previously written by [`store_file`](Self::store_file).
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the file does not exist,
    /// [`CatalogError::Corrupt`] when it cannot be parsed.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => CatalogError::NotFound {
                path: path.to_path_buf(),
            },
            _ => CatalogError::Io(error),
        })?;
        let catalog = Self::from_json_str(&json, path)?;
        info!(
            target: "rack.catalog",
            path = %path.display(),
            branches = catalog.branches.len(),
            "precedence catalog loaded"
        );
        Ok(catalog)
    }

    /// Pretty JSON with sorted keys and four-space indent.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Empty`] if there is nothing to store.
    pub fn to_json_string(&self) -> Result<String> {
        if self.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .map_err(CatalogError::Encode)?;
        out.push(b'\n');
        String::from_utf8(out).map_err(|error| {
            CatalogError::Io(std::io::Error::new(ErrorKind::InvalidData, error))
        })
    }

    /// Write the catalog to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Empty`] for an empty catalog, [`CatalogError::Io`] on
    /// write failure.
    pub fn store_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        debug!(
            target: "rack.catalog",
            path = %path.display(),
            "precedence catalog stored"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rack_core::{RackError, Side};

    fn usaf() -> PrecedenceCatalog {
        let mut catalog = PrecedenceCatalog::new();
        catalog.insert("USAF", 1, "Air Force Cross");
        catalog.insert("USAF", 0, "Medal of Honor");
        catalog.insert("USAF", 2, "Defense Distinguished Service Medal");
        catalog
    }

    #[test]
    fn load_returns_ascending_ranks() {
        let items = usaf().load("USAF").unwrap();
        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Medal of Honor",
                "Air Force Cross",
                "Defense Distinguished Service Medal"
            ]
        );
    }

    #[test]
    fn unknown_branch_is_missing() {
        let err = usaf().load("AFROTC").unwrap_err();
        assert!(matches!(err, CatalogError::BranchNotFound { ref branch } if branch == "AFROTC"));
    }

    #[test]
    fn rank_lookup_by_name() {
        let catalog = usaf();
        assert_eq!(catalog.rank_of("USAF", "Air Force Cross"), Some(Rank::new(1)));
        assert_eq!(catalog.rank_of("USAF", "Bronze Star"), None);
        assert_eq!(catalog.rank_of("AFROTC", "Air Force Cross"), None);
    }

    #[test]
    fn parses_string_rank_keys() {
        let json = r#"{"AFROTC": {"1": "Gold Valor", "0": "Silver Valor"}}"#;
        let catalog = PrecedenceCatalog::from_json_str(json, Path::new("inline")).unwrap();
        let items = catalog.load("AFROTC").unwrap();
        assert_eq!(items[0], Item::new(0, "Silver Valor"));
        assert_eq!(items[1], Item::new(1, "Gold Valor"));
    }

    #[test]
    fn non_numeric_rank_is_corrupt() {
        let json = r#"{"USAF": {"first": "Medal of Honor"}}"#;
        let err = PrecedenceCatalog::from_json_str(json, Path::new("inline")).unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt { .. }));
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let err = PrecedenceCatalog::from_json_str(r#"["USAF"]"#, Path::new("inline")).unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt { .. }));
    }

    #[test]
    fn empty_catalog_refuses_to_serialize() {
        assert!(matches!(
            PrecedenceCatalog::new().to_json_string(),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn json_uses_four_space_indent() {
        let json = usaf().to_json_string().unwrap();
        assert!(json.starts_with("{\n    \"USAF\": {\n        \"0\": \"Medal of Honor\""));
    }

    #[test]
    fn engine_for_branch() {
        let mut engine = usaf().engine("USAF", GridConfig::default()).unwrap();
        engine.transfer("Air Force Cross", Side::Catalog).unwrap();
        assert_eq!(engine.selected().len(), 1);
    }

    #[test]
    fn repeated_name_fails_engine_setup() {
        let mut catalog = usaf();
        catalog.insert("USAF", 9, "Medal of Honor");
        let err = catalog.engine("USAF", GridConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Rack(RackError::DuplicateName { .. })
        ));
    }
}
