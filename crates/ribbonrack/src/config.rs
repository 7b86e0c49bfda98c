#![forbid(unsafe_code)]

//! Application configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) is a valid configuration. Command-line flags are
//! applied on top with [`RackConfig::apply`].
//!
//! ```toml
//! catalog_path = "precedence.json"
//! image_dir = "images"
//! branch = "USAF"
//!
//! [grid]
//! width = 3
//! origin = "bottom-right"
//!
//! [log]
//! filter = "rack=debug,info"
//! file = "ribbonrack.log"
//! ```

use std::path::{Path, PathBuf};

use rack_catalog::{DEFAULT_CATALOG_PATH, DEFAULT_IMAGE_DIR};
use rack_core::{GridConfig, GridOrigin};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Branch opened when none is given.
pub const DEFAULT_BRANCH: &str = "USAF";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackConfig {
    pub catalog_path: PathBuf,
    pub image_dir: PathBuf,
    pub branch: String,
    pub grid: GridConfig,
    pub log: LogConfig,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            branch: DEFAULT_BRANCH.to_string(),
            grid: GridConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Log file for the interactive UI, which owns the terminal.
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: PathBuf::from("ribbonrack.log"),
        }
    }
}

/// Values given on the command line, each overriding the file when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub image_dir: Option<PathBuf>,
    pub branch: Option<String>,
    pub grid_width: Option<usize>,
    pub grid_origin: Option<GridOrigin>,
}

impl RackConfig {
    /// # Errors
    ///
    /// [`AppError::Config`] if the text is not valid TOML for this shape.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| AppError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// # Errors
    ///
    /// I/O errors reading the file, or [`AppError::Config`] on bad TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text, path)
    }

    /// The file at `path` if given, otherwise defaults.
    ///
    /// # Errors
    ///
    /// See [`from_file`](Self::from_file).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.catalog_path {
            self.catalog_path = path;
        }
        if let Some(dir) = overrides.image_dir {
            self.image_dir = dir;
        }
        if let Some(branch) = overrides.branch {
            self.branch = branch;
        }
        if let Some(width) = overrides.grid_width {
            self.grid.width = width;
        }
        if let Some(origin) = overrides.grid_origin {
            self.grid.origin = origin;
        }
    }

    /// # Errors
    ///
    /// [`AppError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.grid.validate().is_err() {
            return Err(AppError::invalid_config("grid.width must be at least 1"));
        }
        if self.branch.trim().is_empty() {
            return Err(AppError::invalid_config("branch must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = RackConfig::from_toml_str("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, RackConfig::default());
        assert_eq!(config.grid.width, 3);
        assert_eq!(config.catalog_path, PathBuf::from("precedence.json"));
    }

    #[test]
    fn partial_grid_table_keeps_other_defaults() {
        let config = RackConfig::from_toml_str(
            "branch = \"AFROTC\"\n[grid]\norigin = \"bottom-right\"\n",
            Path::new("rack.toml"),
        )
        .unwrap();
        assert_eq!(config.branch, "AFROTC");
        assert_eq!(config.grid.width, 3);
        assert_eq!(config.grid.origin, GridOrigin::BottomRight);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn unknown_origin_is_a_config_error() {
        let err = RackConfig::from_toml_str("[grid]\norigin = \"center\"\n", Path::new("rack.toml"))
            .unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn overrides_win_over_file() {
        let mut config = RackConfig::default();
        config.apply(ConfigOverrides {
            grid_width: Some(4),
            grid_origin: Some(GridOrigin::TopRight),
            branch: Some("AFROTC".into()),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.grid.width, 4);
        assert_eq!(config.grid.origin, GridOrigin::TopRight);
        assert_eq!(config.branch, "AFROTC");
        assert_eq!(config.image_dir, PathBuf::from("images"));
    }

    #[test]
    fn zero_width_fails_validation() {
        let mut config = RackConfig::default();
        config.grid.width = 0;
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ribbonrack.toml");
        std::fs::write(&path, "[log]\nfilter = \"rack=trace\"\n").unwrap();
        let config = RackConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log.filter, "rack=trace");
        assert_eq!(RackConfig::load(None).unwrap(), RackConfig::default());
    }
}
