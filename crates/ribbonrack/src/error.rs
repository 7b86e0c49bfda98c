use std::path::PathBuf;

use rack_catalog::CatalogError;
use rack_core::RackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Rack(#[from] RackError),

    #[error("config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("failed to set up logging: {message}")]
    Logging { message: String },
}

impl AppError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Catalog(error) if error.is_missing() => 3,
            Self::Catalog(_) | Self::Rack(_) => 4,
            Self::Config { .. } | Self::InvalidConfig { .. } => 2,
            Self::Io(_) | Self::Logging { .. } => 1,
        }
    }

    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
