use std::path::PathBuf;

use rack_core::RackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("precedence file does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("no precedence data for branch {branch:?}")]
    BranchNotFound { branch: String },

    #[error("precedence file is corrupt: {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("precedence catalog is empty; load or scrape it first")]
    Empty,

    #[error("failed to encode precedence catalog: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid catalog data: {0}")]
    Rack(#[from] RackError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Whether the data is missing, as opposed to present but unusable.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::BranchNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogError;

    #[test]
    fn missing_variants() {
        assert!(
            CatalogError::BranchNotFound {
                branch: "USN".into()
            }
            .is_missing()
        );
        assert!(!CatalogError::Empty.is_missing());
    }

    #[test]
    fn corrupt_message_names_path() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let error = CatalogError::Corrupt {
            path: "precedence.json".into(),
            source,
        };
        assert!(
            error
                .to_string()
                .starts_with("precedence file is corrupt: precedence.json:")
        );
    }
}
