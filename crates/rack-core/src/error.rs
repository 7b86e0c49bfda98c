use thiserror::Error;

use crate::item::{Rank, Side};

pub type Result<T> = std::result::Result<T, RackError>;

/// Errors raised by the selection engine.
///
/// Nothing here is retried internally. `NotFound` is the only variant a UI
/// is expected to swallow; everything else aborts setting up a branch view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RackError {
    #[error("item not found in {side}: {name}")]
    NotFound { name: String, side: Side },

    #[error("duplicate rank {rank}: {first:?} and {second:?}")]
    DuplicateRank {
        rank: Rank,
        first: String,
        second: String,
    },

    #[error("duplicate item name: {name:?}")]
    DuplicateName { name: String },

    #[error("grid width must be at least 1")]
    InvalidGridWidth,
}

impl RackError {
    #[must_use]
    pub fn not_found(name: impl Into<String>, side: Side) -> Self {
        Self::NotFound {
            name: name.into(),
            side,
        }
    }

    /// Whether the caller can ignore the error and keep the view alive.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Error type label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::DuplicateRank { .. } => "duplicate_rank",
            Self::DuplicateName { .. } => "duplicate_name",
            Self::InvalidGridWidth => "invalid_grid_width",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RackError;
    use crate::item::{Rank, Side};

    #[test]
    fn not_found_is_recoverable() {
        let error = RackError::not_found("Z", Side::Catalog);
        assert!(error.is_recoverable());
        assert_eq!(error.to_string(), "item not found in catalog: Z");
    }

    #[test]
    fn load_time_errors_are_fatal() {
        let error = RackError::DuplicateRank {
            rank: Rank::new(4),
            first: "A".into(),
            second: "B".into(),
        };
        assert!(!error.is_recoverable());
        assert_eq!(error.error_type(), "duplicate_rank");
        assert_eq!(error.to_string(), "duplicate rank 4: \"A\" and \"B\"");
        assert!(!RackError::InvalidGridWidth.is_recoverable());
    }
}
