//! Typed error hierarchy for hireboard.
//!
//! Two top-level enums cover the two layers:
//! - `StoreError`: failures talking to the backing table store
//! - `PipelineError`: pipeline board operations (load, drag, drop)

use thiserror::Error;

/// Errors from a `Store` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Request(String),

    #[error("Store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode {what}: {message}")]
    Decode { what: String, message: String },

    #[error("{table} record {id} not found")]
    NotFound { table: &'static str, id: i64 },

    #[error("Invalid record: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[source] anyhow::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode {
                what: "store response".to_string(),
                message: err.to_string(),
            }
        } else {
            StoreError::Request(err.to_string())
        }
    }
}

/// Errors from the pipeline board.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load candidates: {0}")]
    LoadFailed(#[source] StoreError),

    #[error("No pipeline column at position {position} (expected 1-6)")]
    UnknownColumn { position: usize },

    #[error("Candidate {candidate_id} is not on the board")]
    CardNotRendered { candidate_id: i64 },

    #[error("Candidate {active} is already being dragged")]
    DragInProgress { active: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_not_found_carries_table_and_id() {
        let err = StoreError::NotFound {
            table: "candidates",
            id: 42,
        };
        assert!(err.is_not_found());
        let msg = err.to_string();
        assert!(msg.contains("candidates"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn store_error_status_is_matchable() {
        let err = StoreError::Status {
            status: 503,
            message: "unavailable".into(),
        };
        match &err {
            StoreError::Status { status, .. } => assert_eq!(*status, 503),
            _ => panic!("Expected Status variant"),
        }
        assert!(!err.is_not_found());
    }

    #[test]
    fn pipeline_error_converts_from_store_error() {
        let inner = StoreError::Request("connection reset".to_string());
        let err: PipelineError = inner.into();
        match &err {
            PipelineError::Store(StoreError::Request(msg)) => {
                assert_eq!(msg, "connection reset");
            }
            _ => panic!("Expected PipelineError::Store(Request(...))"),
        }
    }

    #[test]
    fn pipeline_error_unknown_column_mentions_position() {
        let err = PipelineError::UnknownColumn { position: 9 };
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&StoreError::LockPoisoned);
        assert_std_error(&PipelineError::DragInProgress { active: 1 });
    }
}
