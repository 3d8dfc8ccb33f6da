use sdkdeck_backend::ClientError;
use thiserror::Error;

/// Model-level failures surfaced to the UI layer.
///
/// Listing failures and operation failures are kept apart because the UI
/// reacts differently: an unavailable source empties the panes, a failed
/// operation leaves them as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("candidate source unavailable")]
    SourceUnavailable {
        #[source]
        source: ClientError,
    },

    #[error("{operation} failed")]
    OperationFailed {
        operation: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("{operation} cancelled")]
    Cancelled { operation: &'static str },

    #[error("another operation is already running")]
    Busy,
}

impl CoreError {
    pub fn source_unavailable(source: ClientError) -> Self {
        Self::SourceUnavailable { source }
    }

    pub fn operation_failed(operation: &'static str, source: ClientError) -> Self {
        Self::OperationFailed { operation, source }
    }

    pub fn cancelled(operation: &'static str) -> Self {
        Self::Cancelled { operation }
    }
}
