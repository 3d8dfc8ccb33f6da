use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("candidate source unavailable: {details}")]
    SourceUnavailable { details: String },

    #[error("network error during {operation}: {details}")]
    Network {
        operation: &'static str,
        details: String,
    },

    #[error("command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("version not found: {version}")]
    VersionNotFound { version: String },

    #[error("IO error ({kind}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl ClientError {
    pub fn source_unavailable(details: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            details: details.into(),
        }
    }

    pub fn network(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Network {
            operation,
            details: details.into(),
        }
    }

    pub fn version_not_found(version: impl Into<String>) -> Self {
        Self::VersionNotFound {
            version: version.into(),
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn io_error_conversion_keeps_kind() {
        let mapped = ClientError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(
            mapped,
            ClientError::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
    }

    #[test]
    fn display_includes_operation_context() {
        let error = ClientError::network("version listing", "timed out");
        assert_eq!(
            error.to_string(),
            "network error during version listing: timed out"
        );
    }
}
