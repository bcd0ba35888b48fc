//! Error types for the collection store client

use thiserror::Error;

/// Errors that can occur when interacting with the remote collection store
///
/// Remote 4xx/5xx responses are treated uniformly as failures carrying the
/// server-provided message, except not-found which gets its own variant:
/// callers must treat absence as failure, never as an empty success.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request never reached or never returned from the store
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// A referenced document no longer exists at read time
    #[error("{resource} {id} not found")]
    NotFound {
        /// What failed to resolve: a document ("list", "user") or a
        /// collection query ("lists", "users")
        resource: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Store returned a non-success status
    #[error("Store error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the store
        message: String,
    },
}

impl ClientError {
    /// Whether this error is a not-found condition
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_resource_and_id() {
        let error = ClientError::NotFound {
            resource: "list",
            id: "L1".to_string(),
        };
        assert_eq!(error.to_string(), "list L1 not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn api_error_carries_status() {
        let error = ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "Store error (status 500): boom");
        assert!(!error.is_not_found());
    }
}
