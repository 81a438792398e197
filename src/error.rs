//! Error taxonomy for calls against the user backend.
//!
//! Classification lives here; the view boundary turns an [`ApiError`] into
//! the banner text shown to the operator via [`failure_banner`].

use thiserror::Error;

/// Failure kinds surfaced by the API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Nothing is listening on the backend port.
    #[error("Backend server is not running on port {port}")]
    ConnectionRefused { port: u16 },

    /// The server answered with a non-success HTTP status.
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },

    /// The request went out but no usable response came back.
    #[error("Network error - check if backend is running")]
    Network(#[source] reqwest::Error),

    /// The base URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Any other client-side failure (malformed request, decode error, ...).
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Format a failed operation for the error banner.
///
/// `action` is the verb phrase of the attempted operation, e.g.
/// "fetch users" or "delete user".
pub fn failure_banner(action: &str, err: &ApiError) -> String {
    format!("Failed to {}: {}", action, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_refused_names_the_port() {
        let err = ApiError::ConnectionRefused { port: 8080 };
        assert_eq!(
            err.to_string(),
            "Backend server is not running on port 8080"
        );
    }

    #[test]
    fn status_carries_code_and_body() {
        let err = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn banner_prefixes_the_action() {
        let err = ApiError::ConnectionRefused { port: 8080 };
        let banner = failure_banner("fetch users", &err);
        assert_eq!(
            banner,
            "Failed to fetch users: Backend server is not running on port 8080"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
