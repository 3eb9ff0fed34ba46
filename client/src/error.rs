//! Error types and error handling for the client
//!
//! Every failure a submission can run into is represented by [`ClientError`].
//! None of them escape the orchestrator: each one is turned into a single
//! line of text for the error surface via [`ClientError::user_message`].

use thiserror::Error;

/// Message shown when the failure carries nothing worth showing to the user
pub const GENERIC_FAILURE_MESSAGE: &str = "Error processing the request";

/// Client-level error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP call itself failed (connect error, timeout, unreadable body)
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with `success: false` or a non-2xx status
    #[error("Service reported failure: {}", message.as_deref().unwrap_or("<no message>"))]
    Service {
        /// HTTP status code of the response
        status: u16,
        /// Message supplied by the service, if any
        message: Option<String>,
    },

    /// The response body was not JSON, lacked fields, or had an inconsistent grid
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request failed local validation (only when local validation is enabled)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The plot description could not be handed to the renderer
    #[error("Failed to render plot: {0}")]
    Render(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// One-line message for the error surface
    ///
    /// Transport and malformed-response failures never leak their internals;
    /// they are reported with [`GENERIC_FAILURE_MESSAGE`] and the details go to
    /// the log instead.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Service {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Service { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            ClientError::Transport(_) | ClientError::MalformedResponse(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            ClientError::InvalidRequest(message) => message.clone(),
            ClientError::Render(_) | ClientError::Config(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_is_shown_verbatim() {
        let err = ClientError::Service {
            status: 400,
            message: Some("Invalid domain: a must be less than b".to_string()),
        };
        assert_eq!(err.user_message(), "Invalid domain: a must be less than b");
    }

    #[test]
    fn test_service_without_message_uses_fallback() {
        let err = ClientError::Service {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);

        let blank = ClientError::Service {
            status: 200,
            message: Some("   ".to_string()),
        };
        assert_eq!(blank.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_malformed_response_uses_fallback() {
        let err = ClientError::MalformedResponse("expected value at line 1".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_render_error_keeps_detail() {
        let err = ClientError::Render("disk full".to_string());
        assert_eq!(err.user_message(), "Failed to render plot: disk full");
    }
}
