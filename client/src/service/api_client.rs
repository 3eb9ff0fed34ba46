//! Calculation Service client
//!
//! HTTP client for `POST /calculate`. The HTTP status is advisory: the body
//! is always read and interpreted, and only a 2xx response carrying
//! `success: true` counts as a result.

use crate::config::Config;
use crate::error::ClientError;
use crate::service::types::{CalculationRequest, CalculationResult, ServiceResponse};
use async_trait::async_trait;

/// Anything that can answer a [`CalculationRequest`]
///
/// The orchestrator only talks to this trait, so tests and alternative
/// transports can stand in for the HTTP service.
#[async_trait]
pub trait CalculationService: Send + Sync {
    /// Perform exactly one calculation call, without retrying
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ClientError>;
}

/// HTTP implementation of [`CalculationService`]
#[derive(Debug, Clone)]
pub struct HttpCalculationService {
    client: reqwest::Client,
    calculate_url: String,
}

impl HttpCalculationService {
    /// Build a client from configuration (endpoint and timeout)
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            calculate_url: config.calculate_url(),
        })
    }

    /// Endpoint this client posts to
    pub fn calculate_url(&self) -> &str {
        &self.calculate_url
    }
}

#[async_trait]
impl CalculationService for HttpCalculationService {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ClientError> {
        call_calculate(&self.client, &self.calculate_url, request).await
    }
}

/// Post one request to the calculate endpoint and interpret the reply
///
/// # Errors
/// * `ClientError::Transport` if the request cannot be sent or the body read
/// * `ClientError::MalformedResponse` if the body is not a usable envelope
/// * `ClientError::Service` if the service reports failure or the status is not 2xx
pub async fn call_calculate(
    client: &reqwest::Client,
    url: &str,
    request: &CalculationRequest,
) -> Result<CalculationResult, ClientError> {
    tracing::debug!(
        url = %url,
        function = %request.function,
        resolution = ?request.resolution,
        "Calling Calculation Service"
    );

    // `json()` sets the Content-Type header
    let response = client
        .post(url)
        .json(request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to send request to Calculation Service");
            ClientError::Transport(e)
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read response body from Calculation Service");
        ClientError::Transport(e)
    })?;

    if !status.is_success() {
        tracing::warn!(
            status_code = status.as_u16(),
            error_body = %body,
            "Calculation Service returned error status"
        );
    }

    let envelope: ServiceResponse = serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            status_code = status.as_u16(),
            error = %e,
            response_body = %body,
            "Failed to parse JSON response from Calculation Service"
        );
        ClientError::MalformedResponse(format!(
            "HTTP {}: {} - Response body: {}",
            status.as_u16(),
            e,
            body
        ))
    })?;

    let result = envelope.into_result(status.as_u16())?;

    tracing::debug!(
        volume = result.volume,
        error = result.error,
        grid = ?result.grid_dims(),
        "Successfully received result from Calculation Service"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE_MESSAGE;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use serial_test::serial;
    use std::io::Write;

    fn service_for(base_url: &str) -> HttpCalculationService {
        let mut config = Config::default();
        config.service.base_url = base_url.to_string();
        HttpCalculationService::from_config(&config).unwrap()
    }

    fn request() -> CalculationRequest {
        CalculationRequest {
            function: "sin(x)*cos(y)".to_string(),
            a: -3.14,
            b: 3.14,
            c: -3.14,
            d: 3.14,
            resolution: Some(2),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_calculate_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/calculate")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "function": "sin(x)*cos(y)",
                "resolution": 2
            })))
            .with_status(200)
            .with_body(
                r#"{
                    "success": true,
                    "volume": 0.000123,
                    "error": 1.2e-05,
                    "x": [-3.14, 3.14],
                    "y": [-3.14, 3.14],
                    "z": [[0.0, 0.1], [0.2, 0.3]]
                }"#,
            )
            .create_async()
            .await;

        let service = service_for(&server.url());
        let result = service.calculate(&request()).await;

        mock.assert_async().await;
        let result = result.unwrap();
        assert_eq!(result.volume, 0.000123);
        assert_eq!(result.error, 1.2e-05);
        assert_eq!(result.grid_dims(), (2, 2));
    }

    #[tokio::test]
    #[serial]
    async fn test_calculate_service_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/calculate")
            .with_status(400)
            .with_body(r#"{"success": false, "message": "Invalid domain: a must be less than b"}"#)
            .create_async()
            .await;

        let service = service_for(&server.url());
        let result = service.calculate(&request()).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(err, ClientError::Service { status: 400, .. }));
        assert_eq!(err.user_message(), "Invalid domain: a must be less than b");
    }

    #[tokio::test]
    #[serial]
    async fn test_calculate_failure_with_ok_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/calculate")
            .with_status(200)
            .with_body(r#"{"success": false, "message": "The resolution must be at least 10"}"#)
            .create_async()
            .await;

        let service = service_for(&server.url());
        let err = service.calculate(&request()).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.user_message(), "The resolution must be at least 10");
    }

    #[tokio::test]
    #[serial]
    async fn test_calculate_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/calculate")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let service = service_for(&server.url());
        let err = service.calculate(&request()).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, ClientError::MalformedResponse(_)));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    #[serial]
    async fn test_calculate_error_status_with_html_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/calculate")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let service = service_for(&server.url());
        let err = service.calculate(&request()).await.unwrap_err();

        mock.assert_async().await;
        assert!(err.to_string().contains("HTTP 502"));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_calculate_connection_refused() {
        // Nothing listens on port 9 of localhost in the test environment
        let service = service_for("http://127.0.0.1:9");
        let err = service.calculate(&request()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    #[serial]
    async fn test_calculate_timeout_is_transport_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/calculate")
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(std::time::Duration::from_secs(3));
                w.write_all(br#"{"success": false, "message": "too late"}"#)
            })
            .create_async()
            .await;

        let mut config = Config::default();
        config.service.base_url = server.url();
        config.service.timeout_secs = 1;
        let service = HttpCalculationService::from_config(&config).unwrap();

        let started = std::time::Instant::now();
        let err = service.calculate(&request()).await.unwrap_err();

        mock.assert_async().await;
        assert!(started.elapsed() < std::time::Duration::from_secs(3));
        assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_calculate_url_strips_trailing_slash() {
        let service = service_for("http://calc.local/");
        assert_eq!(service.calculate_url(), "http://calc.local/calculate");
    }
}
