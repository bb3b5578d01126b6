//! Response envelope glue for serverless HTTP entry points.
//!
//! The runner has no notion of requests or status codes. These adapters
//! wrap an aggregate (or any serializable message) into the envelope a
//! platform trigger expects, with permissive CORS headers attached to
//! every response. Nothing here depends on an HTTP framework or a platform
//! invocation model.

use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Error carrying an HTTP status code alongside its message.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct StatusError {
    message: String,
    status_code: Option<u16>,
}

impl StatusError {
    /// Create an error that maps to the default 500 status.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create an error with an explicit status code.
    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

/// The CORS header pair attached to every envelope.
#[derive(Debug, Clone, Serialize)]
pub struct CorsHeaders {
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: &'static str,
    #[serde(rename = "Access-Control-Allow-Headers")]
    pub allow_headers: &'static str,
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_origin: "*",
            allow_headers: "*",
        }
    }
}

/// Platform response envelope.
///
/// `body` holds the JSON-serialized message; `stack` is populated only for
/// error responses that choose to expose one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub headers: CorsHeaders,
}

impl GatewayResponse {
    /// Attach a stack trace to the envelope.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Wrap a message into a 200 envelope.
pub fn respond<M: Serialize>(message: &M) -> serde_json::Result<GatewayResponse> {
    respond_with_status(message, 200)
}

/// Wrap a message into an envelope with an explicit status code.
pub fn respond_with_status<M: Serialize>(
    message: &M,
    status_code: u16,
) -> serde_json::Result<GatewayResponse> {
    Ok(GatewayResponse {
        status_code,
        body: serde_json::to_string(message)?,
        stack: None,
        headers: CorsHeaders::default(),
    })
}

/// Map a status-coded error into its envelope, defaulting to 500.
pub fn handle_error(err: &StatusError) -> GatewayResponse {
    let status_code = err.status_code().unwrap_or(500);
    error!(status = status_code, message = err.message(), "request failed");

    GatewayResponse {
        status_code,
        // Serializing a plain string cannot fail.
        body: serde_json::Value::String(err.message().to_string()).to_string(),
        stack: None,
        headers: CorsHeaders::default(),
    }
}
