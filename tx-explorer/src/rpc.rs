use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

#[cfg(test)]
use mockall::automock;

/// Reasons a JSON-RPC call could not complete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint answered with a non-success HTTP status
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    /// The call did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established or was interrupted
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body was not a JSON-RPC envelope
    #[error("undecodable response: {0}")]
    Decode(String),
}

/// A single JSON-RPC exchange with a network endpoint
///
/// Implementations must not retry. Timeouts are reported as
/// [`TransportError::Timeout`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(
        &self,
        endpoint: &str,
        request: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, TransportError>;
}

/// JSON-RPC over HTTP POST
///
/// The underlying `reqwest::Client` keeps a connection pool, so one transport
/// is shared by every resolution.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport whose calls fail after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(
        &self,
        endpoint: &str,
        request: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, TransportError> {
        debug!(endpoint, method = %request.method, id = request.id, "Sending JSON-RPC request");

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let envelope: JsonRpcResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Decode(e.to_string())
            }
        })?;

        if !envelope.echoes(request.id) {
            warn!(
                expected = request.id,
                received = %envelope.id,
                method = %request.method,
                "JSON-RPC response id does not match request id"
            );
        }

        Ok(envelope)
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if let Some(status) = error.status() {
        TransportError::Status(status.as_u16())
    } else {
        TransportError::Connection(error.to_string())
    }
}
