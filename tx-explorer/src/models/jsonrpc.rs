use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request structure
///
/// Positional parameters are kept as raw JSON values so that every method the
/// explorer calls shares one envelope type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Method parameters
    pub params: Vec<serde_json::Value>,

    /// Request identifier
    pub id: u64,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC 2.0 request
    pub fn new(id: u64, method: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response envelope
///
/// A successful response carries `result` (which may legitimately be `null`),
/// a failed one carries `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version
    #[serde(default)]
    pub jsonrpc: String,

    /// Request identifier (matching the request)
    #[serde(default)]
    pub id: serde_json::Value,

    /// Method result, `None` when absent or `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorDetail>,
}

/// JSON-RPC 2.0 error detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorDetail {
    /// Error code
    #[serde(default)]
    pub code: i64,

    /// Error message
    #[serde(default)]
    pub message: String,

    /// Additional error data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: u64, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn failure(id: u64, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: None,
            error: Some(JsonRpcErrorDetail {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Whether the response echoes the given request id
    pub fn echoes(&self, id: u64) -> bool {
        self.id.as_u64() == Some(id)
    }
}

// Helpers to parse hex quantities returned by JSON-RPC endpoints.

/// Parse a hexadecimal string into a `U256` value.
///
/// Expects a string starting with "0x".
pub fn parse_hex_u256(hex: &str) -> Result<U256, String> {
    let hex = hex
        .strip_prefix("0x")
        .ok_or_else(|| "Hex value must start with 0x".to_string())?;
    U256::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
}

/// Parse a hexadecimal string into a `u64` value.
///
/// Expects a string starting with "0x".
pub fn parse_hex_u64(hex: &str) -> Result<u64, String> {
    let hex = hex
        .strip_prefix("0x")
        .ok_or_else(|| "Hex value must start with 0x".to_string())?;
    u64::from_str_radix(hex, 16).map_err(|e| format!("Invalid u64 hex value: {}", e))
}

/// Parse a hexadecimal quantity into the nearest `f64`.
///
/// The full 256-bit integer is parsed first and rounded once, through its
/// decimal representation.
pub fn parse_hex_f64(hex: &str) -> Result<f64, String> {
    let value = parse_hex_u256(hex)?;
    value
        .to_string()
        .parse::<f64>()
        .map_err(|e| format!("Invalid numeric value: {}", e))
}
