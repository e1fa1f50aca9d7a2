//! Data models used throughout the application
//!
//! JSON-RPC envelopes, the raw chain records returned by the endpoints and the
//! display-ready view derived from them.

// JSON-RPC protocol data structures
pub mod jsonrpc;

// Receipt, transaction and block records
pub mod chain;

// Resolved transaction view
pub mod view;
