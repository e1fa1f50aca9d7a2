// Export modules for the server binary and integration tests
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod resolver;
pub mod rpc;
pub mod validation;
