//! Shared service plumbing for the Cierre CRM workspace.
//!
//! Env config loading, the common error type, health handlers, the gateway
//! identity extractor, request-id middleware, the JSON response envelope,
//! serde helpers, and tracing init.

pub mod config;
pub mod error;
pub mod health;
pub mod identity;
pub mod middleware;
pub mod response;
pub mod serde;
pub mod tracing;
