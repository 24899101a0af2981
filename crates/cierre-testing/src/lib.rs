//! Test utilities for Cierre services.
//!
//! Provides `MockAuth` identity header injection and the canonical
//! four-level org fixture. Import in `#[cfg(test)]` blocks and integration
//! tests only — never in production code.

pub mod auth;
pub mod org;
