//! Domain types shared across the Cierre CRM services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod currency;
pub mod level;
