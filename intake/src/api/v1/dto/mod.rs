//! v1 API Data Transfer Objects.
//!
//! Wire types for the v1 REST API, kept apart from the domain models in
//! `src/models/` so the internal record layout can change freely.

pub mod files;
pub mod formats;

pub use files::*;
pub use formats::*;
