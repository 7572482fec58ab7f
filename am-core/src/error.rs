//! Error types for Adaptive MIPI core
//!
//! Re-exports the unified error type from am-error crate.

pub use am_error::{AdaptiveMipiError, Result};
