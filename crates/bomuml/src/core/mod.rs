//! Core infrastructure: error types and logging
//!
//! Shared plumbing used by the model loader, the diagram writer, and the
//! CLI boundary.

mod error;
pub mod logging;

pub use error::*;
pub use logging::*;
