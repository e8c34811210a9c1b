//! Utilities module for logging, errors and chart drawing
//!
//! This module provides:
//! - Structured logging with tracing
//! - Error handling types
//! - Bar chart drawing (SVG always, PNG with the `charts` feature)

pub mod charts;
pub mod error;
pub mod glyphs;
pub mod logging;

// Re-export main types for convenience
pub use error::{DistributionError, Result};
pub use logging::init_logging;
