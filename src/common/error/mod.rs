//! Unified error types for the metafile writer.

pub mod types;

pub use types::{Error, Result};
