//! Common types and utilities shared by the metafile serializers.

pub mod binary;
pub mod error;
pub mod hex;

pub use error::{Error, Result};
