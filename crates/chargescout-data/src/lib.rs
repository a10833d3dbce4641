//! Chargescout Data - dataset loading and normalization
//!
//! Parses the delimited source datasets into the typed record shapes the
//! engine consumes, normalizing source-specific coordinate column names
//! along the way, and resolves postcodes to coordinates.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod postcode;

pub use error::{DataError, Result};
