//! Chargescout Core - record models and the spatial match engine
//!
//! This crate contains the distance-based predicates applied across the
//! geo-tagged datasets: radius filtering for points and line segments,
//! nearest-record search with a cutoff, and per-record zone matching.
//! Everything here is a pure, synchronous computation over caller-owned
//! records; loading and rendering live in the neighbouring crates.

pub mod error;
pub mod models;
pub mod spatial;

pub use error::{ChargescoutError, Result};
