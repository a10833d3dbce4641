//! Error types for chargescout

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChargescoutError {
    #[error("Invalid coordinate ({latitude}, {longitude}): latitude must be a finite value in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid radius: {radius_km} km. The search radius must be a non-negative number")]
    InvalidRadius { radius_km: f64 },

    #[error("Invalid cutoff: {cutoff_km} km. The nearest-match cutoff must be a non-negative number")]
    InvalidCutoff { cutoff_km: f64 },
}

pub type Result<T> = std::result::Result<T, ChargescoutError>;
