/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the KKR matrix build

use thiserror::Error;

/// Result type for KKR matrix operations
pub type Result<T> = std::result::Result<T, KkrError>;

/// KKR-specific errors
#[derive(Error, Debug)]
pub enum KkrError {
    /// Physics that is specified but not implemented
    #[error("Unimplemented physics: {0}")]
    UnimplementedPhysics(String),

    /// Spin mode whose t-matrix extraction has not been validated and was
    /// not explicitly allowed
    #[error("Unverified spin mode: {0}")]
    UnverifiedSpinMode(String),

    /// Error when the matrix dimensions are incompatible
    #[error("Matrix dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Error when parameters are invalid
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error reading or writing a configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from the liz module
    #[error("Local interaction zone error: {0}")]
    LizError(#[from] crate::liz::LizError),

    /// Error from the tmatrix module
    #[error("T-matrix error: {0}")]
    TMatrixError(#[from] crate::tmatrix::TMatrixError),
}

impl From<std::io::Error> for KkrError {
    fn from(err: std::io::Error) -> Self {
        KkrError::ConfigError(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for KkrError {
    fn from(err: serde_json::Error) -> Self {
        KkrError::ConfigError(format!("JSON error: {}", err))
    }
}
