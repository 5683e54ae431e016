/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the local interaction zone

/// Error types for the liz module
#[derive(Debug, thiserror::Error)]
pub enum LizError {
    #[error("Local interaction zone has no sites")]
    Empty,

    #[error("Sites {first} and {second} coincide at {position}")]
    CoincidentSites {
        first: usize,
        second: usize,
        position: String,
    },

    #[error("Site {site} has lmax {lmax}, above the tabulated maximum {max_lmax}")]
    LmaxTooLarge {
        site: usize,
        lmax: usize,
        max_lmax: usize,
    },

    #[error("Invalid cluster parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for liz operations
pub type Result<T> = std::result::Result<T, LizError>;
