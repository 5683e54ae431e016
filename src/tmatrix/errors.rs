/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the t-matrix store

use thiserror::Error;

/// Result type for t-matrix store operations
pub type Result<T> = std::result::Result<T, TMatrixError>;

/// T-matrix store errors
#[derive(Error, Debug)]
pub enum TMatrixError {
    #[error("Energy index {index} out of range (store holds {count} energies)")]
    EnergyOutOfRange { index: usize, count: usize },

    #[error("Store entry {index} out of range (store holds {count} entries)")]
    EntryOutOfRange { index: usize, count: usize },

    #[error("Spin block {index} out of range (store holds {count} spin blocks)")]
    SpinBlockOutOfRange { index: usize, count: usize },

    #[error("Block shape mismatch: {0}")]
    ShapeMismatch(String),
}
