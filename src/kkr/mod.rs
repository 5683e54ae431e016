/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! KKR multiple-scattering matrix
//!
//! For a local interaction zone of N sites this module assembles
//!
//! ```text
//! M_ij = δ_ij · 1 - (1 - δ_ij) · t_i · BGij_ij
//! ```
//!
//! where BGij holds the free-electron structure constants between the
//! angular-momentum channels of sites i and j. The build runs in two stages
//! over disjoint per-site row bands: structure constants (with spin doubling)
//! into the workspace, then the t-matrix products into M. M is what an outer
//! solver inverts to obtain the scattering path operator.

mod bgij;
mod builder;
mod config;
pub mod errors;
mod gij;
mod layout;
mod multiply;
mod workspace;

pub use bgij::{assemble_bgij, spin_double_block, AssemblyOptions};
pub use builder::{BuildSummary, EnergyPoint, KkrMatrixBuilder};
pub use config::{DlmMode, KkrConfig, MultiplyBackend, Relativity, SpinPolarization};
pub use errors::{KkrError, Result};
pub use gij::{fill_gij_block, gij_element};
pub use layout::{matrix_dimension, BlockLayout};
pub use multiply::{
    multiply_off_diagonal, multiply_subtract_accumulate, multiply_subtract_gemm,
};
pub use workspace::KkrWorkspace;
