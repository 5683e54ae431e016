/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! # kkr-rs
//!
//! Assembly of the Korringa-Kohn-Rostoker (KKR) multiple-scattering matrix.
//!
//! Given the sites of a local interaction zone and their single-site
//! t-matrices, the crate builds the free-electron structure constants
//! (BGij) from spherical-wave expansions and combines them into
//! `M = 1 - t·BGij`, the matrix an outer solver inverts for the scattering
//! path operator.
//!
//! ```no_run
//! use kkr_rs::angular::AngularTables;
//! use kkr_rs::kkr::{EnergyPoint, KkrConfig, KkrMatrixBuilder, KkrWorkspace, SpinPolarization};
//! use kkr_rs::liz::LocalInteractionZone;
//! use kkr_rs::tmatrix::{diagonal_t_matrix, TMatrixStore};
//! use num_complex::Complex64;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = KkrConfig::new(2, SpinPolarization::Unpolarized);
//! let tables = AngularTables::new(2);
//! let liz = LocalInteractionZone::simple_cubic(3.0, 3.0, 2)?;
//!
//! let mut store = TMatrixStore::new(9, 1, 1, 1);
//! store.set_block(0, 0, 0, &diagonal_t_matrix(&[Complex64::new(0.2, 0.0); 3], 1))?;
//!
//! let builder = KkrMatrixBuilder::new(config, &tables)?;
//! let energy = EnergyPoint::non_relativistic(0, Complex64::new(0.5, 0.01));
//! let m = builder.build_matrix(&liz, &store, &energy, 0, &mut KkrWorkspace::new())?;
//! assert_eq!(m.nrows(), 7 * 9);
//! # Ok(())
//! # }
//! ```

pub mod angular;
pub mod cli;
pub mod kkr;
pub mod liz;
pub mod tmatrix;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
