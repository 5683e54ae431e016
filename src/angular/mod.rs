/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Angular-momentum machinery for the KKR structure constants
//!
//! This module provides the channel index maps, the Gaunt coefficient table,
//! the i-power phase tables and the per-pair angular basis (Hankel terms,
//! normalized Legendre values, azimuthal powers and their Dlm combination).
//!
//! The tables are bundled in [`AngularTables`], an immutable context built
//! once for the largest cutoff of a run and shared by reference with every
//! matrix build.

mod basis;
mod gaunt;
mod ifactors;
mod indices;
mod scratch;

pub use basis::{
    dlm_term, hankel_terms, normalized_legendre, sin_cos_powers, AngularBasis, AZIMUTH_TOLERANCE,
};
pub use gaunt::GauntTable;
pub use ifactors::{i_pow, IFactors};
pub use indices::{channel_count, lm_index, plm_count, plm_index, AngularMomentumIndices};
pub use scratch::{ScratchArena, ScratchLayout, ScratchRegions};

/// Constant tables shared by every build of a run
#[derive(Debug, Clone)]
pub struct AngularTables {
    max_lmax: usize,
    indices: AngularMomentumIndices,
    gaunt: GauntTable,
    ifactors: IFactors,
}

impl AngularTables {
    /// Build all tables for site cutoffs up to `max_lmax`
    pub fn new(max_lmax: usize) -> Self {
        let indices = AngularMomentumIndices::new(max_lmax);
        let gaunt = GauntTable::new(max_lmax, &indices);
        let ifactors = IFactors::new(max_lmax, &indices);

        Self {
            max_lmax,
            indices,
            gaunt,
            ifactors,
        }
    }

    /// Largest site cutoff the tables cover
    pub fn max_lmax(&self) -> usize {
        self.max_lmax
    }

    pub fn indices(&self) -> &AngularMomentumIndices {
        &self.indices
    }

    pub fn gaunt(&self) -> &GauntTable {
        &self.gaunt
    }

    pub fn ifactors(&self) -> &IFactors {
        &self.ifactors
    }

    /// Scratch layout for evaluating any pair of sites covered by the tables
    pub fn scratch_layout(&self, tabulate_dlm: bool) -> ScratchLayout {
        ScratchLayout::for_max_lmax(self.max_lmax, tabulate_dlm)
    }
}
