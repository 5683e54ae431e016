/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Reusable storage for KKR matrix builds

use ndarray::Array2;
use num_complex::Complex64;

/// Buffers owned across builds: the BGij structure-constant matrix and the
/// site offset list.
///
/// Storage is only reallocated when the matrix dimension changes, otherwise
/// it is cleared in place.
#[derive(Debug, Clone, Default)]
pub struct KkrWorkspace {
    bgij: Array2<Complex64>,
    offsets: Vec<usize>,
}

impl KkrWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace with BGij pre-allocated for a matrix of order `dimension`
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            bgij: Array2::zeros((dimension, dimension)),
            offsets: Vec::new(),
        }
    }

    /// Zero BGij at order `dimension`, reallocating only on a size change
    pub(crate) fn prepare(&mut self, dimension: usize) {
        if self.bgij.dim() == (dimension, dimension) {
            self.bgij.fill(Complex64::new(0.0, 0.0));
        } else {
            self.bgij = Array2::zeros((dimension, dimension));
        }
    }

    /// Structure constants of the last build
    pub fn bgij(&self) -> &Array2<Complex64> {
        &self.bgij
    }

    /// Site offsets of the last build
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Order of the BGij matrix currently held
    pub fn dimension(&self) -> usize {
        self.bgij.nrows()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Array2<Complex64>, &mut Vec<usize>) {
        (&mut self.bgij, &mut self.offsets)
    }
}
