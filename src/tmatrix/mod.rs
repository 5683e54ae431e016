/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Per-site single-scattering t-matrices
//!
//! The store is one complex table with a column per store entry (one per
//! distinct scatterer) and, down each column, one block per energy point.
//! A block holds `spin_blocks` square matrices of order `leading_dim`, each
//! in column-major order:
//!
//! ```text
//! row(energy, spin, i, j) = energy * block_size + spin * leading_dim² + j * leading_dim + i
//! ```
//!
//! `leading_dim` is the channel count of the largest site times the spin-cant
//! factor. Sites with a smaller cutoff use the leading corner of every spin
//! quadrant.

pub mod errors;

pub use errors::{Result, TMatrixError};

use crate::angular::channel_count;
use ndarray::Array2;
use num_complex::Complex64;

/// How a site's t-matrix is cut out of its stored block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TMatrixExtraction {
    /// Unpolarized or spin-canted storage: one matrix of order
    /// `leading_dim` whose spin quadrants are `leading_dim / spin_cant` wide.
    Canted { spin_cant: usize },
    /// Collinear spin-polarized storage: one matrix per spin direction, the
    /// one for `spin` is extracted.
    Collinear { spin: usize },
}

/// Table of t-matrices for every store entry and energy point
#[derive(Debug, Clone)]
pub struct TMatrixStore {
    data: Array2<Complex64>,
    leading_dim: usize,
    spin_blocks: usize,
    energy_count: usize,
}

impl TMatrixStore {
    /// Zero-filled store.
    ///
    /// `leading_dim` is the order of one stored matrix, `spin_blocks` is 2 for
    /// collinear spin-polarized storage and 1 otherwise.
    pub fn new(leading_dim: usize, spin_blocks: usize, energy_count: usize, entries: usize) -> Self {
        let block_size = leading_dim * leading_dim * spin_blocks;
        Self {
            data: Array2::zeros((energy_count * block_size, entries)),
            leading_dim,
            spin_blocks,
            energy_count,
        }
    }

    /// Order of one stored matrix
    pub fn leading_dim(&self) -> usize {
        self.leading_dim
    }

    /// Number of stored elements per energy point and entry
    pub fn block_size(&self) -> usize {
        self.leading_dim * self.leading_dim * self.spin_blocks
    }

    /// Rows of the backing table, the stride between two entries
    pub fn table_leading_dim(&self) -> usize {
        self.data.nrows()
    }

    pub fn spin_blocks(&self) -> usize {
        self.spin_blocks
    }

    pub fn energy_count(&self) -> usize {
        self.energy_count
    }

    pub fn entry_count(&self) -> usize {
        self.data.ncols()
    }

    fn check(&self, energy: usize, entry: usize, spin: usize) -> Result<()> {
        if energy >= self.energy_count {
            return Err(TMatrixError::EnergyOutOfRange {
                index: energy,
                count: self.energy_count,
            });
        }
        if entry >= self.entry_count() {
            return Err(TMatrixError::EntryOutOfRange {
                index: entry,
                count: self.entry_count(),
            });
        }
        if spin >= self.spin_blocks {
            return Err(TMatrixError::SpinBlockOutOfRange {
                index: spin,
                count: self.spin_blocks,
            });
        }
        Ok(())
    }

    #[inline]
    fn row(&self, energy: usize, spin: usize, i: usize, j: usize) -> usize {
        energy * self.block_size()
            + spin * self.leading_dim * self.leading_dim
            + j * self.leading_dim
            + i
    }

    /// Store the full matrix of one spin block
    pub fn set_block(
        &mut self,
        energy: usize,
        entry: usize,
        spin: usize,
        matrix: &Array2<Complex64>,
    ) -> Result<()> {
        self.check(energy, entry, spin)?;
        if matrix.dim() != (self.leading_dim, self.leading_dim) {
            return Err(TMatrixError::ShapeMismatch(format!(
                "expected {}x{}, got {:?}",
                self.leading_dim,
                self.leading_dim,
                matrix.dim()
            )));
        }

        for ((i, j), &value) in matrix.indexed_iter() {
            let row = self.row(energy, spin, i, j);
            self.data[(row, entry)] = value;
        }
        Ok(())
    }

    /// The full stored matrix of one spin block
    pub fn block(&self, energy: usize, entry: usize, spin: usize) -> Result<Array2<Complex64>> {
        self.check(energy, entry, spin)?;
        Ok(Array2::from_shape_fn(
            (self.leading_dim, self.leading_dim),
            |(i, j)| self.data[(self.row(energy, spin, i, j), entry)],
        ))
    }

    /// Cut out the t-matrix of a site with `kkr` channels.
    ///
    /// The result has order `kkr * spin_cant` for canted storage and `kkr`
    /// for collinear storage.
    pub fn extract(
        &self,
        energy: usize,
        entry: usize,
        kkr: usize,
        mode: TMatrixExtraction,
    ) -> Result<Array2<Complex64>> {
        match mode {
            TMatrixExtraction::Canted { spin_cant } => {
                self.check(energy, entry, 0)?;
                if spin_cant == 0 || self.leading_dim % spin_cant != 0 {
                    return Err(TMatrixError::ShapeMismatch(format!(
                        "leading dimension {} is not divisible by spin_cant {}",
                        self.leading_dim, spin_cant
                    )));
                }
                let kkrsz = self.leading_dim / spin_cant;
                if kkr > kkrsz {
                    return Err(TMatrixError::ShapeMismatch(format!(
                        "site needs {} channels, store quadrants hold {}",
                        kkr, kkrsz
                    )));
                }

                let order = kkr * spin_cant;
                Ok(Array2::from_shape_fn((order, order), |(row, col)| {
                    let (is, i) = (row / kkr, row % kkr);
                    let (js, j) = (col / kkr, col % kkr);
                    self.data[(self.row(energy, 0, is * kkrsz + i, js * kkrsz + j), entry)]
                }))
            }
            TMatrixExtraction::Collinear { spin } => {
                self.check(energy, entry, spin)?;
                if kkr > self.leading_dim {
                    return Err(TMatrixError::ShapeMismatch(format!(
                        "site needs {} channels, store blocks hold {}",
                        kkr, self.leading_dim
                    )));
                }

                Ok(Array2::from_shape_fn((kkr, kkr), |(i, j)| {
                    self.data[(self.row(energy, spin, i, j), entry)]
                }))
            }
        }
    }
}

/// Spin-diagonal t-matrix built from phase shifts, t_l = i (e^{iδ_l} - 1)
/// on every channel of l, repeated in each diagonal spin quadrant.
pub fn diagonal_t_matrix(phase_shifts: &[Complex64], spin_cant: usize) -> Array2<Complex64> {
    let lmax = phase_shifts.len().saturating_sub(1);
    let kkr = channel_count(lmax);
    let t_values: Vec<Complex64> = phase_shifts
        .iter()
        .map(|&phase| Complex64::new(0.0, 1.0) * ((phase * Complex64::i()).exp() - 1.0))
        .collect();

    let order = kkr * spin_cant;
    let mut t_matrix = Array2::<Complex64>::zeros((order, order));
    for spin in 0..spin_cant {
        let mut offset = spin * kkr;
        for (l, &t_l) in t_values.iter().enumerate() {
            for _ in 0..(2 * l + 1) {
                t_matrix[(offset, offset)] = t_l;
                offset += 1;
            }
        }
    }
    t_matrix
}
