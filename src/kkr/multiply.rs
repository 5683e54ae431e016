/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Off-diagonal KKR blocks, `M_ij = -t_i · BGij_ij`

use super::bgij::row_bands;
use super::config::MultiplyBackend;
use super::errors::{KkrError, Result};
use super::layout::band_heights;
use crate::utils::linear_algebra::faer_product;
use ndarray::{s, Array2, ArrayView2, ArrayViewMut2};
use num_complex::Complex64;
use rayon::prelude::*;

/// `out = -t · b`, each element accumulated serially over the contraction
/// index in increasing order
pub fn multiply_subtract_accumulate(
    t: ArrayView2<'_, Complex64>,
    b: ArrayView2<'_, Complex64>,
    mut out: ArrayViewMut2<'_, Complex64>,
) {
    let (rows, cols) = out.dim();
    let inner = t.ncols();
    for j in 0..cols {
        for i in 0..rows {
            let mut m = Complex64::new(0.0, 0.0);
            for k in 0..inner {
                m -= t[(i, k)] * b[(k, j)];
            }
            out[(i, j)] = m;
        }
    }
}

/// `out = -t · b` through a dense Faer product
pub fn multiply_subtract_gemm(
    t: ArrayView2<'_, Complex64>,
    b: ArrayView2<'_, Complex64>,
    mut out: ArrayViewMut2<'_, Complex64>,
) {
    let product = faer_product(t, b);
    out.indexed_iter_mut()
        .for_each(|((i, j), value)| *value = -product[(i, j)]);
}

/// Write every off-diagonal block of `m` from the site t-matrices and BGij.
///
/// `t_matrices[i]` is the t-matrix of site `i`, whose order is also the
/// height of that site's block, and `offsets` must be the running sums of
/// those orders. Diagonal blocks of `m` are left untouched.
pub fn multiply_off_diagonal(
    t_matrices: &[Array2<Complex64>],
    offsets: &[usize],
    bgij: &Array2<Complex64>,
    backend: MultiplyBackend,
    m: &mut Array2<Complex64>,
) -> Result<()> {
    if let Some((site, t)) = t_matrices.iter().enumerate().find(|(_, t)| !t.is_square()) {
        return Err(KkrError::DimensionMismatch(format!(
            "t-matrix of site {} is {:?}, expected square",
            site,
            t.dim()
        )));
    }
    let (rows, cols) = m.dim();
    if rows != cols || bgij.dim() != m.dim() {
        return Err(KkrError::DimensionMismatch(format!(
            "KKR matrix is {:?} and BGij {:?}, both must be the same square shape",
            m.dim(),
            bgij.dim()
        )));
    }

    let orders: Vec<usize> = t_matrices.iter().map(|t| t.nrows()).collect();
    let heights = band_heights(offsets, &orders, rows)?;
    let bands = row_bands(m.view_mut(), heights.iter().copied());

    bands
        .into_par_iter()
        .enumerate()
        .for_each(|(ir1, mut band)| {
            let t = t_matrices[ir1].view();
            let row = offsets[ir1];

            for (ir2, &column) in offsets.iter().enumerate() {
                if ir1 == ir2 {
                    continue;
                }
                let width = heights[ir2];
                let b = bgij.slice(s![row..row + heights[ir1], column..column + width]);
                let out = band.slice_mut(s![.., column..column + width]);

                match backend {
                    MultiplyBackend::Accumulate => multiply_subtract_accumulate(t, b, out),
                    MultiplyBackend::Gemm => multiply_subtract_gemm(t, b, out),
                }
            }
        });

    Ok(())
}
