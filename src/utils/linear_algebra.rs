/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Conversions between ndarray views and Faer matrices
//!
//! Matrix blocks live in ndarray storage; dense products go through Faer.

use faer::Mat;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

/// Copy an ndarray view (any strides) into a Faer matrix
pub fn view_to_faer(view: ArrayView2<'_, Complex64>) -> Mat<Complex64> {
    let (rows, cols) = view.dim();
    Mat::from_fn(rows, cols, |i, j| view[(i, j)])
}

/// Convert from faer::Mat<Complex64> to ndarray::Array2<Complex64>
pub fn faer_to_ndarray(matrix: &Mat<Complex64>) -> Array2<Complex64> {
    Array2::from_shape_fn((matrix.nrows(), matrix.ncols()), |(i, j)| matrix[(i, j)])
}

/// Dense product `a · b` computed by Faer
pub fn faer_product(a: ArrayView2<'_, Complex64>, b: ArrayView2<'_, Complex64>) -> Mat<Complex64> {
    let a_faer = view_to_faer(a);
    let b_faer = view_to_faer(b);
    &a_faer * &b_faer
}
