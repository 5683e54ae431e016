/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Powers of the imaginary unit used as phase factors

use super::indices::{channel_count, AngularMomentumIndices};
use ndarray::Array2;
use num_complex::Complex64;

/// i^n for any integer n, exact
pub fn i_pow(n: i64) -> Complex64 {
    match n.rem_euclid(4) {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

/// Phase tables `ilp1[l] = i^(l+1)` and `illp[(lm2, lm1)] = i^(l2-l1)`
#[derive(Debug, Clone)]
pub struct IFactors {
    ilp1: Vec<Complex64>,
    illp: Array2<Complex64>,
}

impl IFactors {
    /// `ilp1` covers l up to 2·lmax (the largest l3 of the Gaunt sum)
    pub fn new(lmax: usize, indices: &AngularMomentumIndices) -> Self {
        let ilp1 = (0..=2 * lmax).map(|l| i_pow(l as i64 + 1)).collect();

        let kkrsz = channel_count(lmax);
        let illp = Array2::from_shape_fn((kkrsz, kkrsz), |(lm2, lm1)| {
            i_pow(indices.l_of(lm2) as i64 - indices.l_of(lm1) as i64)
        });

        Self { ilp1, illp }
    }

    pub fn ilp1(&self) -> &[Complex64] {
        &self.ilp1
    }

    #[inline]
    pub fn illp(&self, lm2: usize, lm1: usize) -> Complex64 {
        self.illp[(lm2, lm1)]
    }
}
