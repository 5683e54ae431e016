/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Real Gaunt coefficients for the structure-constant expansion
//!
//! The table entry `(j, lm1, lm2)` holds
//!
//! ```text
//! ∫ Y*_{l1 m1} Y_{l2 m2} Y*_{l3 m3} dΩ,   m3 = m2 - m1,   l3 = 2j + (l1 + l2) mod 2
//! ```
//!
//! so that for a fixed channel pair every l3 of the right parity maps to a
//! distinct `j = l3 / 2`.

use super::indices::{channel_count, AngularMomentumIndices};
use ndarray::Array3;
use std::f64::consts::PI;

/// Precomputed Gaunt coefficients indexed by (l3/2, lm1, lm2)
#[derive(Debug, Clone)]
pub struct GauntTable {
    lmax: usize,
    values: Array3<f64>,
}

impl GauntTable {
    /// Tabulate all coefficients coupling channels up to `lmax`
    pub fn new(lmax: usize, indices: &AngularMomentumIndices) -> Self {
        let kkrsz = channel_count(lmax);
        let factorials = FactorialTable::new(4 * lmax + 2);
        let mut values = Array3::<f64>::zeros((lmax + 1, kkrsz, kkrsz));

        for lm1 in 0..kkrsz {
            let l1 = indices.l_of(lm1) as i64;
            let m1 = indices.m_of(lm1) as i64;
            for lm2 in 0..kkrsz {
                let l2 = indices.l_of(lm2) as i64;
                let m2 = indices.m_of(lm2) as i64;
                let m3 = m2 - m1;

                let mut l3 = l1 + l2;
                while l3 >= (l1 - l2).abs() {
                    if m3.abs() <= l3 {
                        // Y*_{lm} = (-1)^m Y_{l,-m}
                        let phase = if (m1 + m3) % 2 == 0 { 1.0 } else { -1.0 };
                        let coupling =
                            real_gaunt(&factorials, l1, -m1, l2, m2, l3, -m3);
                        values[((l3 / 2) as usize, lm1, lm2)] = phase * coupling;
                    }
                    l3 -= 2;
                }
            }
        }

        Self { lmax, values }
    }

    /// Largest channel l covered by the table
    pub fn lmax(&self) -> usize {
        self.lmax
    }

    /// Coefficient for `l3 = 2j + parity` between channels `lm1` and `lm2`
    #[inline]
    pub fn get(&self, j: usize, lm1: usize, lm2: usize) -> f64 {
        self.values[(j, lm1, lm2)]
    }

    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }
}

/// ∫ Y_{l1 m1} Y_{l2 m2} Y_{l3 m3} dΩ
fn real_gaunt(
    factorials: &FactorialTable,
    l1: i64,
    m1: i64,
    l2: i64,
    m2: i64,
    l3: i64,
    m3: i64,
) -> f64 {
    let norm = (((2 * l1 + 1) * (2 * l2 + 1) * (2 * l3 + 1)) as f64 / (4.0 * PI)).sqrt();
    norm * wigner_3j(factorials, l1, l2, l3, 0, 0, 0) * wigner_3j(factorials, l1, l2, l3, m1, m2, m3)
}

fn triangle_condition(j1: i64, j2: i64, j3: i64) -> bool {
    j1 + j2 >= j3 && j1 + j3 >= j2 && j2 + j3 >= j1
}

/// Wigner 3j symbol from the Racah formula
pub(crate) fn wigner_3j(
    factorials: &FactorialTable,
    j1: i64,
    j2: i64,
    j3: i64,
    m1: i64,
    m2: i64,
    m3: i64,
) -> f64 {
    if m1 + m2 + m3 != 0 || !triangle_condition(j1, j2, j3) {
        return 0.0;
    }
    if m1.abs() > j1 || m2.abs() > j2 || m3.abs() > j3 {
        return 0.0;
    }

    let f = |n: i64| factorials.get(n);

    let delta = f(j1 + j2 - j3) * f(j1 - j2 + j3) * f(-j1 + j2 + j3) / f(j1 + j2 + j3 + 1);
    let norm = (f(j1 + m1) * f(j1 - m1) * f(j2 + m2) * f(j2 - m2) * f(j3 + m3) * f(j3 - m3)).sqrt();

    let k_min = 0.max(j2 - j3 - m1).max(j1 - j3 + m2);
    let k_max = (j1 + j2 - j3).min(j1 - m1).min(j2 + m2);

    let mut sum = 0.0;
    for k in k_min..=k_max {
        let denominator = f(k)
            * f(j3 - j2 + k + m1)
            * f(j3 - j1 + k - m2)
            * f(j1 + j2 - j3 - k)
            * f(j1 - k - m1)
            * f(j2 - k + m2);
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign / denominator;
    }

    let phase = if (j1 - j2 - m3).rem_euclid(2) == 0 { 1.0 } else { -1.0 };
    phase * delta.sqrt() * norm * sum
}

/// n! as f64 for 0 ≤ n ≤ max
pub(crate) struct FactorialTable {
    values: Vec<f64>,
}

impl FactorialTable {
    pub(crate) fn new(max: usize) -> Self {
        let mut values = Vec::with_capacity(max + 1);
        values.push(1.0);
        for n in 1..=max {
            let previous = values[n - 1];
            values.push(previous * n as f64);
        }
        Self { values }
    }

    #[inline]
    pub(crate) fn get(&self, n: i64) -> f64 {
        self.values[n as usize]
    }
}
