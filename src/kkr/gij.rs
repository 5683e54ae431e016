/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Free-electron structure constants of one site pair
//!
//! ```text
//! G(lm2, lm1) = 4π · i^(l2-l1) · Σ_{l3} C(l3; lm1, lm2) · Dlm(l3, m2 - m1)
//! ```
//!
//! with l3 running from l1 + l2 down to max(|m2 - m1|, |l1 - l2|) in steps
//! of two. At zero energy only the l3 = l1 + l2 term is kept.

use crate::angular::{AngularBasis, AngularTables};
use crate::utils::constants::PI4;
use ndarray::{ArrayViewMut2, Zip};
use num_complex::Complex64;

/// One structure-constant element for channels `lm2` (row) and `lm1` (column)
#[inline]
pub fn gij_element(
    basis: &AngularBasis<'_>,
    tables: &AngularTables,
    lm2: usize,
    lm1: usize,
    static_limit: bool,
) -> Complex64 {
    let indices = tables.indices();
    let gaunt = tables.gaunt();

    let l1 = indices.l_of(lm1);
    let m1 = indices.m_of(lm1);
    let l2 = indices.l_of(lm2);
    let m2 = indices.m_of(lm2);
    let m3 = m2 - m1;

    let lhigh = l1 + l2;
    let llow = if static_limit {
        lhigh
    } else {
        (m3.unsigned_abs() as usize).max(l1.abs_diff(l2))
    };

    let mut sum = Complex64::new(0.0, 0.0);
    for l3 in (llow..=lhigh).rev().step_by(2) {
        sum += gaunt.get(l3 / 2, lm1, lm2) * basis.dlm(l3, m3);
    }

    sum * PI4 * tables.ifactors().illp(lm2, lm1)
}

/// Fill `block` (shape `kkri × kkrj`) with the structure constants of a pair.
///
/// The elements are independent and are written in parallel straight into
/// the view.
pub fn fill_gij_block(
    basis: &AngularBasis<'_>,
    tables: &AngularTables,
    prel: Complex64,
    block: ArrayViewMut2<'_, Complex64>,
) {
    let static_limit = prel.norm() == 0.0;

    Zip::indexed(block).par_for_each(|(lm2, lm1), value| {
        *value = gij_element(basis, tables, lm2, lm1, static_limit);
    });
}
