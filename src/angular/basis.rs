/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Angular basis for one pair of sites
//!
//! For a separation vector R between two sites this evaluates, up to the
//! combined cutoff `lend = lmax_i + lmax_j`:
//!
//! * the scaled outgoing Hankel terms `hfn[l] = -i^(l+1) · κ · h_l(κR)`,
//! * the normalized associated Legendre values of cos θ,
//! * cos(mφ) and sin(mφ),
//!
//! and combines them into `Dlm(l, m) = hfn[l] · Y*_{lm}(R̂)`.
//!
//! Every routine here is a serial recurrence; the pair's channel sums only
//! start once `AngularBasis::evaluate` has returned.

use super::indices::{lm_index, plm_index};
use super::scratch::ScratchRegions;
use crate::liz::Vector3D;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Below this projected length the azimuth is treated as undefined
pub const AZIMUTH_TOLERANCE: f64 = 1.0e-6;

/// Fill `hfn[0..=lend]` with the scaled Hankel terms for wavenumber `prel`
/// at distance `r`.
///
/// Uses the upward recurrence of `z e^{-iz} h_l(z)` starting from
/// `-i` and `-1 - i/z`. For `prel == 0` the terms are replaced by their
/// renormalized static limit `i^(l+2) (2l-1)!! / r^(l+1)`, which is finite and
/// only ever enters through the single l3 = l1 + l2 term of the Gaunt sum.
pub fn hankel_terms(prel: Complex64, r: f64, lend: usize, ilp1: &[Complex64], hfn: &mut [Complex64]) {
    let sqrtm1 = Complex64::new(0.0, 1.0);

    if prel.norm() == 0.0 {
        let mut radial = 1.0 / r;
        for l in 0..=lend {
            hfn[l] = sqrtm1 * radial * ilp1[l];
            radial *= (2 * l + 1) as f64 / r;
        }
        return;
    }

    let z = prel * r;
    hfn[0] = Complex64::new(0.0, -1.0);
    if lend >= 1 {
        hfn[1] = Complex64::new(-1.0, 0.0) - sqrtm1 / z;
    }
    for l in 1..lend {
        hfn[l + 1] = (2 * l + 1) as f64 * hfn[l] / z - hfn[l - 1];
    }

    let scale = (sqrtm1 * z).exp() / r;
    for l in 0..=lend {
        hfn[l] = (-hfn[l] * scale) * ilp1[l];
    }
}

/// Normalized associated Legendre values P(l, m)(x) for 0 ≤ m ≤ l ≤ lmax,
/// stored at `plm_index(l, m)`.
///
/// Normalized so that P(0, 0) = sqrt(1/4π) and P(l, m)(cos θ) e^{imφ} is the
/// spherical harmonic Y_lm (Condon-Shortley phase included).
pub fn normalized_legendre(x: f64, lmax: usize, plm: &mut [f64]) {
    let y = (1.0 - x * x).max(0.0).sqrt();
    plm[0] = (1.0 / (4.0 * PI)).sqrt();

    if lmax < 1 {
        return;
    }

    for m in 1..=lmax {
        let diagonal = plm[plm_index(m - 1, m - 1)];
        plm[plm_index(m, m)] = -((2 * m + 1) as f64 / (2 * m) as f64).sqrt() * y * diagonal;
        plm[plm_index(m, m - 1)] = ((2 * m + 1) as f64).sqrt() * x * diagonal;
    }

    for m in 0..lmax {
        for l in (m + 2)..=lmax {
            let a_lm = ((4 * l * l - 1) as f64 / (l * l - m * m) as f64).sqrt();
            let b_lm =
                (((l - 1) * (l - 1) - m * m) as f64 / (4 * (l - 1) * (l - 1) - 1) as f64).sqrt();
            plm[plm_index(l, m)] =
                a_lm * (x * plm[plm_index(l - 1, m)] - b_lm * plm[plm_index(l - 2, m)]);
        }
    }
}

/// cos(mφ) and sin(mφ) for 0 ≤ m ≤ lend, by angle addition from the
/// projection of `rij` on the xy-plane.
///
/// On the polar axis the first harmonic is set to zero, so every m ≥ 1 power
/// is zero as well.
pub fn sin_cos_powers(rij: &Vector3D, lend: usize, sinmp: &mut [f64], cosmp: &mut [f64]) {
    let pmag = rij.planar_length();
    cosmp[0] = 1.0;
    sinmp[0] = 0.0;

    if lend < 1 {
        return;
    }

    if pmag > AZIMUTH_TOLERANCE {
        cosmp[1] = rij.x / pmag;
        sinmp[1] = rij.y / pmag;
    } else {
        cosmp[1] = 0.0;
        sinmp[1] = 0.0;
    }

    for m in 2..=lend {
        cosmp[m] = cosmp[m - 1] * cosmp[1] - sinmp[m - 1] * sinmp[1];
        sinmp[m] = sinmp[m - 1] * cosmp[1] + cosmp[m - 1] * sinmp[1];
    }
}

/// Combine the Hankel, Legendre and azimuthal terms into Dlm(l, m)
#[inline]
pub fn dlm_term(
    hfn: &[Complex64],
    cosmp: &[f64],
    sinmp: &[f64],
    plm: &[f64],
    l: usize,
    m: i32,
) -> Complex64 {
    let m_abs = m.unsigned_abs() as usize;
    let dlm = hfn[l] * plm[plm_index(l, m_abs)];

    if m == 0 {
        return dlm;
    }

    if m < 0 {
        let dlm = dlm * Complex64::new(cosmp[m_abs], sinmp[m_abs]);
        if m_abs % 2 == 1 {
            -dlm
        } else {
            dlm
        }
    } else {
        dlm * Complex64::new(cosmp[m_abs], -sinmp[m_abs])
    }
}

/// Angular basis of one site pair, evaluated into borrowed scratch space
#[derive(Debug)]
pub struct AngularBasis<'a> {
    lend: usize,
    hfn: &'a [Complex64],
    sinmp: &'a [f64],
    cosmp: &'a [f64],
    plm: &'a [f64],
    dlm: Option<&'a [Complex64]>,
}

impl<'a> AngularBasis<'a> {
    /// Evaluate the basis for separation `rij` up to `lend`.
    ///
    /// With `tabulate` set, every Dlm(l, m) with l ≤ lend is written to the
    /// arena's Dlm region and later lookups read from it; the values are
    /// identical to the ones computed on demand.
    pub fn evaluate(
        regions: ScratchRegions<'a>,
        rij: &Vector3D,
        prel: Complex64,
        lend: usize,
        ilp1: &[Complex64],
        tabulate: bool,
    ) -> Self {
        let ScratchRegions {
            hfn,
            dlm,
            sinmp,
            cosmp,
            plm,
        } = regions;

        let r = rij.length();
        let cos_theta = rij.z / r;

        hankel_terms(prel, r, lend, ilp1, hfn);
        normalized_legendre(cos_theta, lend, plm);
        sin_cos_powers(rij, lend, sinmp, cosmp);

        let dlm = if tabulate {
            for l in 0..=lend {
                let l_signed = l as i32;
                for m in -l_signed..=l_signed {
                    dlm[lm_index(l, m)] = dlm_term(hfn, cosmp, sinmp, plm, l, m);
                }
            }
            Some(&*dlm)
        } else {
            None
        };

        Self {
            lend,
            hfn,
            sinmp,
            cosmp,
            plm,
            dlm,
        }
    }

    /// Combined cutoff the basis was evaluated for
    pub fn lend(&self) -> usize {
        self.lend
    }

    #[inline]
    pub fn dlm(&self, l: usize, m: i32) -> Complex64 {
        match self.dlm {
            Some(table) => table[lm_index(l, m)],
            None => dlm_term(self.hfn, self.cosmp, self.sinmp, self.plm, l, m),
        }
    }

    pub fn hankel(&self) -> &[Complex64] {
        &self.hfn[..=self.lend]
    }

    pub fn legendre(&self) -> &[f64] {
        self.plm
    }

    pub fn cos_powers(&self) -> &[f64] {
        &self.cosmp[..=self.lend]
    }

    pub fn sin_powers(&self) -> &[f64] {
        &self.sinmp[..=self.lend]
    }
}
