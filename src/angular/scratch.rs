/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Per-worker scratch space for the angular basis
//!
//! One arena holds the five regions the basis evaluation needs (Hankel terms,
//! sine powers, cosine powers, Legendre values and the optional tabulated
//! Dlm terms). Complex regions share one contiguous buffer and real regions
//! another; `ScratchArena::regions` hands out disjoint typed slices.

use super::indices::plm_count;
use num_complex::Complex64;

/// Sizes of the scratch regions for a given global cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchLayout {
    pub hfn_len: usize,
    pub sinmp_len: usize,
    pub cosmp_len: usize,
    pub plm_len: usize,
    pub dlm_len: usize,
}

impl ScratchLayout {
    /// Layout for pairs of sites whose cutoffs are at most `max_lmax`.
    ///
    /// The combined cutoff of a pair is at most `2 * max_lmax`; the Dlm region
    /// is only reserved when `tabulate_dlm` is set.
    pub fn for_max_lmax(max_lmax: usize, tabulate_dlm: bool) -> Self {
        let lend = 2 * max_lmax;
        Self {
            hfn_len: lend + 1,
            sinmp_len: lend + 1,
            cosmp_len: lend + 1,
            plm_len: plm_count(lend),
            dlm_len: if tabulate_dlm { (lend + 1) * (lend + 1) } else { 0 },
        }
    }

    pub fn complex_len(&self) -> usize {
        self.hfn_len + self.dlm_len
    }

    pub fn real_len(&self) -> usize {
        self.sinmp_len + self.cosmp_len + self.plm_len
    }

    /// Total scratch footprint in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.complex_len() * std::mem::size_of::<Complex64>()
            + self.real_len() * std::mem::size_of::<f64>()
    }
}

/// Typed views into one arena, all borrowed for the same lifetime
#[derive(Debug)]
pub struct ScratchRegions<'a> {
    pub hfn: &'a mut [Complex64],
    pub dlm: &'a mut [Complex64],
    pub sinmp: &'a mut [f64],
    pub cosmp: &'a mut [f64],
    pub plm: &'a mut [f64],
}

/// Backing storage for `ScratchRegions`
#[derive(Debug, Clone)]
pub struct ScratchArena {
    layout: ScratchLayout,
    complex: Vec<Complex64>,
    real: Vec<f64>,
}

impl ScratchArena {
    pub fn new(layout: ScratchLayout) -> Self {
        Self {
            layout,
            complex: vec![Complex64::new(0.0, 0.0); layout.complex_len()],
            real: vec![0.0; layout.real_len()],
        }
    }

    /// Split the arena into its regions
    pub fn regions(&mut self) -> ScratchRegions<'_> {
        let layout = self.layout;

        let (hfn, dlm) = self.complex.split_at_mut(layout.hfn_len);
        let (sinmp, rest) = self.real.split_at_mut(layout.sinmp_len);
        let (cosmp, plm) = rest.split_at_mut(layout.cosmp_len);

        ScratchRegions {
            hfn,
            dlm,
            sinmp,
            cosmp,
            plm,
        }
    }
}
