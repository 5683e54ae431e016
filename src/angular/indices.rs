/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Angular-momentum channel indexing
//!
//! Channels (l, m) with 0 ≤ l ≤ lmax and -l ≤ m ≤ l are stored under the
//! linear index k = l² + l + m. Legendre values P(l, m) with m ≥ 0 use the
//! triangular index l(l+1)/2 + m.

/// Number of (l, m) channels for an angular-momentum cutoff
pub fn channel_count(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 1)
}

/// Linear channel index of (l, m)
pub fn lm_index(l: usize, m: i32) -> usize {
    (l * l + l).wrapping_add_signed(m as isize)
}

/// Triangular index of the Legendre value P(l, m), m ≥ 0
pub fn plm_index(l: usize, m: usize) -> usize {
    l * (l + 1) / 2 + m
}

/// Number of Legendre values P(l, m) for 0 ≤ m ≤ l ≤ lmax
pub fn plm_count(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 2) / 2
}

/// Maps from a linear channel index to its l and m quantum numbers
#[derive(Debug, Clone, PartialEq)]
pub struct AngularMomentumIndices {
    lmax: usize,
    lofk: Vec<usize>,
    mofk: Vec<i32>,
}

impl AngularMomentumIndices {
    /// Build the index maps for every channel up to `lmax`
    pub fn new(lmax: usize) -> Self {
        let size = channel_count(lmax);
        let mut lofk = Vec::with_capacity(size);
        let mut mofk = Vec::with_capacity(size);

        for l in 0..=lmax {
            let l_signed = l as i32;
            for m in -l_signed..=l_signed {
                lofk.push(l);
                mofk.push(m);
            }
        }

        Self { lmax, lofk, mofk }
    }

    /// Largest l covered by the maps
    pub fn lmax(&self) -> usize {
        self.lmax
    }

    /// Number of channels covered by the maps
    pub fn len(&self) -> usize {
        self.lofk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lofk.is_empty()
    }

    /// l of the channel with linear index `k`
    #[inline]
    pub fn l_of(&self, k: usize) -> usize {
        self.lofk[k]
    }

    /// m of the channel with linear index `k`
    #[inline]
    pub fn m_of(&self, k: usize) -> i32 {
        self.mofk[k]
    }
}
