/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! A single entry of the local interaction zone

use super::vector::Vector3D;
use crate::angular::channel_count;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Site of the local interaction zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LizSite {
    /// Cartesian position in Bohr
    pub position: Vector3D,
    /// Angular-momentum cutoff
    pub lmax: usize,
    /// Column of the t-matrix store holding this site's t-matrices
    pub store_index: usize,
}

impl LizSite {
    pub fn new(position: Vector3D, lmax: usize, store_index: usize) -> Self {
        Self {
            position,
            lmax,
            store_index,
        }
    }

    /// Number of (l, m) channels, (lmax + 1)²
    pub fn kkr_size(&self) -> usize {
        channel_count(self.lmax)
    }
}

impl fmt::Display for LizSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lmax={} store={}",
            self.position, self.lmax, self.store_index
        )
    }
}
