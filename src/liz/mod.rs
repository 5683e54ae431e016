/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Local interaction zone (LIZ)
//!
//! The LIZ is the finite cluster of neighbouring sites that enters one atom's
//! multiple-scattering problem. It is read-only for the duration of a matrix
//! build.

pub mod errors;
mod site;
mod vector;

pub use errors::{LizError, Result};
pub use site::LizSite;
pub use vector::Vector3D;

/// Separation below which two sites are considered coincident (Bohr)
const COINCIDENCE_TOLERANCE: f64 = 1.0e-10;

/// Validated list of LIZ sites
#[derive(Debug, Clone, PartialEq)]
pub struct LocalInteractionZone {
    sites: Vec<LizSite>,
}

impl LocalInteractionZone {
    /// Create a LIZ from its sites.
    ///
    /// Fails on an empty list and on two sites at the same position, since
    /// the structure constants of a zero separation are undefined.
    pub fn new(sites: Vec<LizSite>) -> Result<Self> {
        if sites.is_empty() {
            return Err(LizError::Empty);
        }

        for (i, first) in sites.iter().enumerate() {
            for (j, second) in sites.iter().enumerate().skip(i + 1) {
                if first.position.distance(&second.position) < COINCIDENCE_TOLERANCE {
                    return Err(LizError::CoincidentSites {
                        first: i,
                        second: j,
                        position: first.position.to_string(),
                    });
                }
            }
        }

        Ok(Self { sites })
    }

    /// Sites of a simple cubic lattice within `radius` of the origin, all
    /// with the same cutoff and store entry 0, nearest first.
    pub fn simple_cubic(lattice_constant: f64, radius: f64, lmax: usize) -> Result<Self> {
        if lattice_constant <= 0.0 || radius < 0.0 {
            return Err(LizError::InvalidParameter(format!(
                "lattice constant {} and radius {} must be positive",
                lattice_constant, radius
            )));
        }

        let extent = (radius / lattice_constant).floor() as i64;
        let mut positions = Vec::new();
        for i in -extent..=extent {
            for j in -extent..=extent {
                for k in -extent..=extent {
                    let position = Vector3D::new(i as f64, j as f64, k as f64).scale(lattice_constant);
                    if position.length() <= radius + COINCIDENCE_TOLERANCE {
                        positions.push(position);
                    }
                }
            }
        }
        positions.sort_by(|a, b| a.length().total_cmp(&b.length()));

        let sites = positions
            .into_iter()
            .map(|position| LizSite::new(position, lmax, 0))
            .collect();
        Self::new(sites)
    }

    /// Number of sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn sites(&self) -> &[LizSite] {
        &self.sites
    }

    /// Separation vector `r_i - r_j`
    pub fn separation(&self, i: usize, j: usize) -> Vector3D {
        self.sites[i].position - self.sites[j].position
    }

    /// Largest site cutoff
    pub fn max_lmax(&self) -> usize {
        self.sites.iter().map(|site| site.lmax).max().unwrap_or(0)
    }

    /// Sum of the per-site channel counts
    pub fn total_kkr_size(&self) -> usize {
        self.sites.iter().map(LizSite::kkr_size).sum()
    }

    /// First site whose cutoff differs from `lmax`, with its cutoff
    pub fn first_lmax_mismatch(&self, lmax: usize) -> Option<(usize, usize)> {
        self.sites
            .iter()
            .enumerate()
            .find(|(_, site)| site.lmax != lmax)
            .map(|(index, site)| (index, site.lmax))
    }

    /// Check that every cutoff is covered by tables built for `max_lmax`
    pub fn check_lmax(&self, max_lmax: usize) -> Result<()> {
        match self
            .sites
            .iter()
            .enumerate()
            .find(|(_, site)| site.lmax > max_lmax)
        {
            Some((site, s)) => Err(LizError::LmaxTooLarge {
                site,
                lmax: s.lmax,
                max_lmax,
            }),
            None => Ok(()),
        }
    }
}
