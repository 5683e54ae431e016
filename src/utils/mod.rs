/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Shared constants, unit conversions and linear algebra helpers

pub mod linear_algebra;

/// Physical and numerical constants
pub mod constants {
    /// 4π
    pub const PI4: f64 = 4.0 * std::f64::consts::PI;

    /// Bohr radius in Angstroms
    pub const BOHR_RADIUS: f64 = 0.529177;
}

/// Convert from Angstroms to Bohr radii
pub fn angstrom_to_bohr(angstrom: f64) -> f64 {
    angstrom / constants::BOHR_RADIUS
}

/// Convert from Bohr radii to Angstroms
pub fn bohr_to_angstrom(bohr: f64) -> f64 {
    bohr * constants::BOHR_RADIUS
}
