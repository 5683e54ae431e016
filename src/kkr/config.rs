/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Run-wide configuration of the KKR matrix build

use super::errors::{KkrError, Result};
use crate::tmatrix::TMatrixExtraction;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Spin treatment of the calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPolarization {
    /// No spin polarization, spin_cant = 1
    #[default]
    Unpolarized,
    /// Non-collinear (canted) spins, spin_cant = 2
    Canted,
    /// Collinear spin polarization, one spin channel per build, spin_cant = 1
    Collinear,
}

/// Relativistic treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relativity {
    #[default]
    NonRelativistic,
    /// Fully relativistic structure constants (not implemented)
    Full,
}

/// Where the Dlm terms of the Gaunt sum come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DlmMode {
    /// Evaluate each Dlm inside the sum
    #[default]
    OnTheFly,
    /// Tabulate all Dlm of a pair in scratch first
    Tabulated,
}

/// How the -T·BGij products are formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplyBackend {
    /// One serial accumulation per output element
    #[default]
    Accumulate,
    /// Dense block product through faer
    Gemm,
}

/// KKR build configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KkrConfig {
    /// Global maximum angular-momentum cutoff
    pub max_lmax: usize,
    /// Spin-cant factor, 1 or 2
    pub spin_cant: usize,
    pub spin_polarization: SpinPolarization,
    pub relativity: Relativity,
    pub dlm_mode: DlmMode,
    pub multiply_backend: MultiplyBackend,
    /// Use the collinear spin-polarized t-matrix extraction even though it
    /// has no reference results to validate against
    pub allow_unverified_collinear: bool,
}

impl Default for KkrConfig {
    fn default() -> Self {
        Self {
            max_lmax: 3,
            spin_cant: 1,
            spin_polarization: SpinPolarization::Unpolarized,
            relativity: Relativity::NonRelativistic,
            dlm_mode: DlmMode::OnTheFly,
            multiply_backend: MultiplyBackend::Accumulate,
            allow_unverified_collinear: false,
        }
    }
}

impl KkrConfig {
    /// Configuration with the given cutoff and spin treatment, defaults
    /// elsewhere
    pub fn new(max_lmax: usize, spin_polarization: SpinPolarization) -> Self {
        let spin_cant = match spin_polarization {
            SpinPolarization::Canted => 2,
            SpinPolarization::Unpolarized | SpinPolarization::Collinear => 1,
        };
        Self {
            max_lmax,
            spin_cant,
            spin_polarization,
            ..Self::default()
        }
    }

    /// Check that the spin settings agree with each other
    pub fn validate(&self) -> Result<()> {
        let expected = match self.spin_polarization {
            SpinPolarization::Canted => 2,
            SpinPolarization::Unpolarized | SpinPolarization::Collinear => 1,
        };
        if self.spin_cant != expected {
            return Err(KkrError::InvalidParameter(format!(
                "spin_cant {} does not match spin polarization {:?} (expected {})",
                self.spin_cant, self.spin_polarization, expected
            )));
        }
        Ok(())
    }

    /// T-matrix extraction mode for spin channel `ispin`
    pub fn extraction(&self, ispin: usize) -> TMatrixExtraction {
        match self.spin_polarization {
            SpinPolarization::Collinear => TMatrixExtraction::Collinear { spin: ispin },
            SpinPolarization::Unpolarized | SpinPolarization::Canted => TMatrixExtraction::Canted {
                spin_cant: self.spin_cant,
            },
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
