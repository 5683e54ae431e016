/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Command Line Interface (CLI) module
//!
//! Builds the KKR matrix of a simple cubic cluster with constant phase shifts
//! and reports its size and norms as JSON.

use crate::angular::{channel_count, AngularTables};
use crate::kkr::{
    BlockLayout, DlmMode, EnergyPoint, KkrConfig, KkrMatrixBuilder, KkrWorkspace, MultiplyBackend,
    SpinPolarization,
};
use crate::liz::LocalInteractionZone;
use crate::tmatrix::{diagonal_t_matrix, TMatrixStore};
use crate::utils::{angstrom_to_bohr, bohr_to_angstrom};
use anyhow::Context;
use clap::Parser;
use num_complex::Complex64;
use serde::Serialize;
use std::path::PathBuf;

/// Command line arguments
#[derive(Debug, Clone, Parser)]
#[command(name = "kkr-rs", version, about = "Assemble a KKR multiple-scattering matrix")]
pub struct Cli {
    /// JSON file with the build configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simple cubic lattice constant
    #[arg(long, default_value_t = 3.0)]
    pub lattice: f64,

    /// Cluster radius, in the same unit as the lattice constant
    #[arg(long, default_value_t = 3.0)]
    pub radius: f64,

    /// Lengths are given in Angstrom instead of Bohr
    #[arg(long)]
    pub angstrom: bool,

    /// Angular-momentum cutoff of every site (ignored with --config)
    #[arg(long, default_value_t = 2)]
    pub lmax: usize,

    /// Use two spin channels (ignored with --config)
    #[arg(long)]
    pub canted: bool,

    /// Real part of the energy (Ry)
    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    pub energy: f64,

    /// Imaginary part of the energy (Ry)
    #[arg(long, default_value_t = 0.01)]
    pub energy_im: f64,

    /// Phase shift of every partial wave (radians)
    #[arg(long, default_value_t = 0.2, allow_hyphen_values = true)]
    pub phase_shift: f64,

    /// Form the t·BGij products with a dense GEMM
    #[arg(long)]
    pub gemm: bool,

    /// Tabulate the Dlm terms of each pair before the Gaunt sums
    #[arg(long)]
    pub tabulate_dlm: bool,
}

/// Summary printed by the binary
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sites: usize,
    pub lattice_constant_bohr: f64,
    pub lattice_constant_angstrom: f64,
    pub config: KkrConfig,
    pub layout: BlockLayout,
    pub dimension: usize,
    pub site_pairs: usize,
    pub frobenius_norm: f64,
    pub max_off_diagonal: f64,
}

impl Cli {
    /// Build configuration from the file or the flags
    pub fn kkr_config(&self) -> anyhow::Result<KkrConfig> {
        let mut config = match &self.config {
            Some(path) => KkrConfig::from_json_file(path)
                .with_context(|| format!("reading configuration {}", path.display()))?,
            None => {
                let spin = if self.canted {
                    SpinPolarization::Canted
                } else {
                    SpinPolarization::Unpolarized
                };
                KkrConfig::new(self.lmax, spin)
            }
        };

        if self.gemm {
            config.multiply_backend = MultiplyBackend::Gemm;
        }
        if self.tabulate_dlm {
            config.dlm_mode = DlmMode::Tabulated;
        }
        Ok(config)
    }
}

/// Run one build for the arguments
pub fn run(cli: &Cli) -> anyhow::Result<Report> {
    let config = cli.kkr_config()?;
    let (lattice, radius) = if cli.angstrom {
        (angstrom_to_bohr(cli.lattice), angstrom_to_bohr(cli.radius))
    } else {
        (cli.lattice, cli.radius)
    };

    let liz = LocalInteractionZone::simple_cubic(lattice, radius, config.max_lmax)
        .context("building the cluster")?;

    let phases = vec![Complex64::new(cli.phase_shift, 0.0); config.max_lmax + 1];
    let t_matrix = diagonal_t_matrix(&phases, config.spin_cant);
    let spin_blocks = if config.spin_polarization == SpinPolarization::Collinear {
        2
    } else {
        1
    };
    let mut store = TMatrixStore::new(channel_count(config.max_lmax) * config.spin_cant, spin_blocks, 1, 1);
    for spin in 0..spin_blocks {
        store.set_block(0, 0, spin, &t_matrix)?;
    }

    let tables = AngularTables::new(config.max_lmax);
    let builder = KkrMatrixBuilder::new(config, &tables)?;
    let energy = EnergyPoint::non_relativistic(0, Complex64::new(cli.energy, cli.energy_im));

    let mut workspace = KkrWorkspace::new();
    let dimension = builder.dimension(&liz);
    let mut m = ndarray::Array2::zeros((dimension, dimension));
    let summary = builder.build(&liz, &store, &energy, 0, &mut workspace, &mut m)?;

    let frobenius_norm = m.iter().map(|v| v.norm_sqr()).sum::<f64>().sqrt();
    let max_off_diagonal = m
        .indexed_iter()
        .filter(|((i, j), _)| i != j)
        .map(|(_, v)| v.norm())
        .fold(0.0, f64::max);

    Ok(Report {
        sites: liz.len(),
        lattice_constant_bohr: lattice,
        lattice_constant_angstrom: bohr_to_angstrom(lattice),
        config,
        layout: summary.layout,
        dimension: summary.dimension,
        site_pairs: summary.site_pairs,
        frobenius_norm,
        max_off_diagonal,
    })
}
