/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! KKR matrix build for one atom at one energy point

use super::bgij::{assemble_bgij, AssemblyOptions};
use super::config::{KkrConfig, Relativity, SpinPolarization};
use super::errors::{KkrError, Result};
use super::layout::{matrix_dimension, BlockLayout};
use super::multiply::multiply_off_diagonal;
use super::workspace::KkrWorkspace;
use crate::angular::{channel_count, AngularTables};
use crate::liz::LocalInteractionZone;
use crate::tmatrix::TMatrixStore;
use ndarray::Array2;
use num_complex::Complex64;
use serde::Serialize;

/// Energy point of a build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyPoint {
    /// Index into the t-matrix store
    pub index: usize,
    /// Complex energy
    pub energy: Complex64,
    /// Wavenumber entering the Hankel terms
    pub prel: Complex64,
}

impl EnergyPoint {
    /// Non-relativistic point, prel = sqrt(energy)
    pub fn non_relativistic(index: usize, energy: Complex64) -> Self {
        Self {
            index,
            energy,
            prel: energy.sqrt(),
        }
    }
}

/// What a build produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSummary {
    pub layout: BlockLayout,
    pub dimension: usize,
    pub site_pairs: usize,
}

/// Builds `M = 1 - t·BGij` for a LIZ from the shared constant tables
#[derive(Debug, Clone)]
pub struct KkrMatrixBuilder<'a> {
    config: KkrConfig,
    tables: &'a AngularTables,
}

impl<'a> KkrMatrixBuilder<'a> {
    /// Create a builder, rejecting configurations it cannot build for
    pub fn new(config: KkrConfig, tables: &'a AngularTables) -> Result<Self> {
        config.validate()?;
        if config.max_lmax > tables.max_lmax() {
            return Err(KkrError::InvalidParameter(format!(
                "configured max_lmax {} exceeds the angular tables ({})",
                config.max_lmax,
                tables.max_lmax()
            )));
        }

        if config.relativity == Relativity::Full {
            return Err(KkrError::UnimplementedPhysics(
                "fully relativistic KKR matrix build".to_string(),
            ));
        }

        if config.spin_polarization == SpinPolarization::Collinear {
            if !config.allow_unverified_collinear {
                return Err(KkrError::UnverifiedSpinMode(
                    "collinear spin-polarized t-matrix extraction is unverified; \
                     set allow_unverified_collinear to use it"
                        .to_string(),
                ));
            }
            log::warn!("using the unverified collinear spin-polarized t-matrix extraction");
        }

        Ok(Self { config, tables })
    }

    pub fn config(&self) -> &KkrConfig {
        &self.config
    }

    pub fn tables(&self) -> &AngularTables {
        self.tables
    }

    /// Layout the builder would use for `liz`
    pub fn select_layout(&self, liz: &LocalInteractionZone) -> BlockLayout {
        BlockLayout::select(liz, self.config.max_lmax, self.config.spin_cant)
    }

    /// Order of the KKR matrix for `liz`
    pub fn dimension(&self, liz: &LocalInteractionZone) -> usize {
        matrix_dimension(liz, self.config.spin_cant)
    }

    /// Build the KKR matrix into `m`.
    ///
    /// `m` must already have the matrix dimension; it is fully overwritten.
    /// BGij and the offsets are left in `workspace` for inspection.
    pub fn build(
        &self,
        liz: &LocalInteractionZone,
        store: &TMatrixStore,
        energy: &EnergyPoint,
        ispin: usize,
        workspace: &mut KkrWorkspace,
        m: &mut Array2<Complex64>,
    ) -> Result<BuildSummary> {
        liz.check_lmax(self.config.max_lmax)?;

        let spin_cant = self.config.spin_cant;
        let layout = self.select_layout(liz);
        let dimension = self.dimension(liz);
        if m.dim() != (dimension, dimension) {
            return Err(KkrError::DimensionMismatch(format!(
                "KKR matrix is {:?}, LIZ needs {}x{}",
                m.dim(),
                dimension,
                dimension
            )));
        }

        // t-matrices first so a bad store index fails before any work
        let extraction = self.config.extraction(ispin);
        let t_matrices = liz
            .sites()
            .iter()
            .map(|site| {
                store.extract(
                    energy.index,
                    site.store_index,
                    channel_count(site.lmax),
                    extraction,
                )
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        log::debug!(
            "building KKR matrix: {} sites, dimension {}, layout {:?}, energy {}",
            liz.len(),
            dimension,
            layout,
            energy.energy
        );

        m.fill(Complex64::new(0.0, 0.0));
        m.diag_mut().fill(Complex64::new(1.0, 0.0));
        workspace.prepare(dimension);

        let (bgij, offsets) = workspace.parts_mut();
        let offset_dimension = layout.offsets_into(liz, spin_cant, offsets);
        if offset_dimension != dimension {
            return Err(KkrError::DimensionMismatch(format!(
                "block offsets span {} rows, matrix has {}",
                offset_dimension, dimension
            )));
        }

        let options = AssemblyOptions {
            spin_cant,
            relativity: self.config.relativity,
            dlm_mode: self.config.dlm_mode,
        };
        assemble_bgij(liz, self.tables, offsets, energy.prel, options, bgij)?;
        multiply_off_diagonal(&t_matrices, offsets, bgij, self.config.multiply_backend, m)?;

        Ok(BuildSummary {
            layout,
            dimension,
            site_pairs: liz.len() * (liz.len() - 1),
        })
    }

    /// Build the KKR matrix into a newly allocated array
    pub fn build_matrix(
        &self,
        liz: &LocalInteractionZone,
        store: &TMatrixStore,
        energy: &EnergyPoint,
        ispin: usize,
        workspace: &mut KkrWorkspace,
    ) -> Result<Array2<Complex64>> {
        let dimension = self.dimension(liz);
        let mut m = Array2::zeros((dimension, dimension));
        self.build(liz, store, energy, ispin, workspace, &mut m)?;
        Ok(m)
    }
}
