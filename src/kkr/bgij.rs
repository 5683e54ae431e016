/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Assembly of the BGij structure-constant matrix
//!
//! Every ordered pair of distinct sites gets a `kkri × kkrj` block from the
//! Gaunt sum, written at the pair's block offsets. With two spin channels the
//! block is repeated on the spin diagonal and the spin-flip quadrants are
//! zero. Same-site blocks stay zero.

use super::config::{DlmMode, Relativity};
use super::errors::{KkrError, Result};
use super::gij::fill_gij_block;
use super::layout::band_heights;
use crate::angular::{channel_count, AngularBasis, AngularTables, ScratchArena};
use crate::liz::LocalInteractionZone;
use ndarray::{s, Array2, ArrayViewMut2, Axis};
use num_complex::Complex64;
use rayon::prelude::*;

/// Split `matrix` into consecutive row bands of the given heights
pub(crate) fn row_bands<'m>(
    matrix: ArrayViewMut2<'m, Complex64>,
    heights: impl IntoIterator<Item = usize>,
) -> Vec<ArrayViewMut2<'m, Complex64>> {
    let mut bands = Vec::new();
    let mut rest = matrix;
    for height in heights {
        let (band, tail) = rest.split_at(Axis(0), height);
        bands.push(band);
        rest = tail;
    }
    bands
}

/// Copy the spin-up block in the top-left `kkri × kkrj` corner of `block`
/// to the spin-down diagonal and clear both spin-flip quadrants.
///
/// `block` must be `2·kkri × 2·kkrj`.
pub fn spin_double_block(block: &mut ArrayViewMut2<'_, Complex64>, kkri: usize, kkrj: usize) {
    let zero = Complex64::new(0.0, 0.0);
    for j in 0..kkrj {
        for i in 0..kkri {
            block[(kkri + i, kkrj + j)] = block[(i, j)];
            block[(kkri + i, j)] = zero;
            block[(i, kkrj + j)] = zero;
        }
    }
}

/// Settings that select the assembly variant
#[derive(Debug, Clone, Copy)]
pub struct AssemblyOptions {
    pub spin_cant: usize,
    pub relativity: Relativity,
    pub dlm_mode: DlmMode,
}

/// Fill `bgij` with the structure constants of every site pair.
///
/// `bgij` must be zeroed and sized to the matrix dimension, `offsets` holds
/// the start of every site's block and must match the site block sizes.
/// Row bands are assembled in parallel, each worker with its own scratch
/// arena.
pub fn assemble_bgij(
    liz: &LocalInteractionZone,
    tables: &AngularTables,
    offsets: &[usize],
    prel: Complex64,
    options: AssemblyOptions,
    bgij: &mut Array2<Complex64>,
) -> Result<()> {
    if options.relativity == Relativity::Full {
        return Err(KkrError::UnimplementedPhysics(
            "fully relativistic structure constants".to_string(),
        ));
    }
    if options.spin_cant != 1 && options.spin_cant != 2 {
        return Err(KkrError::InvalidParameter(format!(
            "spin_cant must be 1 or 2, got {}",
            options.spin_cant
        )));
    }

    liz.check_lmax(tables.max_lmax())?;

    let spin_cant = options.spin_cant;
    let tabulate = options.dlm_mode == DlmMode::Tabulated;
    let layout = tables.scratch_layout(tabulate);
    let sites = liz.sites();

    let (rows, cols) = bgij.dim();
    if rows != cols {
        return Err(KkrError::DimensionMismatch(format!(
            "BGij must be square, got {}x{}",
            rows, cols
        )));
    }
    let block_sizes: Vec<usize> = sites
        .iter()
        .map(|site| spin_cant * channel_count(site.lmax))
        .collect();
    let heights = band_heights(offsets, &block_sizes, rows)?;
    let bands = row_bands(bgij.view_mut(), heights);

    bands.into_par_iter().enumerate().for_each_init(
        || ScratchArena::new(layout),
        |arena, (ir1, mut band)| {
            let kkri = channel_count(sites[ir1].lmax);

            for (ir2, site) in sites.iter().enumerate() {
                if ir1 == ir2 {
                    continue;
                }
                let kkrj = channel_count(site.lmax);
                let lend = sites[ir1].lmax + site.lmax;
                let rij = liz.separation(ir1, ir2);

                let basis = AngularBasis::evaluate(
                    arena.regions(),
                    &rij,
                    prel,
                    lend,
                    tables.ifactors().ilp1(),
                    tabulate,
                );

                let column = offsets[ir2];
                let mut block =
                    band.slice_mut(s![.., column..column + spin_cant * kkrj]);
                fill_gij_block(&basis, tables, prel, block.slice_mut(s![..kkri, ..kkrj]));

                if spin_cant == 2 {
                    spin_double_block(&mut block, kkri, kkrj);
                }
            }
        },
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kkr::BlockLayout;
    use crate::liz::{LizSite, Vector3D};

    #[test]
    fn test_spin_double_block() {
        let mut block = Array2::from_shape_fn((4, 6), |(i, j)| Complex64::new(i as f64, j as f64));
        let original = block.clone();
        spin_double_block(&mut block.view_mut(), 2, 3);

        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(block[(i, j)], original[(i, j)]);
                assert_eq!(block[(i + 2, j + 3)], original[(i, j)]);
                assert_eq!(block[(i + 2, j)], Complex64::new(0.0, 0.0));
                assert_eq!(block[(i, j + 3)], Complex64::new(0.0, 0.0));
            }
        }
    }

    fn cluster(lmax: &[usize]) -> LocalInteractionZone {
        let sites = lmax
            .iter()
            .enumerate()
            .map(|(i, &l)| LizSite::new(Vector3D::new(0.0, 1.2 * i as f64, 0.0), l, 0))
            .collect();
        LocalInteractionZone::new(sites).unwrap()
    }

    fn options(spin_cant: usize) -> AssemblyOptions {
        AssemblyOptions {
            spin_cant,
            relativity: Relativity::NonRelativistic,
            dlm_mode: DlmMode::OnTheFly,
        }
    }

    #[test]
    fn test_mismatched_offsets_are_rejected() {
        let liz = cluster(&[1, 2]);
        let tables = AngularTables::new(2);
        let offsets = BlockLayout::Identical { block_size: 9 }.offsets(&liz, 1);
        let mut bgij = Array2::zeros((13, 13));

        let result = assemble_bgij(
            &liz,
            &tables,
            &offsets,
            Complex64::new(0.5, 0.0),
            options(1),
            &mut bgij,
        );
        assert!(matches!(result, Err(KkrError::DimensionMismatch(_))));
        assert!(bgij.iter().all(|v| *v == Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_wrong_bgij_shape_is_rejected() {
        let liz = cluster(&[1, 2]);
        let tables = AngularTables::new(2);
        let offsets = BlockLayout::Variable.offsets(&liz, 1);
        let prel = Complex64::new(0.5, 0.0);

        for shape in [(13, 12), (12, 12), (26, 26)] {
            let mut bgij = Array2::zeros(shape);
            let result = assemble_bgij(&liz, &tables, &offsets, prel, options(1), &mut bgij);
            assert!(matches!(result, Err(KkrError::DimensionMismatch(_))));
        }

        let mut bgij = Array2::zeros((13, 13));
        assert!(assemble_bgij(&liz, &tables, &offsets, prel, options(1), &mut bgij).is_ok());
    }

    #[test]
    fn test_cutoff_above_tables_is_rejected() {
        let liz = cluster(&[1, 2]);
        let tables = AngularTables::new(1);
        let offsets = BlockLayout::Variable.offsets(&liz, 1);
        let mut bgij = Array2::zeros((13, 13));

        let result = assemble_bgij(
            &liz,
            &tables,
            &offsets,
            Complex64::new(0.5, 0.0),
            options(1),
            &mut bgij,
        );
        assert!(matches!(result, Err(KkrError::LizError(_))));
    }

    #[test]
    fn test_row_bands() {
        let mut matrix = Array2::<Complex64>::zeros((7, 7));
        let bands = row_bands(matrix.view_mut(), vec![4, 1, 2]);
        let heights: Vec<usize> = bands.iter().map(|band| band.nrows()).collect();
        assert_eq!(heights, vec![4, 1, 2]);
        assert!(bands.iter().all(|band| band.ncols() == 7));
    }
}
