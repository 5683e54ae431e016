/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Tests for the KKR matrix build

use approx::assert_relative_eq;
use kkr_rs::angular::{channel_count, AngularTables};
use kkr_rs::kkr::{
    BlockLayout, DlmMode, EnergyPoint, KkrConfig, KkrError, KkrMatrixBuilder, KkrWorkspace,
    MultiplyBackend, Relativity, SpinPolarization,
};
use kkr_rs::liz::{LizSite, LocalInteractionZone, Vector3D};
use kkr_rs::tmatrix::{diagonal_t_matrix, TMatrixStore};
use ndarray::{s, Array2};
use num_complex::Complex64;
use rstest::rstest;
use tempfile::NamedTempFile;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

fn line(lmax: &[usize]) -> LocalInteractionZone {
    let sites = lmax
        .iter()
        .enumerate()
        .map(|(i, &l)| LizSite::new(Vector3D::new(0.0, 0.0, 2.0 * i as f64), l, 0))
        .collect();
    LocalInteractionZone::new(sites).unwrap()
}

fn cluster(lmax: &[usize]) -> LocalInteractionZone {
    let positions = [
        Vector3D::new(0.0, 0.0, 0.0),
        Vector3D::new(1.8, 0.3, -0.2),
        Vector3D::new(-0.4, 1.7, 0.9),
        Vector3D::new(0.5, -1.2, 1.6),
    ];
    let sites = lmax
        .iter()
        .zip(positions.iter())
        .map(|(&l, &position)| LizSite::new(position, l, 0))
        .collect();
    LocalInteractionZone::new(sites).unwrap()
}

fn identity_store(lmax: usize, spin_cant: usize) -> TMatrixStore {
    let order = channel_count(lmax) * spin_cant;
    let mut store = TMatrixStore::new(order, 1, 1, 1);
    store.set_block(0, 0, 0, &Array2::eye(order)).unwrap();
    store
}

fn energy() -> EnergyPoint {
    EnergyPoint::non_relativistic(0, Complex64::new(0.35, 0.02))
}

fn block_ranges(liz: &LocalInteractionZone, spin_cant: usize) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for site in liz.sites() {
        let size = spin_cant * channel_count(site.lmax);
        ranges.push((start, start + size));
        start += size;
    }
    ranges
}

#[test]
fn test_identity_t_gives_negative_structure_constants() {
    let liz = line(&[2, 2, 2]);
    let tables = AngularTables::new(2);
    let builder =
        KkrMatrixBuilder::new(KkrConfig::new(2, SpinPolarization::Canted), &tables).unwrap();
    let mut workspace = KkrWorkspace::new();
    let m = builder
        .build_matrix(&liz, &identity_store(2, 2), &energy(), 0, &mut workspace)
        .unwrap();

    assert_eq!(m.dim(), (54, 54));
    let bgij = workspace.bgij();
    for (i, &(r0, r1)) in block_ranges(&liz, 2).iter().enumerate() {
        for (j, &(c0, c1)) in block_ranges(&liz, 2).iter().enumerate() {
            for row in r0..r1 {
                for col in c0..c1 {
                    if i == j {
                        let expected = if row == col { Complex64::new(1.0, 0.0) } else { ZERO };
                        assert_eq!(m[(row, col)], expected);
                    } else {
                        assert_eq!(m[(row, col)], -bgij[(row, col)]);
                    }
                }
            }
        }
    }
}

#[test]
fn test_spin_quadrants() {
    let liz = cluster(&[1, 1, 1]);
    let tables = AngularTables::new(1);
    let builder =
        KkrMatrixBuilder::new(KkrConfig::new(1, SpinPolarization::Canted), &tables).unwrap();
    let mut workspace = KkrWorkspace::new();
    builder
        .build_matrix(&liz, &identity_store(1, 2), &energy(), 0, &mut workspace)
        .unwrap();

    // non-doubled reference from an unpolarized build of the same cluster
    let tables_single = AngularTables::new(1);
    let single =
        KkrMatrixBuilder::new(KkrConfig::new(1, SpinPolarization::Unpolarized), &tables_single)
            .unwrap();
    let mut single_workspace = KkrWorkspace::new();
    single
        .build_matrix(&liz, &identity_store(1, 1), &energy(), 0, &mut single_workspace)
        .unwrap();

    let bgij = workspace.bgij();
    let base = single_workspace.bgij();
    let kkr = 4;
    for i in 0..3 {
        for j in 0..3 {
            if i == j {
                continue;
            }
            let block = bgij.slice(s![8 * i..8 * i + 8, 8 * j..8 * j + 8]);
            let gij = base.slice(s![kkr * i..kkr * i + kkr, kkr * j..kkr * j + kkr]);
            for a in 0..kkr {
                for b in 0..kkr {
                    assert_eq!(block[(a, b)], gij[(a, b)]);
                    assert_eq!(block[(kkr + a, kkr + b)], gij[(a, b)]);
                    assert_eq!(block[(kkr + a, b)], ZERO);
                    assert_eq!(block[(a, kkr + b)], ZERO);
                }
            }
        }
    }
}

#[test]
fn test_repeated_builds_are_identical() {
    let liz = cluster(&[2, 2, 2, 2]);
    let tables = AngularTables::new(2);
    let builder =
        KkrMatrixBuilder::new(KkrConfig::new(2, SpinPolarization::Unpolarized), &tables).unwrap();
    let phases = [
        Complex64::new(0.4, 0.0),
        Complex64::new(0.2, 0.0),
        Complex64::new(0.05, 0.0),
    ];
    let mut store = TMatrixStore::new(9, 1, 1, 1);
    store
        .set_block(0, 0, 0, &diagonal_t_matrix(&phases, 1))
        .unwrap();

    let mut workspace = KkrWorkspace::new();
    let first = builder
        .build_matrix(&liz, &store, &energy(), 0, &mut workspace)
        .unwrap();

    // reuse both buffers, with stale contents in the output
    let mut second = Array2::from_elem(first.dim(), Complex64::new(5.0, -5.0));
    builder
        .build(&liz, &store, &energy(), 0, &mut workspace, &mut second)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_variable_lmax_blocks() {
    let liz = cluster(&[2, 1, 0]);
    let tables = AngularTables::new(2);
    let builder =
        KkrMatrixBuilder::new(KkrConfig::new(2, SpinPolarization::Unpolarized), &tables).unwrap();
    assert_eq!(builder.select_layout(&liz), BlockLayout::Variable);

    let t_full = Array2::from_shape_fn((9, 9), |(i, j)| {
        Complex64::new(1.0 / (1.0 + i as f64 + j as f64), 0.1 * (i as f64 - j as f64))
    });
    let mut store = TMatrixStore::new(9, 1, 1, 1);
    store.set_block(0, 0, 0, &t_full).unwrap();

    let mut workspace = KkrWorkspace::new();
    let m = builder
        .build_matrix(&liz, &store, &energy(), 0, &mut workspace)
        .unwrap();
    assert_eq!(m.dim(), (14, 14));
    assert_eq!(workspace.offsets(), &[0, 9, 13]);

    let bgij = workspace.bgij();
    let ranges = block_ranges(&liz, 1);
    for (i, &(r0, r1)) in ranges.iter().enumerate() {
        let size = r1 - r0;
        let t = t_full.slice(s![..size, ..size]);
        for (j, &(c0, c1)) in ranges.iter().enumerate() {
            let block = m.slice(s![r0..r1, c0..c1]);
            if i == j {
                assert_eq!(block, Array2::<Complex64>::eye(size));
                continue;
            }
            let expected = t.dot(&bgij.slice(s![r0..r1, c0..c1])).mapv(|v| -v);
            for (a, e) in block.iter().zip(expected.iter()) {
                assert_relative_eq!(a.re, e.re, epsilon = 1e-12);
                assert_relative_eq!(a.im, e.im, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_variable_layout_matches_uniform_corners() {
    // structure constants of a channel pair do not depend on the site cutoffs
    let tables = AngularTables::new(2);
    let builder =
        KkrMatrixBuilder::new(KkrConfig::new(2, SpinPolarization::Unpolarized), &tables).unwrap();

    let uniform = cluster(&[2, 2, 2]);
    let mixed = cluster(&[2, 1, 0]);
    let mut uniform_workspace = KkrWorkspace::new();
    let mut mixed_workspace = KkrWorkspace::new();
    builder
        .build_matrix(&uniform, &identity_store(2, 1), &energy(), 0, &mut uniform_workspace)
        .unwrap();
    builder
        .build_matrix(&mixed, &identity_store(2, 1), &energy(), 0, &mut mixed_workspace)
        .unwrap();

    let full = uniform_workspace.bgij();
    let part = mixed_workspace.bgij();
    let mixed_ranges = block_ranges(&mixed, 1);
    for (i, &(r0, r1)) in mixed_ranges.iter().enumerate() {
        for (j, &(c0, c1)) in mixed_ranges.iter().enumerate() {
            for a in 0..r1 - r0 {
                for b in 0..c1 - c0 {
                    let expected = full[(9 * i + a, 9 * j + b)];
                    let actual = part[(r0 + a, c0 + b)];
                    assert_relative_eq!(actual.re, expected.re, epsilon = 1e-14);
                    assert_relative_eq!(actual.im, expected.im, epsilon = 1e-14);
                }
            }
        }
    }
}

#[test]
fn test_gemm_backend_matches_accumulate() {
    let liz = cluster(&[2, 2, 1, 2]);
    let tables = AngularTables::new(2);
    let mut store = TMatrixStore::new(18, 1, 1, 1);
    let t = Array2::from_shape_fn((18, 18), |(i, j)| {
        Complex64::new(((i * 7 + j * 3) % 11) as f64 * 0.1, ((i + 2 * j) % 5) as f64 * -0.05)
    });
    store.set_block(0, 0, 0, &t).unwrap();

    let accumulate = KkrConfig::new(2, SpinPolarization::Canted);
    let gemm = KkrConfig {
        multiply_backend: MultiplyBackend::Gemm,
        ..accumulate
    };

    let m_accumulate = KkrMatrixBuilder::new(accumulate, &tables)
        .unwrap()
        .build_matrix(&liz, &store, &energy(), 0, &mut KkrWorkspace::new())
        .unwrap();
    let m_gemm = KkrMatrixBuilder::new(gemm, &tables)
        .unwrap()
        .build_matrix(&liz, &store, &energy(), 0, &mut KkrWorkspace::new())
        .unwrap();

    for (a, g) in m_accumulate.iter().zip(m_gemm.iter()) {
        assert_relative_eq!(a.re, g.re, epsilon = 1e-11);
        assert_relative_eq!(a.im, g.im, epsilon = 1e-11);
    }
}

#[test]
fn test_tabulated_dlm_is_bit_identical() {
    let liz = cluster(&[2, 1, 2]);
    let tables = AngularTables::new(2);
    let on_the_fly = KkrConfig::new(2, SpinPolarization::Unpolarized);
    let tabulated = KkrConfig {
        dlm_mode: DlmMode::Tabulated,
        ..on_the_fly
    };

    let store = identity_store(2, 1);
    let a = KkrMatrixBuilder::new(on_the_fly, &tables)
        .unwrap()
        .build_matrix(&liz, &store, &energy(), 0, &mut KkrWorkspace::new())
        .unwrap();
    let b = KkrMatrixBuilder::new(tabulated, &tables)
        .unwrap()
        .build_matrix(&liz, &store, &energy(), 0, &mut KkrWorkspace::new())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_full_relativity_is_an_error() {
    let tables = AngularTables::new(1);
    let config = KkrConfig {
        relativity: Relativity::Full,
        ..KkrConfig::new(1, SpinPolarization::Canted)
    };
    let result = KkrMatrixBuilder::new(config, &tables);
    assert!(matches!(result, Err(KkrError::UnimplementedPhysics(_))));
}

#[test]
fn test_collinear_requires_opt_in() {
    let tables = AngularTables::new(1);
    let config = KkrConfig::new(1, SpinPolarization::Collinear);
    assert!(matches!(
        KkrMatrixBuilder::new(config, &tables),
        Err(KkrError::UnverifiedSpinMode(_))
    ));
}

#[test]
fn test_collinear_uses_requested_spin() {
    let liz = line(&[1, 1]);
    let tables = AngularTables::new(1);
    let config = KkrConfig {
        allow_unverified_collinear: true,
        ..KkrConfig::new(1, SpinPolarization::Collinear)
    };
    let builder = KkrMatrixBuilder::new(config, &tables).unwrap();

    let mut store = TMatrixStore::new(4, 2, 1, 1);
    store.set_block(0, 0, 0, &Array2::eye(4)).unwrap();
    store
        .set_block(0, 0, 1, &Array2::eye(4).mapv(|v: Complex64| v * 2.0))
        .unwrap();

    let mut workspace = KkrWorkspace::new();
    let up = builder
        .build_matrix(&liz, &store, &energy(), 0, &mut workspace)
        .unwrap();
    let down = builder
        .build_matrix(&liz, &store, &energy(), 1, &mut workspace)
        .unwrap();

    let bgij = workspace.bgij();
    for row in 0..4 {
        for col in 4..8 {
            assert_eq!(up[(row, col)], -bgij[(row, col)]);
            assert_eq!(down[(row, col)], -(bgij[(row, col)] * 2.0));
        }
    }
}

#[test]
fn test_site_above_configured_cutoff_is_rejected() {
    let liz = line(&[1, 2]);
    let tables = AngularTables::new(2);
    let builder =
        KkrMatrixBuilder::new(KkrConfig::new(1, SpinPolarization::Unpolarized), &tables).unwrap();
    let result = builder.build_matrix(&liz, &identity_store(1, 1), &energy(), 0, &mut KkrWorkspace::new());
    assert!(matches!(result, Err(KkrError::LizError(_))));
}

#[rstest]
#[case(0, SpinPolarization::Unpolarized)]
#[case(1, SpinPolarization::Unpolarized)]
#[case(1, SpinPolarization::Canted)]
#[case(3, SpinPolarization::Canted)]
fn test_diagonal_blocks_are_identity(#[case] lmax: usize, #[case] spin: SpinPolarization) {
    let config = KkrConfig::new(lmax, spin);
    let liz = line(&[lmax, lmax, lmax]);
    let tables = AngularTables::new(lmax);
    let builder = KkrMatrixBuilder::new(config, &tables).unwrap();

    let m = builder
        .build_matrix(&liz, &identity_store(lmax, config.spin_cant), &energy(), 0, &mut KkrWorkspace::new())
        .unwrap();

    let block = config.spin_cant * channel_count(lmax);
    assert_eq!(m.nrows(), 3 * block);
    for site in 0..3 {
        let diagonal = m.slice(s![site * block..(site + 1) * block, site * block..(site + 1) * block]);
        assert_eq!(diagonal, Array2::<Complex64>::eye(block));
    }
}

#[test]
fn test_config_file_round_trip() {
    let config = KkrConfig {
        dlm_mode: DlmMode::Tabulated,
        multiply_backend: MultiplyBackend::Gemm,
        ..KkrConfig::new(2, SpinPolarization::Canted)
    };

    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), config.to_json_string().unwrap()).unwrap();
    let loaded = KkrConfig::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, config);

    assert!(KkrConfig::from_json_file(file.path().with_extension("missing")).is_err());
}
