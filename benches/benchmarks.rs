/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kkr_rs::angular::{channel_count, AngularTables};
use kkr_rs::kkr::{
    EnergyPoint, KkrConfig, KkrMatrixBuilder, KkrWorkspace, MultiplyBackend, SpinPolarization,
};
use kkr_rs::liz::LocalInteractionZone;
use kkr_rs::tmatrix::{diagonal_t_matrix, TMatrixStore};
use ndarray::Array2;
use num_complex::Complex64;

fn kkr_build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("KKR Matrix Build");
    group.sample_size(20);

    let lmax = 3;
    let tables = AngularTables::new(lmax);
    // 19 sites: centre, first and second shell
    let liz = LocalInteractionZone::simple_cubic(3.0, 4.3, lmax).unwrap();
    let energy = EnergyPoint::non_relativistic(0, Complex64::new(0.6, 0.02));

    for (name, spin, backend) in [
        ("unpolarized_accumulate", SpinPolarization::Unpolarized, MultiplyBackend::Accumulate),
        ("unpolarized_gemm", SpinPolarization::Unpolarized, MultiplyBackend::Gemm),
        ("canted_gemm", SpinPolarization::Canted, MultiplyBackend::Gemm),
    ] {
        let config = KkrConfig {
            multiply_backend: backend,
            ..KkrConfig::new(lmax, spin)
        };
        let phases = vec![Complex64::new(0.3, 0.0); lmax + 1];
        let mut store =
            TMatrixStore::new(channel_count(lmax) * config.spin_cant, 1, 1, 1);
        store
            .set_block(0, 0, 0, &diagonal_t_matrix(&phases, config.spin_cant))
            .unwrap();

        let builder = KkrMatrixBuilder::new(config, &tables).unwrap();
        let dimension = builder.dimension(&liz);
        let mut workspace = KkrWorkspace::with_dimension(dimension);
        let mut m = Array2::zeros((dimension, dimension));

        group.bench_function(name, |b| {
            b.iter(|| {
                builder
                    .build(&liz, &store, black_box(&energy), 0, &mut workspace, &mut m)
                    .unwrap();
                black_box(&m);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, kkr_build_benchmark);
criterion_main!(benches);
