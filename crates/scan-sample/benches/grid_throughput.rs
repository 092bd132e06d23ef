use criterion::{criterion_group, criterion_main, Criterion};
use scan_sample::{GridScan, LatinHypercube, ParameterSpace, ParameterSpec, Sampler};

fn make_space() -> ParameterSpace {
    ParameterSpace::new(vec![
        ParameterSpec::new("laser", "lambda", 0.8e-6, 1.2e-6),
        ParameterSpec::new("laser", "intensity", 1.0e18, 1.0e22).log_scaled(),
        ParameterSpec::new("target", "density", 1.0e26, 1.0e29).log_scaled(),
    ])
    .expect("space")
}

fn bench_grid(c: &mut Criterion) {
    let scan = GridScan::new(make_space(), 1000).expect("grid");
    c.bench_function("grid_1000", |b| {
        b.iter(|| scan.samples().count());
    });
}

fn bench_lhs(c: &mut Criterion) {
    let lhs = LatinHypercube::new(make_space(), 1000, 4242).expect("lhs");
    c.bench_function("lhs_1000", |b| {
        b.iter(|| lhs.samples().count());
    });
}

criterion_group!(benches, bench_grid, bench_lhs);
criterion_main!(benches);
