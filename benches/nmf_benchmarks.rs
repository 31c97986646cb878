//! Benchmarks for the NMF update loop
//!
//! Run with: cargo bench --bench nmf_benchmarks
//! HTML reports: target/criterion/report/index.html

use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use fast_nmf::init::{random_templates, uniform_activations};
use fast_nmf::{reconstruct_components, CostFunction, Nmf, NmfConfig, Regularization};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

/// Random magnitude spectrogram (bins x frames)
fn create_benchmark_spectrogram(num_bins: usize, num_frames: usize) -> Array2<f64> {
    Array2::random((num_bins, num_frames), Uniform::new(0.0, 1.0))
}

/// Benchmark each cost function on growing spectrograms
fn bench_cost_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("nmf_cost_functions");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    group.sample_size(20);

    let sizes = vec![(128, 100), (513, 200), (1025, 400)];
    let num_comp = 8;

    for (num_bins, num_frames) in sizes {
        let v = create_benchmark_spectrogram(num_bins, num_frames);
        let init_w = random_templates(num_bins, num_comp, 42);
        let init_h = uniform_activations(num_comp, num_frames);

        for cost in [CostFunction::EucDist, CostFunction::KLDiv, CostFunction::ISDiv] {
            let nmf = Nmf::new(NmfConfig::new(cost, 10));
            group.bench_with_input(
                BenchmarkId::new(cost.to_string(), format!("{}x{}", num_bins, num_frames)),
                &v,
                |b, v| {
                    b.iter(|| nmf.fit(black_box(v), &init_w, &init_h).unwrap());
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the Euclidean regularization variants at a fixed size
fn bench_regularization(c: &mut Criterion) {
    let mut group = c.benchmark_group("nmf_regularization");
    group.sample_size(30);

    let v = create_benchmark_spectrogram(513, 200);
    let init_w = random_templates(513, 8, 42);
    let init_h = uniform_activations(8, 200);

    for reg in [
        Regularization::None,
        Regularization::FrobW,
        Regularization::FrobH,
        Regularization::L1W,
        Regularization::L1H,
    ] {
        let config = NmfConfig::new(CostFunction::EucDist, 10).with_regularization(reg, 0.1);
        let nmf = Nmf::new(config);
        group.bench_function(reg.to_string(), |b| {
            b.iter(|| nmf.fit(black_box(&v), &init_w, &init_h).unwrap());
        });
    }

    group.finish();
}

/// Benchmark component reconstruction for growing rank
fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("component_reconstruction");

    for num_comp in [2, 8, 32] {
        let w = random_templates(1025, num_comp, 7);
        let h = Array2::random((num_comp, 400), Uniform::new(0.0, 1.0));
        group.bench_with_input(BenchmarkId::from_parameter(num_comp), &num_comp, |b, _| {
            b.iter(|| reconstruct_components(black_box(&w), black_box(&h)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cost_functions,
    bench_regularization,
    bench_reconstruction,
);

criterion_main!(benches);
