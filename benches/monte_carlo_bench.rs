use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queue_lab::models::{Distribution, MonteCarloParams};
use queue_lab::monte_carlo::run_monte_carlo;

const OBSERVATIONS: usize = 10_000;
const VARIABLES: usize = 4;

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    let size_label = format!("{}x{}", OBSERVATIONS, VARIABLES);

    for distribution in [Distribution::Exponential, Distribution::Poisson] {
        let params = MonteCarloParams {
            distribution,
            lambda: 5.0,
            n_variables: VARIABLES,
            n_observations: OBSERVATIONS,
            seed: Some(42),
        };
        group.bench_with_input(
            BenchmarkId::new(distribution.to_string(), &size_label),
            &params,
            |b, params: &MonteCarloParams| {
                b.iter(|| {
                    let results = run_monte_carlo(params).expect("run should succeed");
                    black_box(results);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_monte_carlo);
criterion_main!(benches);
