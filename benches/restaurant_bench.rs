use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use queue_lab::models::RestaurantConfig;
use queue_lab::restaurant::RestaurantSim;

const TICKS: usize = 10_000;

fn build_sim(tables: usize) -> RestaurantSim {
    let config = RestaurantConfig {
        table_count: tables,
        queue_limit: Some(tables * 2),
        arrival_lambda: 40.0,
        service_mu: 3.0,
        simulation_speed: 100.0,
        seed: Some(7),
    };
    let mut sim = RestaurantSim::new(config).expect("config should be valid");
    sim.start();
    sim
}

fn bench_restaurant(c: &mut Criterion) {
    let mut group = c.benchmark_group("restaurant");

    for tables in [4, 12, 20] {
        group.bench_with_input(
            BenchmarkId::new("ticks", format!("{}x{}", TICKS, tables)),
            &tables,
            |b, &tables| {
                b.iter_batched(
                    || build_sim(tables),
                    |mut sim| {
                        sim.run_ticks(TICKS);
                        black_box(sim.stop());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_restaurant);
criterion_main!(benches);
