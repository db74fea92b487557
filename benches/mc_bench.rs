use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mcbasket::core::PricingEngine;
use mcbasket::engines::monte_carlo::{EulerVanillaEngine, EulerWorstOfEngine, ExactWorstOfEngine};
use mcbasket::instruments::{VanillaOption, WorstOfAveragePut};
use mcbasket::math::{FastRng, FastRngKind};
use std::hint::black_box;

// Goals:
// - Euler cost scales linearly in paths x steps
// - exact two-step should be ~steps/2 times cheaper than Euler for the basket
// - Xoshiro256++ should beat StdRng

fn basket() -> WorstOfAveragePut {
    WorstOfAveragePut::new(12.18, 6.03, 0.436, 0.30, 0.0417, 0.75)
}

fn bench_vanilla_paths(c: &mut Criterion) {
    let option = VanillaOption::european_put(12.18, 12.18, 0.0417, 0.436, 0.75);
    let mut group = c.benchmark_group("euler_vanilla_paths");

    for paths in [10_000, 50_000, 100_000].iter() {
        let engine = EulerVanillaEngine::new(*paths, 150, 42);
        group.bench_with_input(BenchmarkId::from_parameter(paths), paths, |b, _| {
            b.iter(|| {
                let px = engine
                    .price(black_box(&option))
                    .expect("pricing should succeed")
                    .price;
                black_box(px)
            })
        });
    }

    group.finish();
}

fn bench_basket_schemes(c: &mut Criterion) {
    let basket = basket();
    let mut group = c.benchmark_group("worst_of_basket");
    let euler = EulerWorstOfEngine::new(50_000, 150, 42);
    let exact = ExactWorstOfEngine::new(50_000, 42);

    group.bench_function("euler_150_steps", |b| {
        b.iter(|| black_box(euler.price(black_box(&basket)).expect("pricing should succeed")))
    });
    group.bench_function("exact_two_step", |b| {
        b.iter(|| black_box(exact.price(black_box(&basket)).expect("pricing should succeed")))
    });

    group.finish();
}

fn bench_rng_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_normals_1m");
    let mut buf = vec![0.0; 1_000_000];

    for kind in [
        FastRngKind::Xoshiro256PlusPlus,
        FastRngKind::Pcg64,
        FastRngKind::StdRng,
    ] {
        group.bench_function(format!("{kind:?}"), |b| {
            let mut rng = FastRng::from_seed(kind, 7);
            b.iter(|| {
                rng.fill_standard_normal(&mut buf);
                black_box(buf[0])
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_vanilla_paths, bench_basket_schemes, bench_rng_kinds);
criterion_main!(benches);
