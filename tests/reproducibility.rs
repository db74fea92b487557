use mcbasket::core::{OptionType, PricingEngine};
use mcbasket::engines::monte_carlo::{EulerVanillaEngine, EulerWorstOfEngine, ExactWorstOfEngine};
use mcbasket::instruments::{VanillaOption, WorstOfAveragePut};
use mcbasket::math::{FastRng, FastRngKind};
use mcbasket::pricing::{
    price_single_asset_put_or_call, price_worst_of_basket_put_discretized,
    price_worst_of_basket_put_exact_two_step,
};

fn basket() -> WorstOfAveragePut {
    WorstOfAveragePut::new(12.18, 6.03, 0.436, 0.30, 0.0417, 0.75)
}

#[test]
fn single_stream_functions_are_bit_identical_for_equal_seeds() {
    for kind in [FastRngKind::Xoshiro256PlusPlus, FastRngKind::Pcg64, FastRngKind::StdRng] {
        let run = || {
            let mut rng = FastRng::from_seed(kind, 99);
            let a = price_single_asset_put_or_call(
                OptionType::Put, 12.18, 12.18, 0.75, 0.0417, 0.436, 30, 5_000, &mut rng,
            )
            .unwrap();
            let b = price_worst_of_basket_put_discretized(
                12.18, 6.03, 0.436, 0.30, 0.75, 0.0417, 30, 5_000, &mut rng,
            )
            .unwrap();
            let c = price_worst_of_basket_put_exact_two_step(
                12.18, 6.03, 0.436, 0.30, 0.75, 0.0417, 5_000, &mut rng,
            )
            .unwrap();
            [a.price.to_bits(), b.price.to_bits(), c.price.to_bits()]
        };
        assert_eq!(run(), run(), "{kind:?}");
    }
}

#[test]
fn engines_are_bit_identical_for_equal_seeds() {
    let option = VanillaOption::european_put(12.18, 12.18, 0.0417, 0.436, 0.75);
    let engine = EulerVanillaEngine::new(30_000, 25, 5).with_chunk_size(4_096);
    assert_eq!(
        engine.price(&option).unwrap().price.to_bits(),
        engine.price(&option).unwrap().price.to_bits()
    );

    let euler = EulerWorstOfEngine::new(30_000, 25, 5).with_chunk_size(1_000);
    assert_eq!(euler.price(&basket()).unwrap(), euler.price(&basket()).unwrap());

    let exact = ExactWorstOfEngine::new(30_000, 5).with_chunk_size(333);
    assert_eq!(exact.price(&basket()).unwrap(), exact.price(&basket()).unwrap());
}

#[test]
fn single_chunk_engine_matches_single_stream_function() {
    // Chunk 0 is seeded with the base seed itself.
    let seed = 1234;
    let paths = 8_000;

    let option = VanillaOption::european_call(12.18, 12.18, 0.0417, 0.436, 0.75);
    let engine = EulerVanillaEngine::new(paths, 40, seed).with_chunk_size(paths);
    let mut rng = FastRng::seeded(seed);
    let direct = price_single_asset_put_or_call(
        OptionType::Call, 12.18, 12.18, 0.75, 0.0417, 0.436, 40, paths, &mut rng,
    )
    .unwrap();
    assert_eq!(engine.price(&option).unwrap().price, direct.price);

    let engine = ExactWorstOfEngine::new(paths, seed).with_chunk_size(paths);
    let mut rng = FastRng::seeded(seed);
    let direct = price_worst_of_basket_put_exact_two_step(
        12.18, 6.03, 0.436, 0.30, 0.75, 0.0417, paths, &mut rng,
    )
    .unwrap();
    assert_eq!(engine.price(&basket()).unwrap().price, direct.price);
}

#[test]
fn different_seeds_give_different_estimates() {
    let a = ExactWorstOfEngine::new(10_000, 1).price(&basket()).unwrap();
    let b = ExactWorstOfEngine::new(10_000, 2).price(&basket()).unwrap();
    assert_ne!(a.price, b.price);
    assert!((a.price - b.price).abs() < 6.0 * a.stderr.unwrap());
}

#[test]
fn with_seed_changes_the_estimate() {
    let option = VanillaOption::european_put(12.18, 12.18, 0.0417, 0.436, 0.75);
    let vanilla = EulerVanillaEngine::new(5_000, 10, 1);
    assert_ne!(
        vanilla.price(&option).unwrap().price,
        vanilla.with_seed(2).price(&option).unwrap().price
    );

    let euler = EulerWorstOfEngine::new(5_000, 10, 1);
    assert_ne!(
        euler.price(&basket()).unwrap().price,
        euler.with_seed(2).price(&basket()).unwrap().price
    );
    assert_eq!(
        euler.with_seed(2).price(&basket()).unwrap(),
        EulerWorstOfEngine::new(5_000, 10, 2).price(&basket()).unwrap()
    );

    let exact = ExactWorstOfEngine::new(5_000, 1);
    assert_ne!(
        exact.price(&basket()).unwrap().price,
        exact.with_seed(2).price(&basket()).unwrap().price
    );
}

#[test]
fn randomized_streams_are_not_repeatable() {
    let option = VanillaOption::european_put(12.18, 12.18, 0.0417, 0.436, 0.75);
    let vanilla = EulerVanillaEngine::new(5_000, 10, 1).with_randomized_streams();
    assert_ne!(
        vanilla.price(&option).unwrap().price,
        vanilla.price(&option).unwrap().price
    );

    let euler = EulerWorstOfEngine::new(5_000, 10, 1).with_randomized_streams();
    assert_ne!(
        euler.price(&basket()).unwrap().price,
        euler.price(&basket()).unwrap().price
    );

    let exact = ExactWorstOfEngine::new(5_000, 1).with_randomized_streams();
    let a = exact.price(&basket()).unwrap();
    let b = exact.price(&basket()).unwrap();
    assert_ne!(a.price, b.price);
    assert!((a.price - b.price).abs() < 6.0 * a.stderr.unwrap());

    // Reseeding restores repeatable streams.
    let reseeded = exact.with_seed(3);
    assert_eq!(reseeded.price(&basket()).unwrap(), reseeded.price(&basket()).unwrap());
}
