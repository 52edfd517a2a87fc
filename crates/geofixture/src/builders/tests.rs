use super::*;
use crate::bounds::{Envelope, Interval};
use crate::geom::Coord;
use crate::sample::ReplayToken;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;

/// Ordered finite interval inside a generous box.
fn interval() -> impl Strategy<Value = Interval> {
    (-1.0e4..1.0e4f64, 0.0..1.0e3f64).prop_map(|(low, w)| Interval::new(low, low + w))
}

proptest! {
    #[test]
    fn sampled_points_stay_in_ranges(x in interval(), y in interval(), z in interval(), seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let c = CoordGenerator::new()
            .x_range(x.low, x.high)
            .y_range(y.low, y.high)
            .z_range(z.low, z.high)
            .generate(&mut rng)
            .unwrap();
        prop_assert!(x.contains(c.x));
        prop_assert!(y.contains(c.y));
        prop_assert!(c.z.is_some_and(|v| z.contains(v)));
    }

    #[test]
    fn ring_is_closed_with_four_or_more(min in 0usize..12, extra in 0usize..6, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let ring = LinearRingGenerator::new()
            .vertices(min, min + extra)
            .generate(&mut rng)
            .unwrap();
        prop_assert!(ring.len() >= 4);
        prop_assert!(ring.len() >= min && ring.len() <= (min + extra).max(4));
        prop_assert_eq!(ring.coords().first(), ring.coords().last());
    }

    #[test]
    fn polygon_exterior_is_valid_ring(seed: u64, x in interval(), y in interval()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let poly = PolygonGenerator::new()
            .x_range(x.low, x.high)
            .y_range(y.low, y.high)
            .generate(&mut rng)
            .unwrap();
        let ext = poly.exterior();
        prop_assert!((4..=10).contains(&ext.len()));
        prop_assert!(ext.is_closed());
        prop_assert!(ext.coords().iter().all(|c| x.contains(c.x) && y.contains(c.y)));
    }

    #[test]
    fn multi_member_count_in_range(m in 0usize..6, extra in 0usize..4, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = m + extra;
        let multi = MultiLineStringGenerator::new()
            .length_range(m, n)
            .generate(&mut rng)
            .unwrap();
        prop_assert!(multi.len() >= 2);
        prop_assert!(multi.len() >= m && multi.len() <= n.max(2));
    }

    #[test]
    fn envelope_output_is_canonical(a in interval(), b in interval(), seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let env = EnvelopeGenerator::new()
            .bounds(a.high, a.low, b.high, b.low)
            .generate(&mut rng)
            .unwrap();
        prop_assert!(env.is_canonical());
        let random = EnvelopeGenerator::new()
            .x_range(a.low, a.high)
            .y_range(b.low, b.high)
            .generate(&mut rng)
            .unwrap();
        prop_assert!(random.is_canonical());
    }

    #[test]
    fn inverted_interval_always_rejected(low in -1.0e3..1.0e3f64, gap in 1.0e-6..1.0e3f64, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let err = LineStringGenerator::new()
            .y_range(low + gap, low)
            .generate(&mut rng)
            .unwrap_err();
        prop_assert!(
            matches!(err, crate::error::GenError::InvalidInterval { field: "y_range", .. }),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn last_setter_wins() {
    let mut rng = StdRng::seed_from_u64(90);
    let gen = PointGenerator::new().x_range(-50.0, -40.0).x_range(3.0, 4.0);
    for _ in 0..20 {
        let p = gen.generate(&mut rng).unwrap();
        assert!((3.0..=4.0).contains(&p.coord().x));
    }
}

#[test]
fn degenerate_ranges_pin_the_point() {
    let mut rng = StdRng::seed_from_u64(91);
    let p = PointGenerator::new()
        .x_range(10.0, 10.0)
        .y_range(20.0, 20.0)
        .generate(&mut rng)
        .unwrap();
    assert_eq!(p.coord(), Coord::xy(10.0, 20.0));
}

#[test]
fn envelope_overrides_ranges_regardless_of_order() {
    let mut rng = StdRng::seed_from_u64(92);
    let env = Envelope::from_corners((0.0, 0.0), (1.0, 1.0));
    let before = LineStringGenerator::new().within(env).x_range(50.0, 60.0);
    let after = LineStringGenerator::new().x_range(50.0, 60.0).within(env);
    for gen in [before, after] {
        let line = gen.generate(&mut rng).unwrap();
        assert!(line.coords().iter().all(|c| env.contains(c)));
    }
}

#[test]
fn same_seed_same_fixture() {
    let gen = MultiPolygonGenerator::new().z_range(0.0, 1.0);
    let token = ReplayToken { seed: 7, index: 3 };
    let a = gen.generate(&mut token.rng()).unwrap();
    let b = gen.generate(&mut token.rng()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn configured_builder_is_shared_across_threads() {
    let gen = Arc::new(CollectionGenerator::new().within(Envelope::new_york_city()));
    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let gen = Arc::clone(&gen);
            std::thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(i);
                (0..25).all(|_| gen.generate(&mut rng).is_ok())
            })
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}
