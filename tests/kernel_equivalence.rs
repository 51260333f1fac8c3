// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Randomised agreement between every kernel variant and the scalar predicate, across
//! element types, predicates, masks and lengths that straddle byte and block edges.

mod util;

use std::fmt::Debug;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simd_match::{
    Bitset, Element, FilterKernels, KernelConfig, KernelVariant, Predicate, SimdLevel, Timestamp,
};
use util::{VARIANTS, assert_bitset_eq, expected};

const LENGTHS: [usize; 16] = [0, 1, 7, 8, 9, 15, 63, 64, 65, 100, 127, 128, 129, 255, 257, 1000];

fn predicates<T: Clone + PartialOrd>(a: T, b: T) -> Vec<Predicate<T>> {
    vec![
        Predicate::Equal(a.clone()),
        Predicate::NotEqual(a.clone()),
        Predicate::Less(a.clone()),
        Predicate::LessEqual(a.clone()),
        Predicate::Greater(a.clone()),
        Predicate::GreaterEqual(a.clone()),
        Predicate::between(a.clone(), b.clone()),
        Predicate::Between(a, b),
    ]
}

fn random_mask(rng: &mut StdRng, len: usize) -> Bitset {
    let density = rng.random_range(0.0..1.0);
    let bools: Vec<bool> = (0..len).map(|_| rng.random_bool(density)).collect();
    Bitset::from_bools(&bools)
}

fn run_equivalence<T, G>(seed: u64, mut gen_value: G)
where
    T: Element + Clone + Debug,
    G: FnMut(&mut StdRng) -> T,
{
    let mut rng = StdRng::seed_from_u64(seed);
    for len in LENGTHS {
        let src: Vec<T> = (0..len).map(|_| gen_value(&mut rng)).collect();
        let a = gen_value(&mut rng);
        let b = gen_value(&mut rng);
        let mask = random_mask(&mut rng, len);
        for pred in predicates(a, b) {
            for m in [None, Some(&mask)] {
                let want = expected(&src, &pred, m);
                for variant in VARIANTS {
                    let got = FilterKernels::with_variant(variant)
                        .match_predicate(&src, &pred, None, m)
                        .unwrap();
                    let ctx = format!("{variant:?} {pred:?} len={len} masked={}", m.is_some());
                    assert_bitset_eq(&got, &want, &ctx);
                }
            }
        }
    }
}

#[test]
fn equivalence_i8() {
    run_equivalence(1, |r| r.random_range(-3i8..=3));
}

#[test]
fn equivalence_u8_full_range() {
    run_equivalence(2, |r| if r.random_bool(0.2) { u8::MAX } else { r.random_range(0u8..4) });
}

#[test]
fn equivalence_i16() {
    run_equivalence(3, |r| r.random_range(-5i16..5));
}

#[test]
fn equivalence_u16() {
    run_equivalence(4, |r| r.random_range(0u16..6));
}

#[test]
fn equivalence_i32() {
    run_equivalence(5, |r| if r.random_bool(0.1) { i32::MIN } else { r.random_range(-4i32..4) });
}

#[test]
fn equivalence_u32() {
    run_equivalence(6, |r| if r.random_bool(0.1) { u32::MAX } else { r.random_range(0u32..6) });
}

#[test]
fn equivalence_i64() {
    run_equivalence(7, |r| r.random_range(-6i64..6));
}

#[test]
fn equivalence_u64_extremes() {
    run_equivalence(8, |r| match r.random_range(0..4) {
        0 => 0u64,
        1 => u64::MAX,
        2 => u32::MAX as u64,
        _ => r.random_range(0u64..3),
    });
}

#[test]
fn equivalence_f32_with_nan() {
    run_equivalence(9, |r| {
        if r.random_bool(0.1) {
            f32::NAN
        } else {
            r.random_range(-4i32..4) as f32 * 0.5
        }
    });
}

#[test]
fn equivalence_f64_with_specials() {
    run_equivalence(10, |r| match r.random_range(0..10) {
        0 => f64::NAN,
        1 => f64::INFINITY,
        2 => f64::NEG_INFINITY,
        3 => -0.0,
        _ => r.random_range(-3i32..3) as f64,
    });
}

#[test]
fn equivalence_timestamp() {
    run_equivalence(11, |r| Timestamp::from_secs(r.random_range(0i64..5)));
}

#[test]
fn equivalence_byte_strings() {
    run_equivalence(12, |r| {
        let n = r.random_range(0usize..3);
        (0..n).map(|_| r.random_range(b'a'..=b'c')).collect::<Vec<u8>>()
    });
}

#[test]
fn mask_never_adds_matches() {
    let mut rng = StdRng::seed_from_u64(21);
    let kernels = FilterKernels::new(&KernelConfig::new(SimdLevel::Vector));
    for len in LENGTHS {
        let src: Vec<i32> = (0..len).map(|_| rng.random_range(0..8)).collect();
        let mask = random_mask(&mut rng, len);
        for pred in predicates(3, 6) {
            let full = kernels.match_predicate(&src, &pred, None, None).unwrap();
            let gated = kernels.match_predicate(&src, &pred, None, Some(&mask)).unwrap();
            assert!(gated.count() <= full.count(), "{pred:?} len={len}");
            assert!(gated.count() <= mask.count(), "{pred:?} len={len}");
            let mut both = full.clone();
            both.and(&mask).unwrap();
            assert_eq!(gated, both, "{pred:?} len={len}");
        }
    }
}

#[test]
fn between_ignores_bound_order() {
    let mut rng = StdRng::seed_from_u64(22);
    for len in LENGTHS {
        let src: Vec<f64> = (0..len).map(|_| rng.random_range(-10.0..10.0)).collect();
        let lo = rng.random_range(-10.0..0.0);
        let hi = rng.random_range(0.0..10.0);
        for variant in VARIANTS {
            let k = FilterKernels::with_variant(variant);
            let fwd = k.match_between(&src, lo, hi, None, None).unwrap();
            let rev = k.match_between(&src, hi, lo, None, None).unwrap();
            assert_eq!(fwd, rev, "{variant:?} len={len}");
        }
    }
}

#[test]
fn hand_built_inverted_between_is_normalised() {
    let src = [1u32, 5, 7, 12];
    for variant in VARIANTS {
        let k = FilterKernels::with_variant(variant);
        let inverted = k
            .match_predicate(&src, &Predicate::Between(10, 3), None, None)
            .unwrap();
        let ordered = k
            .match_predicate(&src, &Predicate::Between(3, 10), None, None)
            .unwrap();
        assert_eq!(inverted.count(), 2, "{variant:?}");
        assert_eq!(inverted.as_bytes(), &[0b0000_0110], "{variant:?}");
        assert_eq!(inverted, ordered, "{variant:?}");

        let long: Vec<i64> = (-100..100).collect();
        let got = k
            .match_predicate(&long, &Predicate::Between(40, -40), None, None)
            .unwrap();
        assert_eq!(got.count(), 81, "{variant:?}");
        assert_eq!(got.indexes(), (60..141).collect::<Vec<_>>(), "{variant:?}");

        let floats: Vec<f32> = (0..130).map(|i| i as f32 * 0.5).collect();
        let got = k
            .match_predicate(&floats, &Predicate::Between(20.0, 10.0), None, None)
            .unwrap();
        assert_eq!(got.count(), 21, "{variant:?}");
    }
}

#[test]
fn reused_output_is_fully_overwritten() {
    let mut rng = StdRng::seed_from_u64(23);
    for variant in VARIANTS {
        let k = FilterKernels::with_variant(variant);
        let mut out = Some(Bitset::new_set_all(2000, true));
        for len in LENGTHS {
            let src: Vec<u16> = (0..len).map(|_| rng.random_range(0..4)).collect();
            let got = k.match_equal(&src, 2, out.take(), None).unwrap();
            let want = expected(&src, &Predicate::Equal(2), None);
            assert_bitset_eq(&got, &want, &format!("{variant:?} len={len}"));
            out = Some(got);
        }
    }
}

#[test]
fn configured_dispatch_matches_pinned_variants() {
    let src: Vec<u64> = (0..300).map(|i| (i * 7 % 13) as u64).collect();
    let pred = Predicate::between(9u64, 2);
    let want = expected(&src, &pred, None);
    for level in [SimdLevel::Scalar, SimdLevel::Wide, SimdLevel::Vector] {
        let k = FilterKernels::new(&KernelConfig::new(level));
        let got = k.match_predicate(&src, &pred, None, None).unwrap();
        assert_bitset_eq(&got, &want, &format!("{level:?}"));
    }
    assert_eq!(
        FilterKernels::new(&KernelConfig::from_flags(false, false)).variant(),
        KernelVariant::Std
    );
}
