#![allow(unused)]

use simd_match::{Bitset, KernelVariant, Predicate};

/// Every kernel variant, scalar reference first.
pub const VARIANTS: [KernelVariant; 3] = [
    KernelVariant::Std,
    KernelVariant::Unrolled,
    KernelVariant::Simd,
];

/// Expected result built straight from `Predicate::matches`, one row at a time.
pub fn expected<T: PartialOrd>(src: &[T], pred: &Predicate<T>, mask: Option<&Bitset>) -> Bitset {
    let bools: Vec<bool> = src
        .iter()
        .enumerate()
        .map(|(i, v)| mask.map_or(true, |m| m.is_set(i)) && pred.matches(v))
        .collect();
    Bitset::from_bools(&bools)
}

pub fn assert_bitset_eq(got: &Bitset, want: &Bitset, ctx: &str) {
    assert_eq!(got.len(), want.len(), "{ctx}: len mismatch");
    assert_eq!(got.as_bytes(), want.as_bytes(), "{ctx}: bytes mismatch");
    assert_eq!(got.count(), want.count(), "{ctx}: count mismatch");
}

pub fn popcount(bytes: &[u8]) -> usize {
    bytes.iter().map(|b| b.count_ones() as usize).sum()
}
