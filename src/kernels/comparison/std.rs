// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Comparison Standard Kernels** - *Scalar Reference Predicate Scans*
//!
//! One element, one bit at a time. This is the reference every other variant is
//! checked against, and the kernel selected for [`SimdLevel::Scalar`](crate::config::SimdLevel).

use crate::operators::{Predicate, ordered_bounds};
use crate::utils::{assert_kernel_buffers, bit_mask};

/// Evaluate `keep` for every row not masked out, overwriting `bits` and returning the count.
#[inline(always)]
pub fn scan_std<T, F>(src: &[T], bits: &mut [u8], mask: Option<&[u8]>, keep: F) -> usize
where
    F: Fn(&T) -> bool,
{
    assert_kernel_buffers(src.len(), bits, mask);
    let mut cnt = 0usize;
    for (byte_idx, (out, rows)) in bits.iter_mut().zip(src.chunks(8)).enumerate() {
        let gate = mask.map_or(0xff, |m| m[byte_idx]);
        let mut acc = 0u8;
        for (k, v) in rows.iter().enumerate() {
            let bit = bit_mask(k);
            // Masked-out rows are neither tested nor counted.
            if gate & bit != 0 && keep(v) {
                acc |= bit;
                cnt += 1;
            }
        }
        *out = acc;
    }
    cnt
}

/// Scalar scan of `src` against `pred`.
///
/// Overwrites all `ceil(src.len() / 8)` bytes of `bits`. Panics if `bits`, or `mask`
/// when given, is not exactly that size.
#[inline]
pub fn match_std<T: PartialOrd>(
    src: &[T],
    pred: &Predicate<T>,
    bits: &mut [u8],
    mask: Option<&[u8]>,
) -> usize {
    match pred {
        Predicate::Equal(x) => scan_std(src, bits, mask, |v| v == x),
        Predicate::NotEqual(x) => scan_std(src, bits, mask, |v| v != x),
        Predicate::Less(x) => scan_std(src, bits, mask, |v| v < x),
        Predicate::LessEqual(x) => scan_std(src, bits, mask, |v| v <= x),
        Predicate::Greater(x) => scan_std(src, bits, mask, |v| v > x),
        Predicate::GreaterEqual(x) => scan_std(src, bits, mask, |v| v >= x),
        Predicate::Between(a, b) => {
            let (lo, hi) = ordered_bounds(a, b);
            scan_std(src, bits, mask, |v| lo <= v && v <= hi)
        }
    }
}
