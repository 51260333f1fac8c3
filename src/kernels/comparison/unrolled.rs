// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Comparison Unrolled Kernels** - *Eight Rows per Output Byte*
//!
//! Evaluates eight rows branch-free and assembles them straight into one output byte,
//! then applies the mask byte and counts with `count_ones`. The fixed-width inner body
//! gives the optimiser a straight line to vectorise on any target, so this is the
//! portable accelerated kernel and the one used for byte strings.

use crate::operators::{Predicate, ordered_bounds};
use crate::utils::assert_kernel_buffers;

#[inline(always)]
fn pack8<T, F: Fn(&T) -> bool>(rows: &[T], keep: &F) -> u8 {
    (keep(&rows[0]) as u8)
        | (keep(&rows[1]) as u8) << 1
        | (keep(&rows[2]) as u8) << 2
        | (keep(&rows[3]) as u8) << 3
        | (keep(&rows[4]) as u8) << 4
        | (keep(&rows[5]) as u8) << 5
        | (keep(&rows[6]) as u8) << 6
        | (keep(&rows[7]) as u8) << 7
}

/// Eight-at-a-time scan; same contract as [`scan_std`](super::std::scan_std).
#[inline(always)]
pub fn scan_unrolled<T, F>(src: &[T], bits: &mut [u8], mask: Option<&[u8]>, keep: F) -> usize
where
    F: Fn(&T) -> bool,
{
    assert_kernel_buffers(src.len(), bits, mask);
    let mut cnt = 0u32;
    let rows = src.chunks_exact(8);
    let tail = rows.remainder();
    let full = src.len() / 8;
    let (body, last) = bits.split_at_mut(full);

    match mask {
        None => {
            for (out, chunk) in body.iter_mut().zip(rows) {
                let b = pack8(chunk, &keep);
                cnt += b.count_ones();
                *out = b;
            }
        }
        Some(m) => {
            for ((out, chunk), &gate) in body.iter_mut().zip(rows).zip(m) {
                // Unmasked rows are evaluated too; the gate discards them.
                let b = pack8(chunk, &keep) & gate;
                cnt += b.count_ones();
                *out = b;
            }
        }
    }

    if let Some(out) = last.first_mut() {
        let gate = mask.map_or(0xff, |m| m[full]);
        let mut b = 0u8;
        for (k, v) in tail.iter().enumerate() {
            b |= (keep(v) as u8) << k;
        }
        b &= gate;
        cnt += b.count_ones();
        *out = b;
    }
    cnt as usize
}

/// Unrolled scan of `src` against `pred`.
///
/// Overwrites all `ceil(src.len() / 8)` bytes of `bits`. Panics if `bits`, or `mask`
/// when given, is not exactly that size.
#[inline]
pub fn match_unrolled<T: PartialOrd>(
    src: &[T],
    pred: &Predicate<T>,
    bits: &mut [u8],
    mask: Option<&[u8]>,
) -> usize {
    match pred {
        Predicate::Equal(x) => scan_unrolled(src, bits, mask, |v| v == x),
        Predicate::NotEqual(x) => scan_unrolled(src, bits, mask, |v| v != x),
        Predicate::Less(x) => scan_unrolled(src, bits, mask, |v| v < x),
        Predicate::LessEqual(x) => scan_unrolled(src, bits, mask, |v| v <= x),
        Predicate::Greater(x) => scan_unrolled(src, bits, mask, |v| v > x),
        Predicate::GreaterEqual(x) => scan_unrolled(src, bits, mask, |v| v >= x),
        Predicate::Between(a, b) => {
            let (lo, hi) = ordered_bounds(a, b);
            scan_unrolled(src, bits, mask, |v| lo <= v && v <= hi)
        }
    }
}
