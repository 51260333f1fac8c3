// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Bitmask SIMD Kernels** - *Vectorised Bitmask Operations*
//!
//! `std::simd` versions of the bitmask kernels. Each iteration processes `LANES`
//! 64-bit words; whatever is left over is handed to the scalar kernels in
//! [`crate::kernels::bitmask::std`].
//!
//! Buffers are plain `Vec<u8>` storage with no alignment guarantee, so words are
//! assembled with unaligned little-endian loads rather than pointer casts.

use core::simd::{LaneCount, Simd, SupportedLaneCount};
use std::simd::prelude::SimdUint;

use crate::kernels::bitmask::std::{bitmask_binop_std, invert_std, popcount_std};
use crate::kernels::bitmask::{WORD_BYTES, clear_trailing_bits};
use crate::operators::LogicalOperator;
use crate::utils::{load_word, store_word};

#[inline(always)]
fn load_lanes<const LANES: usize>(bytes: &[u8]) -> Simd<u64, LANES>
where
    LaneCount<LANES>: SupportedLaneCount,
{
    let mut arr = [0u64; LANES];
    for (lane, w) in arr.iter_mut().zip(bytes.chunks_exact(WORD_BYTES)) {
        *lane = load_word(w);
    }
    Simd::from_array(arr)
}

#[inline(always)]
fn store_lanes<const LANES: usize>(out: &mut [u8], v: Simd<u64, LANES>)
where
    LaneCount<LANES>: SupportedLaneCount,
{
    for (w, lane) in out.chunks_exact_mut(WORD_BYTES).zip(v.to_array()) {
        store_word(w, lane);
    }
}

/// Count the set bits of a packed buffer using vector popcount and a horizontal sum.
#[inline]
pub fn popcount_simd<const LANES: usize>(bits: &[u8]) -> usize
where
    LaneCount<LANES>: SupportedLaneCount,
{
    let mut blocks = bits.chunks_exact(LANES * WORD_BYTES);
    let mut acc = 0usize;
    for block in &mut blocks {
        acc += load_lanes::<LANES>(block).count_ones().reduce_sum() as usize;
    }
    acc + popcount_std(blocks.remainder())
}

/// `dst = dst <op> src` in place over `LANES` words per step, returning the new count.
#[inline]
pub fn bitmask_binop_simd<const LANES: usize>(
    dst: &mut [u8],
    src: &[u8],
    op: LogicalOperator,
) -> usize
where
    LaneCount<LANES>: SupportedLaneCount,
{
    debug_assert_eq!(dst.len(), src.len(), "bitmask_binop_simd: buffer length mismatch");
    let step = LANES * WORD_BYTES;
    let mut d = dst.chunks_exact_mut(step);
    let mut s = src.chunks_exact(step);
    let mut acc = 0usize;
    for (db, sb) in (&mut d).zip(&mut s) {
        let a = load_lanes::<LANES>(db);
        let b = load_lanes::<LANES>(sb);
        let r = match op {
            LogicalOperator::And => a & b,
            LogicalOperator::Or => a | b,
            LogicalOperator::Xor => a ^ b,
            LogicalOperator::AndNot => a & !b,
        };
        acc += r.count_ones().reduce_sum() as usize;
        store_lanes(db, r);
    }
    // Tail: fewer than `LANES` words remain.
    acc + bitmask_binop_std(d.into_remainder(), s.remainder(), op)
}

/// Logical NOT of the first `len` bits in place, returning the new population count.
#[inline]
pub fn bitmask_not_simd<const LANES: usize>(bits: &mut [u8], len: usize) -> usize
where
    LaneCount<LANES>: SupportedLaneCount,
{
    let mut blocks = bits.chunks_exact_mut(LANES * WORD_BYTES);
    for block in &mut blocks {
        let r = !load_lanes::<LANES>(block);
        store_lanes(block, r);
    }
    invert_std(blocks.into_remainder());
    clear_trailing_bits(bits, len);
    popcount_simd::<LANES>(bits)
}
