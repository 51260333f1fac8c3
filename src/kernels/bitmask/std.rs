// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Bitmask Standard Kernels** - *Scalar Word-at-a-Time Bitmask Operations*
//!
//! Portable implementations that walk a packed buffer eight bytes at a time as
//! little-endian `u64` words, finishing any ragged tail with a partial word load.
//! These are the fallback when the `simd` feature is off and the tail handler for
//! the SIMD kernels.

use crate::kernels::bitmask::{WORD_BYTES, apply_logical, clear_trailing_bits};
use crate::operators::LogicalOperator;
use crate::utils::{load_word, store_word};

/// Count the set bits of a packed buffer.
#[inline]
pub fn popcount_std(bits: &[u8]) -> usize {
    let mut chunks = bits.chunks_exact(WORD_BYTES);
    let mut acc = 0usize;
    for w in &mut chunks {
        acc += load_word(w).count_ones() as usize;
    }
    acc + load_word(chunks.remainder()).count_ones() as usize
}

/// `dst = dst <op> src` in place, returning the population count of the result.
///
/// Both buffers must be the same length. Zero slack bits on both sides stay zero
/// under every [`LogicalOperator`], so no trailing clean-up is needed.
#[inline]
pub fn bitmask_binop_std(dst: &mut [u8], src: &[u8], op: LogicalOperator) -> usize {
    debug_assert_eq!(dst.len(), src.len(), "bitmask_binop_std: buffer length mismatch");
    let mut acc = 0usize;
    let mut d = dst.chunks_exact_mut(WORD_BYTES);
    let mut s = src.chunks_exact(WORD_BYTES);
    for (dw, sw) in (&mut d).zip(&mut s) {
        let r = apply_logical(op, load_word(dw), load_word(sw));
        store_word(dw, r);
        acc += r.count_ones() as usize;
    }
    let dt = d.into_remainder();
    if !dt.is_empty() {
        let r = apply_logical(op, load_word(dt), load_word(s.remainder()));
        store_word(dt, r);
        acc += r.count_ones() as usize;
    }
    acc
}

/// Flip every byte of `bits` without touching the slack bits' cleanup.
#[inline]
pub fn invert_std(bits: &mut [u8]) {
    let mut chunks = bits.chunks_exact_mut(WORD_BYTES);
    for w in &mut chunks {
        let r = !load_word(w);
        store_word(w, r);
    }
    for b in chunks.into_remainder() {
        *b = !*b;
    }
}

/// Logical NOT of the first `len` bits in place, returning the new population count.
#[inline]
pub fn bitmask_not_std(bits: &mut [u8], len: usize) -> usize {
    invert_std(bits);
    clear_trailing_bits(bits, len);
    popcount_std(bits)
}
