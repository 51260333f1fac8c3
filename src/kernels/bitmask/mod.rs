// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Bitmask Kernels Module** - *Word-Level Operations on Packed Bitsets*
//!
//! Population count and in-place logical combination of packed LSB-first byte buffers.
//! The [`Bitset`](crate::bitset::Bitset) type drives these to keep its cached count exact
//! after every mutation.
//!
//! ## Layout
//! - [`dispatch`]: compile-time selection between the SIMD and scalar paths. Prefer this.
//! - [`std`]: scalar word-at-a-time implementations.
//! - `simd`: `std::simd` implementations, compiled with the `simd` feature.
//!
//! Every function here assumes the slack bits past the logical length are zero on entry
//! and leaves them zero on exit.

pub mod dispatch;
#[cfg(feature = "simd")]
pub mod simd;
pub mod std;

use crate::operators::LogicalOperator;
use crate::utils::tail_mask;

/// Number of bits in a machine word for word-level bitmask calculations.
pub const WORD_BITS: usize = 64;

/// Number of bytes in a machine word.
pub const WORD_BYTES: usize = WORD_BITS / 8;

/// Number of u64 words needed to cover `len` bits.
#[inline(always)]
pub fn words_for(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// Zero all slack bits at positions `>= len` in the final byte.
#[inline(always)]
pub fn clear_trailing_bits(bits: &mut [u8], len: usize) {
    if len == 0 {
        return;
    }
    if let Some(last) = bits.last_mut() {
        *last &= tail_mask(len);
    }
}

/// Apply `op` to a pair of words.
#[inline(always)]
pub(crate) fn apply_logical(op: LogicalOperator, a: u64, b: u64) -> u64 {
    match op {
        LogicalOperator::And => a & b,
        LogicalOperator::Or => a | b,
        LogicalOperator::Xor => a ^ b,
        LogicalOperator::AndNot => a & !b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_for() {
        assert_eq!(words_for(0), 0);
        assert_eq!(words_for(1), 1);
        assert_eq!(words_for(64), 1);
        assert_eq!(words_for(65), 2);
    }

    #[test]
    fn test_clear_trailing_bits() {
        let mut bits = vec![0xff, 0xff];
        clear_trailing_bits(&mut bits, 11);
        assert_eq!(bits, vec![0xff, 0x07]);
        let mut bits = vec![0xff];
        clear_trailing_bits(&mut bits, 8);
        assert_eq!(bits, vec![0xff]);
        let mut empty: Vec<u8> = vec![];
        clear_trailing_bits(&mut empty, 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_apply_logical() {
        assert_eq!(apply_logical(LogicalOperator::And, 0b1100, 0b1010), 0b1000);
        assert_eq!(apply_logical(LogicalOperator::Or, 0b1100, 0b1010), 0b1110);
        assert_eq!(apply_logical(LogicalOperator::Xor, 0b1100, 0b1010), 0b0110);
        assert_eq!(apply_logical(LogicalOperator::AndNot, 0b1100, 0b1010), 0b0100);
    }
}
