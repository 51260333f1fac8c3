// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Bitmask Dispatch Module** - *Compile-Time SIMD/Scalar Selection for Bitmask Operations*
//!
//! Selects between the SIMD and scalar bitmask kernels at compile time based on the
//! `simd` feature. Prefer this unless you want to call the underlying kernels directly.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use crate::operators::LogicalOperator;

/// Population count of a packed buffer whose slack bits are zero.
#[inline(always)]
pub fn popcount_bits(bits: &[u8]) -> usize {
    #[cfg(feature = "simd")]
    {
        crate::kernels::bitmask::simd::popcount_simd::<W64>(bits)
    }
    #[cfg(not(feature = "simd"))]
    {
        crate::kernels::bitmask::std::popcount_std(bits)
    }
}

/// `dst = dst <op> src` in place, returning the population count of the result.
#[inline(always)]
pub fn bitmask_binop(dst: &mut [u8], src: &[u8], op: LogicalOperator) -> usize {
    #[cfg(feature = "simd")]
    {
        crate::kernels::bitmask::simd::bitmask_binop_simd::<W64>(dst, src, op)
    }
    #[cfg(not(feature = "simd"))]
    {
        crate::kernels::bitmask::std::bitmask_binop_std(dst, src, op)
    }
}

/// Logical NOT of a `len`-bit buffer in place, returning the new population count.
#[inline(always)]
pub fn bitmask_not(bits: &mut [u8], len: usize) -> usize {
    #[cfg(feature = "simd")]
    {
        crate::kernels::bitmask::simd::bitmask_not_simd::<W64>(bits, len)
    }
    #[cfg(not(feature = "simd"))]
    {
        crate::kernels::bitmask::std::bitmask_not_std(bits, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_round_trip() {
        let mut a = vec![0b0101_0101u8; 17];
        let b = vec![0b0011_0011u8; 17];
        assert_eq!(popcount_bits(&a), 4 * 17);
        let n = bitmask_binop(&mut a, &b, LogicalOperator::Or);
        assert_eq!(n, 6 * 17);
        let n = bitmask_not(&mut a, 17 * 8 - 3);
        assert_eq!(n, 2 * 17 - 1);
        assert_eq!(popcount_bits(&a), n);
    }
}
