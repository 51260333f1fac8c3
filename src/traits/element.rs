// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Element trait** - *Column types the filter kernels can scan*

use crate::kernels::comparison::unrolled::match_unrolled;
use crate::operators::Predicate;
use crate::types::Timestamp;

/// A scalar column type accepted by the filter kernels.
///
/// The scalar and unrolled kernels are generic over any `PartialOrd` type. The only
/// per-type hook is [`Element::scan_vector`], which primitive numerics override with
/// their `std::simd` kernel when the `simd` feature is enabled. Everything else, byte
/// strings included, falls back to the unrolled kernel, so selecting the vector level
/// is always safe.
pub trait Element: PartialOrd + Sized {
    /// Vector-level scan of `src` against `pred`, writing `bits` and returning the count.
    #[inline(always)]
    fn scan_vector(
        src: &[Self],
        pred: &Predicate<Self>,
        bits: &mut [u8],
        mask: Option<&[u8]>,
    ) -> usize {
        match_unrolled(src, pred, bits, mask)
    }
}

macro_rules! impl_element_numeric {
    ($($ty:ty => $simd_fn:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                #[cfg(feature = "simd")]
                #[inline(always)]
                fn scan_vector(
                    src: &[Self],
                    pred: &Predicate<Self>,
                    bits: &mut [u8],
                    mask: Option<&[u8]>,
                ) -> usize {
                    crate::kernels::comparison::simd::$simd_fn(src, pred, bits, mask)
                }
            }
        )*
    };
}

impl_element_numeric!(
    i8 => match_simd_i8,
    u8 => match_simd_u8,
    i16 => match_simd_i16,
    u16 => match_simd_u16,
    i32 => match_simd_i32,
    u32 => match_simd_u32,
    f32 => match_simd_f32,
    i64 => match_simd_i64,
    u64 => match_simd_u64,
    f64 => match_simd_f64,
);

impl Element for Timestamp {
    /// Scans the raw nanoseconds with the `i64` kernel.
    #[inline(always)]
    fn scan_vector(
        src: &[Self],
        pred: &Predicate<Self>,
        bits: &mut [u8],
        mask: Option<&[u8]>,
    ) -> usize {
        let nanos = Timestamp::as_nanos_slice(src);
        i64::scan_vector(nanos, &pred.map(|t| t.as_nanos()), bits, mask)
    }
}

impl Element for Vec<u8> {}

impl Element for &[u8] {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_scans_as_nanos() {
        let src: Vec<Timestamp> = (0..70).map(|i| Timestamp::from_secs(i % 10)).collect();
        let mut bits = vec![0u8; 9];
        let pred = Predicate::between(Timestamp::from_secs(7), Timestamp::from_secs(3));
        let n = Timestamp::scan_vector(&src, &pred, &mut bits, None);
        assert_eq!(n, 7 * 5);
        assert_eq!(bits[0], 0b1111_1000);
    }

    #[test]
    fn owned_byte_strings_use_fallback() {
        let src = vec![b"a".to_vec(), b"bb".to_vec(), b"a".to_vec()];
        let mut bits = vec![0u8; 1];
        let n = Vec::<u8>::scan_vector(&src, &Predicate::NotEqual(b"a".to_vec()), &mut bits, None);
        assert_eq!(n, 1);
        assert_eq!(bits, vec![0b010]);
    }
}
