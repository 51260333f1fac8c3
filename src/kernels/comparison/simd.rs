// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Comparison SIMD Kernels** - *Portable Vector Predicate Scans*
//!
//! `std::simd` scans for the primitive numeric types. Rows are processed in blocks of
//! 64: each block is `64 / LANES` vector compares whose lane bitmasks are shifted into a
//! single `u64`, gated by the matching mask word, stored as eight output bytes and
//! counted with one `count_ones`. The final partial block (fewer than 64 rows, always
//! starting on a byte boundary) goes through the unrolled kernel, so nothing is ever
//! written past `ceil(len / 8)` bytes.
//!
//! Lane widths come from `build.rs`; every width is a power of two no larger than 64.
//! Float compares are IEEE ordered compares, except `simd_ne` which is unordered and
//! therefore true against `NaN`, matching scalar `!=`.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use core::simd::Simd;
use std::simd::cmp::{SimdPartialEq, SimdPartialOrd};

use crate::kernels::comparison::unrolled::match_unrolled;
use crate::operators::Predicate;
use crate::utils::{assert_kernel_buffers, load_word, store_word};

/// Rows per output word.
const BLOCK_ROWS: usize = 64;

#[inline(always)]
fn scan_blocks<T: PartialOrd, const N: usize, F>(
    src: &[T],
    pred: &Predicate<T>,
    bits: &mut [u8],
    mask: Option<&[u8]>,
    lanes: F,
) -> usize
where
    F: Fn(&[T]) -> u64,
{
    assert_kernel_buffers(src.len(), bits, mask);
    let mut cnt = 0usize;
    for (b, (rows, out)) in src
        .chunks_exact(BLOCK_ROWS)
        .zip(bits.chunks_exact_mut(8))
        .enumerate()
    {
        let mut word = 0u64;
        for (k, chunk) in rows.chunks_exact(N).enumerate() {
            word |= lanes(chunk) << (k * N);
        }
        if let Some(m) = mask {
            word &= load_word(&m[b * 8..b * 8 + 8]);
        }
        cnt += word.count_ones() as usize;
        store_word(out, word);
    }

    let done = src.len() / BLOCK_ROWS * BLOCK_ROWS;
    let byte = done / 8;
    cnt + match_unrolled(
        &src[done..],
        pred,
        &mut bits[byte..],
        mask.map(|m| &m[byte..]),
    )
}

macro_rules! impl_match_simd {
    ($fn_name:ident, $ty:ty, $lanes:expr) => {
        #[doc = concat!("Vector scan of a `", stringify!($ty), "` column against `pred`.")]
        ///
        /// Overwrites all `ceil(src.len() / 8)` bytes of `bits`. Panics if `bits`, or
        /// `mask` when given, is not exactly that size.
        #[inline]
        pub fn $fn_name(
            src: &[$ty],
            pred: &Predicate<$ty>,
            bits: &mut [u8],
            mask: Option<&[u8]>,
        ) -> usize {
            const N: usize = $lanes;
            type V = Simd<$ty, N>;
            match *pred {
                Predicate::Equal(x) => {
                    let s = V::splat(x);
                    scan_blocks::<_, N, _>(src, pred, bits, mask, |c| {
                        V::from_slice(c).simd_eq(s).to_bitmask()
                    })
                }
                Predicate::NotEqual(x) => {
                    let s = V::splat(x);
                    scan_blocks::<_, N, _>(src, pred, bits, mask, |c| {
                        V::from_slice(c).simd_ne(s).to_bitmask()
                    })
                }
                Predicate::Less(x) => {
                    let s = V::splat(x);
                    scan_blocks::<_, N, _>(src, pred, bits, mask, |c| {
                        V::from_slice(c).simd_lt(s).to_bitmask()
                    })
                }
                Predicate::LessEqual(x) => {
                    let s = V::splat(x);
                    scan_blocks::<_, N, _>(src, pred, bits, mask, |c| {
                        V::from_slice(c).simd_le(s).to_bitmask()
                    })
                }
                Predicate::Greater(x) => {
                    let s = V::splat(x);
                    scan_blocks::<_, N, _>(src, pred, bits, mask, |c| {
                        V::from_slice(c).simd_gt(s).to_bitmask()
                    })
                }
                Predicate::GreaterEqual(x) => {
                    let s = V::splat(x);
                    scan_blocks::<_, N, _>(src, pred, bits, mask, |c| {
                        V::from_slice(c).simd_ge(s).to_bitmask()
                    })
                }
                Predicate::Between(a, b) => {
                    let (lo, hi) = if b < a { (b, a) } else { (a, b) };
                    let l = V::splat(lo);
                    let h = V::splat(hi);
                    scan_blocks::<_, N, _>(src, pred, bits, mask, |c| {
                        let v = V::from_slice(c);
                        (v.simd_ge(l) & v.simd_le(h)).to_bitmask()
                    })
                }
            }
        }
    };
}

impl_match_simd!(match_simd_i8, i8, W8);
impl_match_simd!(match_simd_u8, u8, W8);
impl_match_simd!(match_simd_i16, i16, W16);
impl_match_simd!(match_simd_u16, u16, W16);
impl_match_simd!(match_simd_i32, i32, W32);
impl_match_simd!(match_simd_u32, u32, W32);
impl_match_simd!(match_simd_f32, f32, W32);
impl_match_simd!(match_simd_i64, i64, W64);
impl_match_simd!(match_simd_u64, u64, W64);
impl_match_simd!(match_simd_f64, f64, W64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::comparison::std::match_std;
    use crate::utils::bytes_for;

    fn preds<T: Copy + PartialOrd>(a: T, b: T) -> Vec<Predicate<T>> {
        vec![
            Predicate::Equal(a),
            Predicate::NotEqual(a),
            Predicate::Less(a),
            Predicate::LessEqual(a),
            Predicate::Greater(a),
            Predicate::GreaterEqual(a),
            Predicate::between(b, a),
            Predicate::Between(a, b),
            Predicate::Between(b, a),
        ]
    }

    fn check<T: Copy + PartialOrd + core::fmt::Debug>(
        src: &[T],
        f: fn(&[T], &Predicate<T>, &mut [u8], Option<&[u8]>) -> usize,
        a: T,
        b: T,
    ) {
        let n = bytes_for(src.len());
        let mask: Vec<u8> = (0..n).map(|i| (i as u8).wrapping_mul(73) ^ 0x5a).collect();
        let mut mask_bits = mask.clone();
        if let Some(last) = mask_bits.last_mut() {
            *last &= crate::utils::tail_mask(src.len());
        }
        for p in preds(a, b) {
            for m in [None, Some(mask_bits.as_slice())] {
                let mut want = vec![0u8; n];
                let mut got = vec![0xffu8; n];
                let nw = match_std(src, &p, &mut want, m);
                let ng = f(src, &p, &mut got, m);
                assert_eq!(want, got, "{p:?} len={}", src.len());
                assert_eq!(nw, ng, "{p:?} len={}", src.len());
            }
        }
    }

    #[test]
    fn vector_kernels_agree_with_scalar() {
        for len in [0usize, 1, 7, 8, 63, 64, 65, 127, 128, 200] {
            let i8s: Vec<i8> = (0..len).map(|i| (i as i32 * 37 % 256 - 128) as i8).collect();
            check(&i8s, match_simd_i8, 5, -20);
            let u8s: Vec<u8> = (0..len).map(|i| (i * 13 % 7) as u8).collect();
            check(&u8s, match_simd_u8, 3, u8::MAX);
            let u16s: Vec<u16> = (0..len).map(|i| (i * 31 % 9) as u16).collect();
            check(&u16s, match_simd_u16, 4, 1);
            let i16s: Vec<i16> = (0..len).map(|i| (i as i16 % 5) - 2).collect();
            check(&i16s, match_simd_i16, 0, -1);
            let i32s: Vec<i32> = (0..len).map(|i| (i as i32 * 17) % 23 - 11).collect();
            check(&i32s, match_simd_i32, 2, -4);
            let u32s: Vec<u32> = (0..len).map(|i| (i as u32 * 7) % 5).collect();
            check(&u32s, match_simd_u32, 2, u32::MAX);
            let u64s: Vec<u64> = (0..len).map(|i| [5, u64::MAX, 0, 9][i % 4]).collect();
            check(&u64s, match_simd_u64, 5, u64::MAX);
            let i64s: Vec<i64> = (0..len).map(|i| [i64::MIN, -1, 0, 3][i % 4]).collect();
            check(&i64s, match_simd_i64, 0, i64::MIN);
            let f32s: Vec<f32> = (0..len)
                .map(|i| if i % 5 == 0 { f32::NAN } else { (i % 7) as f32 - 3.0 })
                .collect();
            check(&f32s, match_simd_f32, 1.0, -2.0);
            check(&f32s, match_simd_f32, f32::NAN, 0.0);
            let f64s: Vec<f64> = (0..len)
                .map(|i| if i % 3 == 0 { f64::NAN } else { (i % 4) as f64 })
                .collect();
            check(&f64s, match_simd_f64, 2.0, f64::INFINITY);
            check(&f64s, match_simd_f64, f64::NAN, f64::NAN);
        }
    }
}
