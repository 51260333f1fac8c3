// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Bitset** - *Packed Match Results with a Cached Population Count*
//!
//! The result type of every filter kernel. One bit per input row, packed eight to a
//! byte LSB-first: row `i` lives at `1 << (i % 8)` of byte `i / 8`.
//!
//! ## Invariants
//! - `bits.len() == ceil(len / 8)`.
//! - Slack bits past `len` in the final byte are always zero.
//! - `cnt` equals the number of set bits after every public operation.
//!
//! Kernels write straight into the backing bytes through [`Bitset::set_from_kernel`]
//! and report how many bits they set. The bitset adopts that figure rather than
//! recounting.

use core::fmt;

use crate::errors::KernelError;
use crate::kernels::bitmask::clear_trailing_bits;
use crate::kernels::bitmask::dispatch::{bitmask_binop, bitmask_not, popcount_bits};
use crate::operators::LogicalOperator;
use crate::utils::{bit_mask, bytes_for, confirm_equal_len, load_word};

/// Packed boolean vector with a cached population count.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitset {
    bits: Vec<u8>,
    len: usize,
    cnt: usize,
}

impl Bitset {
    /// All-clear bitset of `len` bits.
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![0; bytes_for(len)],
            len,
            cnt: 0,
        }
    }

    /// Bitset of `len` bits, all set to `value`.
    pub fn new_set_all(len: usize, value: bool) -> Self {
        let mut out = Self::new(len);
        out.fill(value);
        out
    }

    /// One bit per element of `values`.
    pub fn from_bools(values: &[bool]) -> Self {
        let mut out = Self::new(values.len());
        for (byte, chunk) in out.bits.iter_mut().zip(values.chunks(8)) {
            for (k, &v) in chunk.iter().enumerate() {
                *byte |= (v as u8) << k;
            }
        }
        out.cnt = popcount_bits(&out.bits);
        out
    }

    /// `len`-bit bitset with the listed positions set.
    ///
    /// Positions `>= len` are ignored, repeats count once.
    pub fn from_indexes(indexes: &[usize], len: usize) -> Self {
        let mut out = Self::new(len);
        for &i in indexes {
            out.set(i);
        }
        out
    }

    /// Adopt an existing packed buffer.
    ///
    /// The buffer must hold at least `ceil(len / 8)` bytes; extra bytes are dropped
    /// and slack bits in the final byte are cleared before counting.
    pub fn from_bytes(mut bytes: Vec<u8>, len: usize) -> Result<Self, KernelError> {
        let need = bytes_for(len);
        if bytes.len() < need {
            return Err(KernelError::LengthMismatch(format!(
                "Bitset::from_bytes: {} bytes cannot hold {} bits",
                bytes.len(),
                len
            )));
        }
        bytes.truncate(need);
        clear_trailing_bits(&mut bytes, len);
        let cnt = popcount_bits(&bytes);
        Ok(Self {
            bits: bytes,
            len,
            cnt,
        })
    }

    /// Logical length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of set bits.
    #[inline]
    pub fn count(&self) -> usize {
        self.cnt
    }

    /// Packed backing bytes, `ceil(len / 8)` of them.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Consume into the packed backing bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    /// Returns `true` if bit `i` is set. Out-of-range positions read as `false`.
    #[inline]
    pub fn is_set(&self, i: usize) -> bool {
        i < self.len && self.bits[i >> 3] & bit_mask(i) != 0
    }

    /// Set bit `i`. Out-of-range positions are ignored.
    #[inline]
    pub fn set(&mut self, i: usize) {
        if i >= self.len {
            return;
        }
        let byte = &mut self.bits[i >> 3];
        if *byte & bit_mask(i) == 0 {
            *byte |= bit_mask(i);
            self.cnt += 1;
        }
    }

    /// Clear bit `i`. Out-of-range positions are ignored.
    #[inline]
    pub fn clear(&mut self, i: usize) {
        if i >= self.len {
            return;
        }
        let byte = &mut self.bits[i >> 3];
        if *byte & bit_mask(i) != 0 {
            *byte &= !bit_mask(i);
            self.cnt -= 1;
        }
    }

    /// Set or clear bit `i`.
    #[inline]
    pub fn set_to(&mut self, i: usize, value: bool) {
        if value { self.set(i) } else { self.clear(i) }
    }

    /// Change the logical length to `len` bits.
    ///
    /// Growing keeps existing content and zero-fills the new positions. Shrinking drops
    /// the clipped positions and recounts.
    pub fn resize(&mut self, len: usize) {
        let need = bytes_for(len);
        if len >= self.len {
            self.bits.resize(need, 0);
            self.len = len;
            return;
        }
        self.bits.truncate(need);
        self.len = len;
        clear_trailing_bits(&mut self.bits, len);
        self.cnt = popcount_bits(&self.bits);
    }

    /// Consuming form of [`Bitset::resize`] used to size a kernel output buffer.
    ///
    /// Reuses the existing allocation when it is already large enough.
    #[inline]
    pub fn ensure_capacity(mut self, len: usize) -> Self {
        self.resize(len);
        self
    }

    /// Clear every bit, keeping the length.
    #[inline]
    pub fn reset(&mut self) {
        self.bits.fill(0);
        self.cnt = 0;
    }

    /// Set every bit to `value`.
    pub fn fill(&mut self, value: bool) {
        if !value {
            self.reset();
            return;
        }
        self.bits.fill(0xff);
        clear_trailing_bits(&mut self.bits, self.len);
        self.cnt = self.len;
    }

    /// Hand the whole backing buffer to a kernel and adopt the count it returns.
    ///
    /// The kernel overwrites all `ceil(len / 8)` bytes and must return exactly the
    /// number of bits it left set. Slack bits are cleared afterwards.
    #[inline]
    pub fn set_from_kernel<F>(&mut self, kernel: F)
    where
        F: FnOnce(&mut [u8]) -> usize,
    {
        let cnt = kernel(&mut self.bits);
        clear_trailing_bits(&mut self.bits, self.len);
        debug_assert_eq!(
            cnt,
            popcount_bits(&self.bits),
            "kernel reported a match count that disagrees with its output"
        );
        self.cnt = cnt;
    }

    #[inline]
    fn combine(&mut self, other: &Bitset, op: LogicalOperator) -> Result<(), KernelError> {
        confirm_equal_len("Bitset logical op", self.len, other.len)?;
        self.cnt = bitmask_binop(&mut self.bits, &other.bits, op);
        Ok(())
    }

    /// `self &= other`
    pub fn and(&mut self, other: &Bitset) -> Result<(), KernelError> {
        self.combine(other, LogicalOperator::And)
    }

    /// `self |= other`
    pub fn or(&mut self, other: &Bitset) -> Result<(), KernelError> {
        self.combine(other, LogicalOperator::Or)
    }

    /// `self &= !other`
    pub fn and_not(&mut self, other: &Bitset) -> Result<(), KernelError> {
        self.combine(other, LogicalOperator::AndNot)
    }

    /// `self ^= other`
    pub fn xor(&mut self, other: &Bitset) -> Result<(), KernelError> {
        self.combine(other, LogicalOperator::Xor)
    }

    /// Flip every bit in place.
    pub fn not(&mut self) {
        self.cnt = bitmask_not(&mut self.bits, self.len);
    }

    /// Iterator over the positions of set bits, ascending.
    #[inline]
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            bits: &self.bits,
            word_idx: 0,
            cur: 0,
        }
    }

    /// Positions of all set bits, ascending.
    pub fn indexes(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.cnt);
        out.extend(self.iter_ones());
        out
    }

    /// Unpack to one `bool` per position.
    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.len)
            .map(|i| self.bits[i >> 3] & bit_mask(i) != 0)
            .collect()
    }
}

impl fmt::Debug for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitset(len={}, cnt={}, [", self.len, self.cnt)?;
        for (i, b) in self.bits.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        f.write_str("])")
    }
}

/// Iterator over set positions of a [`Bitset`], produced by [`Bitset::iter_ones`].
///
/// Walks the buffer a little-endian word at a time, peeling the lowest set bit.
pub struct Ones<'a> {
    bits: &'a [u8],
    word_idx: usize,
    cur: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.cur == 0 {
            let start = self.word_idx * 8;
            if start >= self.bits.len() {
                return None;
            }
            self.cur = load_word(&self.bits[start..]);
            self.word_idx += 1;
        }
        let tz = self.cur.trailing_zeros() as usize;
        self.cur &= self.cur - 1;
        Some((self.word_idx - 1) * 64 + tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed_and_sized() {
        let b = Bitset::new(19);
        assert_eq!(b.len(), 19);
        assert_eq!(b.count(), 0);
        assert_eq!(b.as_bytes(), &[0, 0, 0]);
        assert!(Bitset::new(0).is_empty());
        assert_eq!(Bitset::new(0).as_bytes().len(), 0);
    }

    #[test]
    fn set_and_clear_keep_count_exact() {
        let mut b = Bitset::new(10);
        b.set(0);
        b.set(9);
        b.set(9);
        b.set(10);
        assert_eq!(b.count(), 2);
        assert_eq!(b.as_bytes(), &[0x01, 0x02]);
        assert!(b.is_set(9));
        assert!(!b.is_set(10));
        b.clear(9);
        b.clear(9);
        b.clear(42);
        assert_eq!(b.count(), 1);
        b.set_to(3, true);
        assert_eq!(b.indexes(), vec![0, 3]);
    }

    #[test]
    fn from_bools_is_lsb_first() {
        let b = Bitset::from_bools(&[true, false, true, false, false, false, false, false, true]);
        assert_eq!(b.as_bytes(), &[0x05, 0x01]);
        assert_eq!(b.count(), 3);
        assert_eq!(
            b.to_bools(),
            vec![true, false, true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn from_bytes_masks_slack_and_recounts() {
        let b = Bitset::from_bytes(vec![0xff, 0xff, 0xaa], 12).unwrap();
        assert_eq!(b.as_bytes(), &[0xff, 0x0f]);
        assert_eq!(b.count(), 12);
        assert!(matches!(
            Bitset::from_bytes(vec![0xff], 9),
            Err(KernelError::LengthMismatch(_))
        ));
    }

    #[test]
    fn resize_grows_with_zeros_and_shrinks_with_recount() {
        let mut b = Bitset::new_set_all(10, true);
        assert_eq!(b.as_bytes(), &[0xff, 0x03]);
        b.resize(20);
        assert_eq!(b.count(), 10);
        assert_eq!(b.as_bytes(), &[0xff, 0x03, 0x00]);
        b.resize(4);
        assert_eq!(b.count(), 4);
        assert_eq!(b.as_bytes(), &[0x0f]);
        let b = b.ensure_capacity(16);
        assert_eq!(b.len(), 16);
        assert_eq!(b.count(), 4);
    }

    #[test]
    fn fill_and_reset() {
        let mut b = Bitset::new(13);
        b.fill(true);
        assert_eq!(b.count(), 13);
        assert_eq!(b.as_bytes(), &[0xff, 0x1f]);
        b.reset();
        assert_eq!(b.count(), 0);
        assert_eq!(b.as_bytes(), &[0, 0]);
    }

    #[test]
    fn logical_ops_keep_count_exact() {
        let mut a = Bitset::from_indexes(&[0, 2, 4, 70], 75);
        let b = Bitset::from_indexes(&[2, 3, 70, 74], 75);

        let mut x = a.clone();
        x.and(&b).unwrap();
        assert_eq!(x.indexes(), vec![2, 70]);
        assert_eq!(x.count(), 2);

        let mut x = a.clone();
        x.or(&b).unwrap();
        assert_eq!(x.indexes(), vec![0, 2, 3, 4, 70, 74]);
        assert_eq!(x.count(), 6);

        let mut x = a.clone();
        x.and_not(&b).unwrap();
        assert_eq!(x.indexes(), vec![0, 4]);

        let mut x = a.clone();
        x.xor(&b).unwrap();
        assert_eq!(x.indexes(), vec![0, 3, 4, 74]);

        a.not();
        assert_eq!(a.count(), 71);
        assert!(!a.is_set(70));
        assert!(a.is_set(74));
        assert_eq!(a.as_bytes()[8], 0xbf);
        assert_eq!(a.as_bytes()[9], 0x07);
    }

    #[test]
    fn logical_ops_reject_mismatched_lengths() {
        let mut a = Bitset::new(8);
        let b = Bitset::new(9);
        assert!(matches!(a.and(&b), Err(KernelError::LengthMismatch(_))));
    }

    #[test]
    fn set_from_kernel_adopts_count() {
        let mut b = Bitset::new(12);
        b.set_from_kernel(|bits| {
            bits[0] = 0x81;
            bits[1] = 0x08;
            3
        });
        assert_eq!(b.count(), 3);
        assert_eq!(b.indexes(), vec![0, 7, 11]);
    }

    #[test]
    fn iter_ones_crosses_word_boundaries() {
        let idx = vec![1, 63, 64, 65, 127, 128, 200];
        let b = Bitset::from_indexes(&idx, 201);
        assert_eq!(b.iter_ones().collect::<Vec<_>>(), idx);
        assert_eq!(Bitset::new(100).iter_ones().next(), None);
    }
}
