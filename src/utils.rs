// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Bit Packing and Buffer Contract Helpers*
//!
//! Small helpers shared by the bitset, the bitmask kernels and the comparison kernels.
//! Bit `i` of a packed buffer always lives at `1 << (i % 8)` of byte `i / 8` (LSB-first).

use crate::config::BITS_PER_BYTE;
use crate::errors::KernelError;

/// Number of bytes needed to hold `len` packed bits.
#[inline(always)]
pub const fn bytes_for(len: usize) -> usize {
    len.div_ceil(BITS_PER_BYTE)
}

/// Single-bit mask selecting position `i` within its byte.
#[inline(always)]
pub const fn bit_mask(i: usize) -> u8 {
    1u8 << (i & 7)
}

/// Mask of the valid bits in the final byte of a `len`-bit buffer.
///
/// `0xff` when `len` is a multiple of eight.
#[inline(always)]
pub const fn tail_mask(len: usize) -> u8 {
    match len & 7 {
        0 => 0xff,
        used => (1u8 << used) - 1,
    }
}

/// Load up to eight bytes as a little-endian word; missing high bytes read as zero.
#[inline(always)]
pub fn load_word(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}

/// Store the low `out.len()` bytes (at most eight) of `word` little-endian.
#[inline(always)]
pub fn store_word(out: &mut [u8], word: u64) {
    let n = out.len().min(8);
    out[..n].copy_from_slice(&word.to_le_bytes()[..n]);
}

/// Returns a `LengthMismatch` error when `a != b`.
#[inline(always)]
pub fn confirm_equal_len(label: &str, a: usize, b: usize) -> Result<(), KernelError> {
    if a != b {
        return Err(KernelError::LengthMismatch(format!(
            "{}: length mismatch (lhs: {}, rhs: {})",
            label, a, b
        )));
    }
    Ok(())
}

/// Asserts a raw kernel buffer holds exactly `bytes_for(len)` bytes.
///
/// Contract violation, so this panics rather than returning an error.
#[inline(always)]
pub fn assert_kernel_buffers(len: usize, bits: &[u8], mask: Option<&[u8]>) {
    let need = bytes_for(len);
    assert_eq!(
        bits.len(),
        need,
        "kernel output buffer holds {} bytes, {} rows need {}",
        bits.len(),
        len,
        need
    );
    if let Some(m) = mask {
        assert_eq!(
            m.len(),
            need,
            "kernel mask buffer holds {} bytes, {} rows need {}",
            m.len(),
            len,
            need
        );
    }
}
