// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Comparison Kernels Module** - *Predicate Scans into Packed Bitsets*
//!
//! Scan a column against one of seven predicates and write the matching row positions
//! into a packed [`Bitset`](crate::bitset::Bitset), optionally gated by an input mask.
//!
//! ## Variants
//! - [`std`]: scalar reference scan, one bit at a time.
//! - [`unrolled`]: eight rows assembled into one byte per step. Portable.
//! - `simd`: `std::simd` block scans for primitive numerics (feature `simd`).
//!
//! ## Shared contract
//! - Output and mask buffers hold exactly `ceil(len / 8)` bytes; anything else panics.
//! - Every output byte is overwritten, so prior buffer contents never leak through.
//! - A row whose mask bit is clear is never set and never counted.
//! - The returned count is the number of bits set by this call, after masking.
//!
//! [`dispatch`] picks a variant from a [`KernelConfig`](crate::config::KernelConfig) and is
//! the intended entry point. Every variant produces byte-identical output.

pub mod dispatch;
#[cfg(feature = "simd")]
pub mod simd;
pub mod std;
pub mod unrolled;
