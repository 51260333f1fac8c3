// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **simd-match** - *Predicate Filter Kernels and Sorted-Sequence Search*
//!
//! Building blocks for the scan and lookup layers of a columnar store:
//! - [`kernels::comparison`] scans a column against `==`, `!=`, `<`, `<=`, `>`, `>=` or a
//!   closed range and returns the matching rows as a packed [`Bitset`], optionally gated
//!   by an input mask. Scalar, unrolled and `std::simd` variants produce identical bytes;
//!   which one runs is picked from an explicit [`KernelConfig`].
//! - [`kernels::sorted`] answers membership, position, range-overlap and set questions
//!   over ascending sequences.
//!
//! Supported element types: `i8`..`i64`, `u8`..`u64`, `f32`, `f64`, [`Timestamp`] and byte
//! strings (`Vec<u8>`, `&[u8]`).

// The vector kernels use `std::simd`, which is nightly-only at the time of writing.
// compile with RUSTFLAGS="-C target-cpu=native" cargo +nightly build --features simd
#![cfg_attr(feature = "simd", feature(portable_simd))]

pub mod bitset;
pub mod operators;
pub mod types;

pub mod kernels {
    pub mod bitmask;
    pub mod comparison;
    pub mod sorted;
}

pub mod traits {
    pub mod element;
    pub mod sorted;
}

pub mod config;
pub mod errors;
pub mod utils;

pub use bitset::Bitset;
pub use config::{KernelConfig, SimdLevel};
pub use errors::KernelError;
pub use kernels::comparison::dispatch::{FilterKernels, KernelVariant};
pub use operators::{ComparisonOperator, LogicalOperator, Predicate};
pub use traits::element::Element;
pub use traits::sorted::SortedElement;
pub use types::Timestamp;
