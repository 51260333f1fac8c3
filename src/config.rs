// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Configuration** - *Kernel Selection and Runtime Behaviour Parameters*
//!
//! The hardware capability level is detected elsewhere, once, and handed to this crate
//! as a plain value. Nothing here is process-wide or mutable, so tests can drive every
//! kernel variant on the same machine just by constructing a different [`KernelConfig`].

/// Number of rows packed into one byte of a [`Bitset`](crate::bitset::Bitset).
pub const BITS_PER_BYTE: usize = 8;

/// Minimum input length before `unique` hands its sort step to rayon.
///
/// Only consulted with the `parallel_sort` feature. Below this the thread-pool
/// hand-off costs more than the sort.
pub const PARALLEL_SORT_THRESHOLD: usize = 1 << 16;

/// Capability level reported by an external CPU-feature provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimdLevel {
    /// No acceleration. One element, one bit at a time.
    Scalar,
    /// Wide registers available. Rows are evaluated eight at a time and packed
    /// straight into output bytes, which the compiler auto-vectorises.
    Wide,
    /// Full vector unit. Uses the `std::simd` kernels when the crate is built with
    /// the `simd` feature, otherwise behaves as [`SimdLevel::Wide`].
    Vector,
}

impl SimdLevel {
    /// Highest level this build can actually execute.
    #[inline]
    pub const fn compiled() -> SimdLevel {
        if cfg!(feature = "simd") {
            SimdLevel::Vector
        } else {
            SimdLevel::Wide
        }
    }
}

/// Configuration consumed by the kernel dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    pub level: SimdLevel,
}

impl KernelConfig {
    /// Create a config for an explicit capability level.
    #[inline]
    pub const fn new(level: SimdLevel) -> Self {
        Self { level }
    }

    /// Build from the boolean flags of a capability provider.
    ///
    /// `has_vector` wins over `has_wide` when both are set.
    #[inline]
    pub const fn from_flags(has_wide: bool, has_vector: bool) -> Self {
        let level = if has_vector {
            SimdLevel::Vector
        } else if has_wide {
            SimdLevel::Wide
        } else {
            SimdLevel::Scalar
        };
        Self { level }
    }

    /// Scalar-only config, mostly useful as the reference side of equivalence tests.
    #[inline]
    pub const fn scalar() -> Self {
        Self::new(SimdLevel::Scalar)
    }
}

/// Defaults to [`SimdLevel::Wide`]; the unrolled kernel is plain portable Rust and is
/// safe on every target.
impl Default for KernelConfig {
    fn default() -> Self {
        Self::new(SimdLevel::Wide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flags_prefers_highest_level() {
        assert_eq!(KernelConfig::from_flags(false, false).level, SimdLevel::Scalar);
        assert_eq!(KernelConfig::from_flags(true, false).level, SimdLevel::Wide);
        assert_eq!(KernelConfig::from_flags(false, true).level, SimdLevel::Vector);
        assert_eq!(KernelConfig::from_flags(true, true).level, SimdLevel::Vector);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(SimdLevel::Scalar < SimdLevel::Wide);
        assert!(SimdLevel::Wide < SimdLevel::Vector);
        assert!(SimdLevel::compiled() >= SimdLevel::Wide);
    }
}
