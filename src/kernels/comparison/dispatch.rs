// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Comparison Dispatch Module** - *Capability-Driven Kernel Selection*
//!
//! Resolves a [`KernelConfig`] to one [`KernelVariant`] and runs the predicate scans
//! through it. Selection is a pure function of the config and the compiled features;
//! there is no global state, so two dispatchers with different configs can run side by
//! side, which is how the equivalence tests drive every variant on one machine.

use log::debug;

use crate::bitset::Bitset;
use crate::config::{KernelConfig, SimdLevel};
use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::comparison::std::match_std;
use crate::kernels::comparison::unrolled::match_unrolled;
use crate::operators::Predicate;
use crate::traits::element::Element;

/// Concrete kernel implementation a dispatcher runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelVariant {
    /// Scalar reference kernel.
    Std,
    /// Eight-rows-per-byte unrolled kernel.
    Unrolled,
    /// Per-type vector kernel. Falls back to [`KernelVariant::Unrolled`] for types
    /// without one, or when the crate is built without `simd`.
    Simd,
}

impl KernelVariant {
    /// Map a capability level to the best variant this build can run.
    #[inline]
    pub const fn select(config: &KernelConfig) -> Self {
        match config.level {
            SimdLevel::Scalar => KernelVariant::Std,
            SimdLevel::Wide => KernelVariant::Unrolled,
            SimdLevel::Vector => {
                if cfg!(feature = "simd") {
                    KernelVariant::Simd
                } else {
                    KernelVariant::Unrolled
                }
            }
        }
    }

    /// Run this variant over raw buffers.
    ///
    /// `bits`, and `mask` when given, must hold exactly `ceil(src.len() / 8)` bytes.
    #[inline]
    pub fn scan<T: Element>(
        self,
        src: &[T],
        pred: &Predicate<T>,
        bits: &mut [u8],
        mask: Option<&[u8]>,
    ) -> usize {
        match self {
            KernelVariant::Std => match_std(src, pred, bits, mask),
            KernelVariant::Unrolled => match_unrolled(src, pred, bits, mask),
            KernelVariant::Simd => T::scan_vector(src, pred, bits, mask),
        }
    }
}

/// Filter entry points bound to one resolved kernel variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterKernels {
    variant: KernelVariant,
}

impl FilterKernels {
    /// Resolve the kernel variant for `config`.
    pub fn new(config: &KernelConfig) -> Self {
        let variant = KernelVariant::select(config);
        debug!(
            "filter kernels: requested {:?}, compiled {:?}, using {:?}",
            config.level,
            SimdLevel::compiled(),
            variant
        );
        Self { variant }
    }

    /// Pin a specific variant, bypassing capability resolution.
    #[inline]
    pub const fn with_variant(variant: KernelVariant) -> Self {
        Self { variant }
    }

    #[inline]
    pub fn variant(&self) -> KernelVariant {
        self.variant
    }

    /// Scan `src` against `pred`.
    ///
    /// `out` is reused as the result buffer when given; its previous contents are
    /// discarded and it is resized to `src.len()` bits. When `mask` is given it must
    /// have the same length as `src`, and only rows whose mask bit is set can match.
    pub fn match_predicate<T: Element>(
        &self,
        src: &[T],
        pred: &Predicate<T>,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        if let Some(m) = mask {
            if m.len() != src.len() {
                return Err(KernelError::LengthMismatch(log_length_mismatch(
                    "match_predicate",
                    src.len(),
                    m.len(),
                )));
            }
        }
        let mut out = out.unwrap_or_default().ensure_capacity(src.len());
        let variant = self.variant;
        out.set_from_kernel(|bits| variant.scan(src, pred, bits, mask.map(Bitset::as_bytes)));
        Ok(out)
    }

    /// Rows equal to `v`.
    #[inline]
    pub fn match_equal<T: Element>(
        &self,
        src: &[T],
        v: T,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        self.match_predicate(src, &Predicate::Equal(v), out, mask)
    }

    /// Rows not equal to `v`. For floats this includes every `NaN` row.
    #[inline]
    pub fn match_not_equal<T: Element>(
        &self,
        src: &[T],
        v: T,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        self.match_predicate(src, &Predicate::NotEqual(v), out, mask)
    }

    /// Rows strictly less than `v`.
    #[inline]
    pub fn match_less<T: Element>(
        &self,
        src: &[T],
        v: T,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        self.match_predicate(src, &Predicate::Less(v), out, mask)
    }

    /// Rows less than or equal to `v`.
    #[inline]
    pub fn match_less_equal<T: Element>(
        &self,
        src: &[T],
        v: T,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        self.match_predicate(src, &Predicate::LessEqual(v), out, mask)
    }

    /// Rows strictly greater than `v`.
    #[inline]
    pub fn match_greater<T: Element>(
        &self,
        src: &[T],
        v: T,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        self.match_predicate(src, &Predicate::Greater(v), out, mask)
    }

    /// Rows greater than or equal to `v`.
    #[inline]
    pub fn match_greater_equal<T: Element>(
        &self,
        src: &[T],
        v: T,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        self.match_predicate(src, &Predicate::GreaterEqual(v), out, mask)
    }

    /// Rows in the closed range between `a` and `b`, whichever order they are given in.
    #[inline]
    pub fn match_between<T: Element>(
        &self,
        src: &[T],
        a: T,
        b: T,
        out: Option<Bitset>,
        mask: Option<&Bitset>,
    ) -> Result<Bitset, KernelError> {
        self.match_predicate(src, &Predicate::between(a, b), out, mask)
    }
}

impl Default for FilterKernels {
    fn default() -> Self {
        DEFAULT_KERNELS
    }
}

const DEFAULT_KERNELS: FilterKernels =
    FilterKernels::with_variant(KernelVariant::select(&KernelConfig::new(SimdLevel::Wide)));

// --- Entry Points (default configuration) ---

/// [`FilterKernels::match_predicate`] with the default configuration.
#[inline]
pub fn match_predicate<T: Element>(
    src: &[T],
    pred: &Predicate<T>,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_predicate(src, pred, out, mask)
}

/// [`FilterKernels::match_equal`] with the default configuration.
#[inline]
pub fn match_equal<T: Element>(
    src: &[T],
    v: T,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_equal(src, v, out, mask)
}

/// [`FilterKernels::match_not_equal`] with the default configuration.
#[inline]
pub fn match_not_equal<T: Element>(
    src: &[T],
    v: T,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_not_equal(src, v, out, mask)
}

/// [`FilterKernels::match_less`] with the default configuration.
#[inline]
pub fn match_less<T: Element>(
    src: &[T],
    v: T,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_less(src, v, out, mask)
}

/// [`FilterKernels::match_less_equal`] with the default configuration.
#[inline]
pub fn match_less_equal<T: Element>(
    src: &[T],
    v: T,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_less_equal(src, v, out, mask)
}

/// [`FilterKernels::match_greater`] with the default configuration.
#[inline]
pub fn match_greater<T: Element>(
    src: &[T],
    v: T,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_greater(src, v, out, mask)
}

/// [`FilterKernels::match_greater_equal`] with the default configuration.
#[inline]
pub fn match_greater_equal<T: Element>(
    src: &[T],
    v: T,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_greater_equal(src, v, out, mask)
}

/// [`FilterKernels::match_between`] with the default configuration.
#[inline]
pub fn match_between<T: Element>(
    src: &[T],
    a: T,
    b: T,
    out: Option<Bitset>,
    mask: Option<&Bitset>,
) -> Result<Bitset, KernelError> {
    DEFAULT_KERNELS.match_between(src, a, b, out, mask)
}
