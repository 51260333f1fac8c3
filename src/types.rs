// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Column Scalar Types** - *Types without a native Rust primitive*

use core::fmt;

/// Point in time as signed nanoseconds since the Unix epoch.
///
/// `#[repr(transparent)]` over `i64`, so a `&[Timestamp]` column can be scanned by the
/// 64-bit integer vector kernels without copying.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const MIN: Timestamp = Timestamp(i64::MIN);
    pub const MAX: Timestamp = Timestamp(i64::MAX);
    pub const UNIX_EPOCH: Timestamp = Timestamp(0);

    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Timestamp(nanos)
    }

    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000_000))
    }

    #[inline]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Reinterpret a timestamp column as its raw nanosecond values.
    #[inline]
    pub fn as_nanos_slice(src: &[Timestamp]) -> &[i64] {
        // SAFETY: `Timestamp` is `repr(transparent)` over `i64`, so layout,
        // alignment and validity of every bit pattern are identical.
        unsafe { core::slice::from_raw_parts(src.as_ptr() as *const i64, src.len()) }
    }
}

impl From<i64> for Timestamp {
    #[inline]
    fn from(nanos: i64) -> Self {
        Timestamp(nanos)
    }
}

impl From<Timestamp> for i64 {
    #[inline]
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}
