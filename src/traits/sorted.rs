// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **SortedElement trait** - *Ordering and offset capabilities for sorted sequences*
//!
//! The sorted-sequence algorithms search with the type's native `PartialOrd`, which is
//! what callers compare against. Two extra capabilities come from here:
//! - a total order for sorting and deduplication, so `NaN` can never stall or corrupt
//!   a sort;
//! - an integer offset between two values, which enables the O(1) dense lookup path.

use core::cmp::Ordering;

use num_traits::float::TotalOrder;

use crate::types::Timestamp;

/// Element type of a sorted sequence.
pub trait SortedElement: PartialOrd + Clone + Send {
    /// Total order consistent with `PartialOrd` wherever the latter is defined.
    ///
    /// Floats use IEEE-754 `totalOrder`: `-NaN < -inf < ... < -0.0 < +0.0 < ... < +inf < +NaN`.
    fn sort_cmp(&self, other: &Self) -> Ordering;

    /// `self - base` as an index offset, when the type is an integer and the
    /// difference is non-negative and fits in `usize`.
    #[inline(always)]
    fn offset_from(&self, _base: &Self) -> Option<usize> {
        None
    }
}

macro_rules! impl_sorted_int {
    ($($ty:ty),*) => {
        $(
            impl SortedElement for $ty {
                #[inline(always)]
                fn sort_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                #[inline(always)]
                fn offset_from(&self, base: &Self) -> Option<usize> {
                    usize::try_from(*self as i128 - *base as i128).ok()
                }
            }
        )*
    };
}

impl_sorted_int!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! impl_sorted_float {
    ($($ty:ty),*) => {
        $(
            impl SortedElement for $ty {
                #[inline(always)]
                fn sort_cmp(&self, other: &Self) -> Ordering {
                    TotalOrder::total_cmp(self, other)
                }
            }
        )*
    };
}

impl_sorted_float!(f32, f64);

impl SortedElement for Timestamp {
    #[inline(always)]
    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[inline(always)]
    fn offset_from(&self, base: &Self) -> Option<usize> {
        self.0.offset_from(&base.0)
    }
}

impl SortedElement for Vec<u8> {
    #[inline(always)]
    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl SortedElement for &[u8] {
    #[inline(always)]
    fn sort_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(*self, *other)
    }
}
