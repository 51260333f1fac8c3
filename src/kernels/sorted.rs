// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Sorted Sequence Kernels** - *Search, Overlap and Set Operations on Sorted Slices*
//!
//! Algorithms over sequences already sorted ascending, used for index lookups and block
//! statistics. Sortedness is a precondition and is not checked; unsorted input gives
//! unspecified (but memory-safe) answers.
//!
//! ## Ordering
//! - Lookups, range operations, deduplication and the set merges (`intersect_sorted`,
//!   `union_sorted`, `difference_sorted`) compare with the type's `PartialOrd` and
//!   `PartialEq`, so a `NaN` key is never found and `-0.0` meets `+0.0`.
//! - Sorting uses the total order from [`SortedElement::sort_cmp`], so every float,
//!   `NaN` included, has a fixed place. The merges fall back to it only to step past
//!   unordered pairs.
//!
//! ## Dense fast path
//! When an integer sequence spans exactly `len - 1` from first to last, the position of
//! a key is computed as `v - first` in O(1). The candidate is verified before it is
//! trusted, since a sequence like `[1, 1, 3]` has the right span without being dense;
//! on a failed check the lookup falls back to binary search.

use core::cmp::Ordering;

use num_traits::Zero;

use crate::traits::sorted::SortedElement;

/// Returns `true` if `v` is present in the sorted `seq`.
#[inline]
pub fn contains<T: SortedElement>(seq: &[T], v: &T) -> bool {
    index(seq, v, 0).is_some()
}

/// Absolute position of the first element equal to `v` at or after `resume_from`.
///
/// Repeated lookups over one sequence can pass the previous hit as `resume_from` to
/// avoid re-searching the prefix. Returns `None` when `v` is absent from
/// `seq[resume_from..]`, including when `resume_from >= seq.len()`.
pub fn index<T: SortedElement>(seq: &[T], v: &T, resume_from: usize) -> Option<usize> {
    let n = seq.len();
    if resume_from >= n {
        return None;
    }
    let (first, last) = (&seq[0], &seq[n - 1]);
    if v < first || v > last {
        return None;
    }

    if let (Some(span), Some(off)) = (last.offset_from(first), v.offset_from(first)) {
        if span == n - 1
            && off >= resume_from
            && seq[off] == *v
            && (off == 0 || seq[off - 1] < *v)
        {
            return Some(off);
        }
    }

    let tail = &seq[resume_from..];
    let i = tail.partition_point(|e| e < v);
    (i < tail.len() && tail[i] == *v).then_some(resume_from + i)
}

/// Smallest and largest element of `seq` in one pass, or `None` when empty.
///
/// Does not require `seq` to be sorted. Elements unordered against themselves (`NaN`)
/// are skipped, both when seeding the extremes and during the scan; only when every
/// element is unordered is the first one returned as both extremes.
pub fn min_max<T: SortedElement>(seq: &[T]) -> Option<(T, T)> {
    let mut ordered = seq.iter().skip_while(|v| v.partial_cmp(v).is_none());
    let Some(first) = ordered.next() else {
        return seq.first().map(|v| (v.clone(), v.clone()));
    };
    let (mut lo, mut hi) = (first, first);
    for v in ordered {
        if v < lo {
            lo = v;
        } else if v > hi {
            hi = v;
        }
    }
    Some((lo.clone(), hi.clone()))
}

/// Returns `true` if any element of the sorted `seq` lies in the closed range `[from, to]`.
///
/// `from <= to` is a precondition, asserted in debug builds.
pub fn contains_range<T: SortedElement>(seq: &[T], from: &T, to: &T) -> bool {
    debug_assert!(!(to < from), "contains_range: `from` must not exceed `to`");
    let (Some(first), Some(last)) = (seq.first(), seq.last()) else {
        return false;
    };

    // Range ends before the sequence starts, or touches its first element.
    if to < first {
        return false;
    }
    if to == first {
        return true;
    }

    // Range starts after the sequence ends, or touches its last element.
    if from > last {
        return false;
    }
    if from == last {
        return true;
    }

    // Range overlaps the sequence's span: look for an element inside it.
    let lo = seq.partition_point(|e| e < from);
    if lo < seq.len() && seq[lo] == *from {
        return true;
    }
    let hi = lo + seq[lo..].partition_point(|e| e < to);
    if hi < seq.len() && seq[hi] == *to {
        return true;
    }
    // Some element falls strictly between the bounds.
    lo < hi
}

/// Returns `true` if `seq` is ascending under [`SortedElement::sort_cmp`].
#[inline]
pub fn is_sorted<T: SortedElement>(seq: &[T]) -> bool {
    seq.is_sorted_by(|a, b| a.sort_cmp(b) != Ordering::Greater)
}

/// Sort `seq` ascending in place, skipping the work when it is already sorted.
///
/// With the `parallel_sort` feature, inputs of at least
/// [`PARALLEL_SORT_THRESHOLD`](crate::config::PARALLEL_SORT_THRESHOLD) elements are
/// sorted on the rayon pool.
pub fn sort<T: SortedElement>(seq: &mut [T]) {
    if is_sorted(seq) {
        return;
    }
    #[cfg(feature = "parallel_sort")]
    {
        if seq.len() >= crate::config::PARALLEL_SORT_THRESHOLD {
            parallel::sort_unstable(seq);
            return;
        }
    }
    seq.sort_unstable_by(T::sort_cmp);
}

/// Sorted copy of `seq` with duplicates removed. `seq` itself is left untouched.
///
/// Duplicates are judged by `==`: `-0.0` and `+0.0` collapse to the first in sort
/// order, while `NaN`s, being unequal to everything, are all kept.
pub fn unique<T: SortedElement>(seq: &[T]) -> Vec<T> {
    let mut out = seq.to_vec();
    sort(&mut out);
    out.dedup_by(|a, b| a == b);
    out
}

/// Insert `v` into the sorted `seq` unless it is already present.
///
/// Returns `true` if `v` was inserted.
pub fn add_unique<T: SortedElement>(seq: &mut Vec<T>, v: T) -> bool {
    if index(seq, &v, 0).is_some() {
        return false;
    }
    match seq.binary_search_by(|e| e.sort_cmp(&v)) {
        Ok(_) => false,
        Err(at) => {
            seq.insert(at, v);
            true
        }
    }
}

/// Remove the first element equal to `v` from the sorted `seq`, preserving order.
///
/// Returns `true` if an element was removed.
pub fn remove<T: SortedElement>(seq: &mut Vec<T>, v: &T) -> bool {
    match index(seq, v, 0) {
        Some(i) => {
            seq.remove(i);
            true
        }
        None => false,
    }
}

/// Insert a run of values at position `at`, shifting the rest of `seq` right.
///
/// Uses spare capacity in `seq` when there is enough. Keeping the result sorted is the
/// caller's responsibility.
///
/// # Panics
/// If `at > seq.len()`.
pub fn insert<T, I>(seq: &mut Vec<T>, at: usize, values: I)
where
    I: IntoIterator<Item = T>,
{
    assert!(
        at <= seq.len(),
        "insert position (is {at}) should be <= len (is {})",
        seq.len()
    );
    seq.splice(at..at, values);
}

/// Sorted intersection of two sorted sequences, each common value appearing once.
pub fn intersect_sorted<T: SortedElement>(x: &[T], y: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(x.len().min(y.len()));
    intersect_sorted_into(x, y, &mut out);
    out
}

/// [`intersect_sorted`] writing into a caller-owned buffer, which is cleared first.
///
/// Values meet when they compare equal, so `-0.0` in one input matches `+0.0` in the
/// other and the value from `x` is kept. `NaN` never meets anything.
pub fn intersect_sorted_into<T: SortedElement>(x: &[T], y: &[T], out: &mut Vec<T>) {
    out.clear();
    let (mut i, mut j) = (0usize, 0usize);
    while i < x.len() && j < y.len() {
        match x[i].partial_cmp(&y[j]) {
            Some(Ordering::Less) => i += 1,
            Some(Ordering::Greater) => j += 1,
            Some(Ordering::Equal) => {
                if out.last().is_none_or(|last| *last != x[i]) {
                    out.push(x[i].clone());
                }
                i += 1;
                j += 1;
            }
            None => match x[i].sort_cmp(&y[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            },
        }
    }
}

/// Merge order for two sorted inputs: `PartialOrd`, with the total order deciding
/// only between unordered pairs.
#[inline(always)]
fn merge_cmp<T: SortedElement>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| a.sort_cmp(b))
}

#[inline(always)]
fn push_distinct<T: SortedElement>(out: &mut Vec<T>, v: &T) {
    if out.last().is_none_or(|last| last != v) {
        out.push(v.clone());
    }
}

/// Sorted union of two sorted sequences, each distinct value appearing once.
///
/// Where both inputs hold equal values the one from `x` is kept.
pub fn union_sorted<T: SortedElement>(x: &[T], y: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(x.len() + y.len());
    let (mut i, mut j) = (0usize, 0usize);
    while i < x.len() && j < y.len() {
        match merge_cmp(&x[i], &y[j]) {
            Ordering::Less => {
                push_distinct(&mut out, &x[i]);
                i += 1;
            }
            Ordering::Greater => {
                push_distinct(&mut out, &y[j]);
                j += 1;
            }
            Ordering::Equal => {
                push_distinct(&mut out, &x[i]);
                i += 1;
                j += 1;
            }
        }
    }
    for v in x[i..].iter().chain(&y[j..]) {
        push_distinct(&mut out, v);
    }
    out
}

/// Elements of the sorted `x` that have no equal in the sorted `y`, in order.
///
/// Repeats in `x` survive unless the value occurs in `y`.
pub fn difference_sorted<T: SortedElement>(x: &[T], y: &[T]) -> Vec<T> {
    let mut j = 0usize;
    x.iter()
        .filter(|v| {
            while j < y.len() && merge_cmp(&y[j], *v) == Ordering::Less {
                j += 1;
            }
            !(j < y.len() && y[j] == **v)
        })
        .cloned()
        .collect()
}

/// Positions `start..end` of the elements of the sorted `seq` inside `[from, to]`.
#[inline]
fn closed_range_bounds<T: SortedElement>(seq: &[T], from: &T, to: &T) -> (usize, usize) {
    debug_assert!(!(to < from), "range: `from` must not exceed `to`");
    let start = seq.partition_point(|e| e < from);
    let end = start + seq[start..].partition_point(|e| e <= to);
    (start, end)
}

/// Drop every element of the sorted `seq` lying in `[from, to]`, keeping order.
///
/// Returns how many were removed.
pub fn remove_range<T: SortedElement>(seq: &mut Vec<T>, from: &T, to: &T) -> usize {
    let (start, end) = closed_range_bounds(seq, from, to);
    seq.drain(start..end);
    end - start
}

/// The run of elements of the sorted `seq` lying in `[from, to]`, borrowed in place.
///
/// Non-empty exactly when [`contains_range`] is `true` for the same bounds.
#[inline]
pub fn intersect_range<'a, T: SortedElement>(seq: &'a [T], from: &T, to: &T) -> &'a [T] {
    let (start, end) = closed_range_bounds(seq, from, to);
    &seq[start..end]
}

/// Returns `true` if the sorted `seq` holds every value from its first to its last
/// element exactly once.
///
/// Only integer types and `Timestamp` can be continuous; floats and byte strings, and
/// empty input, never are.
pub fn is_continuous<T: SortedElement>(seq: &[T]) -> bool {
    let (Some(first), Some(last)) = (seq.first(), seq.last()) else {
        return false;
    };
    last.offset_from(first) == Some(seq.len() - 1) && seq.windows(2).all(|w| w[0] < w[1])
}

/// First and last element of the sorted `seq` together with [`is_continuous`], or
/// `None` when empty.
pub fn range<T: SortedElement>(seq: &[T]) -> Option<(T, T, bool)> {
    let (first, last) = (seq.first()?, seq.last()?);
    Some((first.clone(), last.clone(), is_continuous(seq)))
}

/// Drop every zero from `seq` in place, keeping order. Returns the new length.
pub fn remove_zeros<T: Zero>(seq: &mut Vec<T>) -> usize {
    seq.retain(|v| !v.is_zero());
    seq.len()
}

#[cfg(feature = "parallel_sort")]
mod parallel {
    use rayon::prelude::*;

    use crate::traits::sorted::SortedElement;

    pub(super) fn sort_unstable<T: SortedElement>(seq: &mut [T]) {
        seq.par_sort_unstable_by(T::sort_cmp);
    }
}
