// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Comparison operators and the operand-carrying predicates the filter kernels evaluate.

use crate::errors::KernelError;

/// Comparison operators for column predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// Equality comparison (`value == operand`)
    Equals,
    /// Inequality comparison (`value != operand`)
    NotEquals,
    /// Less-than comparison (`value < operand`)
    LessThan,
    /// Less-than-or-equal comparison (`value <= operand`)
    LessThanOrEqualTo,
    /// Greater-than comparison (`value > operand`)
    GreaterThan,
    /// Greater-than-or-equal comparison (`value >= operand`)
    GreaterThanOrEqualTo,
    /// Closed range membership test (`value BETWEEN lo AND hi`)
    ///
    /// Inclusive on both ends. The order of the two bounds does not matter.
    Between,
}

/// Logical operators for combining two bitsets position by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    /// `lhs AND rhs`
    And,
    /// `lhs OR rhs`
    Or,
    /// `lhs XOR rhs`
    Xor,
    /// `lhs AND NOT rhs`
    AndNot,
}

/// A comparison operator bound to its operand(s).
///
/// All comparisons use the element type's native `PartialOrd`, so for floats they
/// follow IEEE-754: `NaN` is unordered and unequal to everything, itself included.
/// `NotEqual` is the plain negation of `Equal` and is therefore true against `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<T> {
    Equal(T),
    NotEqual(T),
    Less(T),
    LessEqual(T),
    Greater(T),
    GreaterEqual(T),
    /// Closed range between two inclusive bounds, given in either order.
    /// [`Predicate::between`] stores them ascending.
    Between(T, T),
}

impl<T: PartialOrd> Predicate<T> {
    /// Range predicate over `min(a, b) ..= max(a, b)`.
    ///
    /// If either bound is `NaN` the range matches nothing, whichever way round
    /// the bounds are passed.
    #[inline]
    pub fn between(a: T, b: T) -> Self {
        if b < a {
            Predicate::Between(b, a)
        } else {
            Predicate::Between(a, b)
        }
    }

    /// Build from an operator tag and its operand(s).
    ///
    /// `Between` requires `second`; every other operator ignores it.
    pub fn from_operator(
        op: ComparisonOperator,
        first: T,
        second: Option<T>,
    ) -> Result<Self, KernelError> {
        Ok(match op {
            ComparisonOperator::Equals => Predicate::Equal(first),
            ComparisonOperator::NotEquals => Predicate::NotEqual(first),
            ComparisonOperator::LessThan => Predicate::Less(first),
            ComparisonOperator::LessThanOrEqualTo => Predicate::LessEqual(first),
            ComparisonOperator::GreaterThan => Predicate::Greater(first),
            ComparisonOperator::GreaterThanOrEqualTo => Predicate::GreaterEqual(first),
            ComparisonOperator::Between => match second {
                Some(second) => Predicate::between(first, second),
                None => {
                    return Err(KernelError::InvalidArguments(
                        "between: an upper bound operand is required".to_owned(),
                    ));
                }
            },
        })
    }

    /// Operator tag of this predicate.
    #[inline]
    pub fn operator(&self) -> ComparisonOperator {
        match self {
            Predicate::Equal(_) => ComparisonOperator::Equals,
            Predicate::NotEqual(_) => ComparisonOperator::NotEquals,
            Predicate::Less(_) => ComparisonOperator::LessThan,
            Predicate::LessEqual(_) => ComparisonOperator::LessThanOrEqualTo,
            Predicate::Greater(_) => ComparisonOperator::GreaterThan,
            Predicate::GreaterEqual(_) => ComparisonOperator::GreaterThanOrEqualTo,
            Predicate::Between(_, _) => ComparisonOperator::Between,
        }
    }

    /// Convert the operand(s) to another element type, keeping the operator.
    ///
    /// Used to hand a predicate over a wrapper type to the kernel of its
    /// underlying representation.
    #[inline]
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Predicate<U> {
        match self {
            Predicate::Equal(x) => Predicate::Equal(f(x)),
            Predicate::NotEqual(x) => Predicate::NotEqual(f(x)),
            Predicate::Less(x) => Predicate::Less(f(x)),
            Predicate::LessEqual(x) => Predicate::LessEqual(f(x)),
            Predicate::Greater(x) => Predicate::Greater(f(x)),
            Predicate::GreaterEqual(x) => Predicate::GreaterEqual(f(x)),
            Predicate::Between(lo, hi) => Predicate::Between(f(lo), f(hi)),
        }
    }

    /// Scalar evaluation against a single value.
    ///
    /// This is the reference semantics. Every kernel variant must agree with it bit for bit.
    #[inline(always)]
    pub fn matches(&self, v: &T) -> bool {
        match self {
            Predicate::Equal(x) => v == x,
            Predicate::NotEqual(x) => v != x,
            Predicate::Less(x) => v < x,
            Predicate::LessEqual(x) => v <= x,
            Predicate::Greater(x) => v > x,
            Predicate::GreaterEqual(x) => v >= x,
            // Two direct comparisons; no `v - lo < hi - lo + 1` style arithmetic
            // that would wrap at the type's maximum.
            Predicate::Between(a, b) => {
                let (lo, hi) = ordered_bounds(a, b);
                lo <= v && v <= hi
            }
        }
    }
}

/// The two bounds of a range ascending, whichever way round they were given.
#[inline(always)]
pub(crate) fn ordered_bounds<'a, T: PartialOrd>(a: &'a T, b: &'a T) -> (&'a T, &'a T) {
    if b < a { (b, a) } else { (a, b) }
}
