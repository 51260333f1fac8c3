// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Operation Error Handling*
//!
//! Error types for the filter entry points with structured error reporting.
//!
//! ## Error Categories
//! - **Dimension Errors**: mask and input length mismatches
//! - **Argument Errors**: predicates built without the operands they need
//!
//! Raw byte-buffer kernels do not return these. A buffer-size mismatch at that level
//! is a caller bug and panics instead.

use core::fmt;
use std::error::Error;

/// Error type for all fallible kernel entry points.
///
/// Each variant includes a contextual message string providing specific details
/// about the error condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Length mismatch between an input and its mask, between two bitsets, or
    /// between a packed buffer and the bit length it should hold.
    LengthMismatch(String),

    /// Invalid arguments provided to a kernel function.
    InvalidArguments(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between left-hand side (LHS) and right-hand side (RHS) inputs.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the left-hand side input
/// * `rhs` - Length of the right-hand side input
pub fn log_length_mismatch(fname: &str, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}
