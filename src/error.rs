//! Error types for the Vorax engine.
//!
//! This module provides a unified error type for all operations in the crate,
//! using the `thiserror` crate for ergonomic error handling. Every
//! precondition violation is reported to the caller as a value; nothing in the
//! core logs a warning and carries on.

use crate::plan::OperationKind;
use thiserror::Error;

/// The main error type for Vorax operations.
///
/// The first group of variants is the taxonomy of the bit-set core. The
/// remaining variants belong to the collaborator layers (configuration files,
/// operation log export).
#[derive(Error, Debug)]
pub enum OperationError {
    /// Width is 0 or exceeds the maximum supported width
    #[error("Invalid width: {width} (supported range {min}..={max})")]
    InvalidWidth {
        /// Requested width
        width: usize,
        /// Minimum width accepted at this call site
        min: usize,
        /// Maximum width accepted at this call site
        max: usize,
    },

    /// Binary string contains a character other than '0' or '1'
    #[error("Invalid character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character
        character: char,
        /// Character index in the input string
        index: usize,
    },

    /// Bit index is not below the width
    #[error("Index out of range: index {index}, width {width}")]
    IndexOutOfRange {
        /// The index that was accessed
        index: usize,
        /// The valid width
        width: usize,
    },

    /// Split requested with fewer than one part
    #[error("Invalid partition count: {0} (must be at least 1)")]
    InvalidPartitionCount(usize),

    /// Split requested with more parts than can be allocated
    #[error("Too many parts: {0} output sets cannot be allocated")]
    TooManyParts(usize),

    /// Cycle requested with a modulo below one
    #[error("Invalid modulo: {0} (must be at least 1)")]
    InvalidModulo(usize),

    /// Combined width of a merge or transfer exceeds the maximum
    #[error("Width overflow: combined width {width} exceeds maximum {max}")]
    WidthOverflow {
        /// Width the operation would have produced
        width: usize,
        /// Configured maximum width
        max: usize,
    },

    /// Literal value has bits set at or above the requested width
    #[error("Value {value:#b} does not fit in {width} bits")]
    ValueExceedsWidth {
        /// The literal value
        value: u64,
        /// The requested width
        width: usize,
    },

    /// A plan whose operation promises conservation did not conserve
    #[error("Conservation mismatch in {kind}: {before} active bits before, {after} after")]
    ConservationMismatch {
        /// Operation that produced the plan
        kind: OperationKind,
        /// Total population of the inputs
        before: usize,
        /// Total population of the outputs
        after: usize,
    },

    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON serialization error occurred
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for Vorax operations.
///
/// This is a type alias for `Result<T, OperationError>` and is used
/// throughout the crate for consistency.
pub type Result<T> = std::result::Result<T, OperationError>;
