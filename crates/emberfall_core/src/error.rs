//! # Collection Error Types
//!
//! All errors that can occur in the collection core.

use thiserror::Error;

/// Errors that can occur on keyed-table operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The key's ordinal is not one of the key type's defined values.
    #[error("invalid key: ordinal {ordinal} is not a defined value")]
    InvalidKey {
        /// The ordinal that failed validation.
        ordinal: i32,
    },
}

/// Errors that can occur on the cycling slot allocator.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotsError {
    /// Every slot in the index range is occupied.
    ///
    /// Recoverable: the allocator stays usable and the next allocation
    /// succeeds as soon as any slot is freed.
    #[error("slot range exhausted: all {capacity} slots are in use")]
    Exhausted {
        /// Total number of slots in the range.
        capacity: usize,
    },
}

/// Result type for keyed-table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for slot-allocator operations.
pub type SlotsResult<T> = Result<T, SlotsError>;
