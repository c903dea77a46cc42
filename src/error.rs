// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for ReedMem.
//!
//! One crate-wide error enum with context-carrying variants. All errors are
//! fatal to the in-progress operation; container state is unchanged when an
//! insert or free fails because both locate before they mutate.

use std::fmt;

/// ReedMem result type.
pub type MemResult<T> = Result<T, MemError>;

/// ReedMem error type.
///
/// ## Variants
/// - `DuplicateKey`: insert of a key that is already present
/// - `OutOfOrder`: ordered append with a key at or below the current maximum
/// - `NotFound`: lookup of a key that must exist
/// - `DoubleFree`: freed range overlaps memory that is already free
/// - `BadFree`: freed range is malformed or extends past capacity
/// - `InvalidArgument`: rejected constructor or operation argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemError {
    /// Key already present in the container.
    DuplicateKey {
        /// Debug rendering of the offending key.
        key: String,
    },

    /// Ordered append received a key at or below the current maximum.
    OutOfOrder {
        /// Debug rendering of the offending key.
        key: String,

        /// Debug rendering of the current maximum key.
        maximum: String,
    },

    /// Key not present where presence is required.
    NotFound {
        /// Debug rendering of the missing key.
        key: String,
    },

    /// Freed range overlaps memory that is already free.
    DoubleFree {
        /// Base address of the freed range.
        address: u64,

        /// Length of the freed range in bytes.
        length: u64,
    },

    /// Freed range is malformed or extends past capacity.
    BadFree {
        /// Base address of the freed range.
        address: u64,

        /// Length of the freed range in bytes.
        length: u64,

        /// Human-readable rejection reason.
        reason: String,
    },

    /// Rejected argument with the reason for rejection.
    InvalidArgument {
        /// Name of the offending argument.
        argument: String,

        /// Human-readable rejection reason.
        reason: String,
    },
}

impl fmt::Display for MemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemError::DuplicateKey { key } => {
                write!(f, "duplicate key: {}", key)
            }
            MemError::OutOfOrder { key, maximum } => {
                write!(f, "key {} is not above the current maximum {}", key, maximum)
            }
            MemError::NotFound { key } => {
                write!(f, "key not found: {}", key)
            }
            MemError::DoubleFree { address, length } => {
                write!(f, "double free of [{}, {})", address, address + length)
            }
            MemError::BadFree {
                address,
                length,
                reason,
            } => {
                write!(f, "bad free of [{}, {}): {}", address, address + length, reason)
            }
            MemError::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument '{}': {}", argument, reason)
            }
        }
    }
}

impl std::error::Error for MemError {}
