// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for cistern-ring.
use thiserror::Error;

/// Errors from establishing a mirrored region.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum MirrorError {
    /// The shared memory object backing both halves could not be created.
    #[error("failed to create backing memory object")]
    Backing = 0,

    /// The backing object could not be sized to the ring capacity.
    #[error("ftruncate failed")]
    Truncate = 1,

    /// Address space for both halves could not be reserved.
    #[error("failed to reserve address space")]
    Reserve = 2,

    /// One of the two fixed mappings could not be placed.
    #[error("mmap(MAP_FIXED) failed")]
    Map = 3,

    /// The capacity is not a multiple of the system page size.
    #[error("capacity is not a multiple of the page size")]
    Layout = 4,

    /// Mirrored mappings are not available on this platform.
    #[error("mirrored mappings are not supported on this platform")]
    Unsupported = 5,

    /// The heap region could not be allocated.
    #[error("heap allocation failed")]
    Allocation = 6,
}

/// Errors that can occur when working with a [`RingBuffer`](crate::RingBuffer).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum RingError {
    /// The backing region could not be established.
    #[error("MirrorError: {0}")]
    Mirror(#[from] MirrorError),

    /// The order is outside [`MIN_ORDER`](crate::MIN_ORDER)..=[`MAX_ORDER`](crate::MAX_ORDER).
    #[error("order {order} is out of range")]
    InvalidOrder {
        /// Requested order.
        order: u32,
    },

    /// Nothing is readable.
    #[error("ring is empty")]
    Empty,

    /// An offer would not leave the reserved slot free.
    #[error("offer of {requested} bytes exceeds the {available} bytes that fit")]
    CapacityExhausted {
        /// Bytes offered.
        requested: usize,
        /// Largest offer that would have been accepted.
        available: usize,
    },

    /// A checked poll asked for more bytes than are readable.
    #[error("poll of {requested} bytes exceeds the {available} readable bytes")]
    Underflow {
        /// Bytes requested.
        requested: usize,
        /// Bytes readable.
        available: usize,
    },
}
