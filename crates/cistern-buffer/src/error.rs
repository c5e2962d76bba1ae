// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for cistern-buffer.
use thiserror::Error;

/// Errors that can occur when working with a [`GrowableBuffer`](crate::GrowableBuffer).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum BufferError {
    /// Storage for `requested` bytes of capacity could not be obtained.
    ///
    /// The buffer is left exactly as it was before the call.
    #[error("failed to allocate {requested} bytes of capacity")]
    AllocationFailure {
        /// Capacity that was being allocated.
        requested: usize,
    },

    /// A slice range resolved to an end before its start.
    #[error("invalid range: from {from} to {to}")]
    InvalidRange {
        /// Requested start offset.
        from: usize,
        /// Requested end offset, negative values counting back from the end.
        to: isize,
    },

    /// A formatting implementation returned an error, or produced a
    /// different length on the write pass than on the measuring pass.
    #[error("formatting failed")]
    Format,
}
