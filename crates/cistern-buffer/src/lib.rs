// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Zero-terminated growable byte buffer.
//!
//! [`GrowableBuffer`] accumulates bytes with amortized growth and offers the
//! usual string-buffer toolbox: append, formatted append, prepend, slice,
//! trim, compact, fill and search.
//!
//! # Storage Model
//!
//! - One owned allocation of `capacity + 1` bytes, the last one a zero
//!   sentinel that is never overwritten
//! - The logical length is a scan to the first zero byte, so embedded zeros
//!   truncate what [`GrowableBuffer::len`] reports
//! - The logical start is an index into the allocation; `trim_left` moves it
//!   forward instead of moving memory
//! - Reallocation rounds capacity up to a multiple of [`GROWTH_QUANTUM`]
//!
//! # Wipe Discipline
//!
//! Allocations released by growth and [`GrowableBuffer::compact`] are wiped
//! before they are freed, and the buffer wipes its storage on drop.
//! [`GrowableBuffer::fill`] and [`GrowableBuffer::clear`] cover the whole
//! capacity, not only the logical content.
//!
//! # Example
//!
//! ```rust
//! use cistern_buffer::{BufferError, GrowableBuffer};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = GrowableBuffer::new();
//!
//!     buffer.append(b"  world")?;
//!     buffer.prepend(b"hello")?;
//!     buffer.append_fmt(format_args!(" #{}  ", 42))?;
//!     buffer.trim();
//!
//!     assert_eq!(buffer.as_bytes(), b"hello  world #42");
//!     assert_eq!(buffer.index_of(b"world"), Some(7));
//!
//!     let tail = buffer.slice(7, -4)?;
//!     assert_eq!(tail.as_bytes(), b"world");
//!
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test-utils` feature to inject allocation failures:
//!
//! ```rust
//! // test-utils feature required in dev-dependencies
//! #[cfg(test)]
//! mod tests {
//!     use cistern_buffer::{BufferBehaviour, GrowableBuffer};
//!
//!     #[test]
//!     fn test_handles_growth_failure() {
//!         let mut buffer = GrowableBuffer::with_capacity(4);
//!         buffer.change_behaviour(BufferBehaviour::FailAtAllocate);
//!
//!         assert!(buffer.append(b"too long").is_err());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod growable;
mod measure;

pub use error::BufferError;
pub use growable::{DEFAULT_CAPACITY, GROWTH_QUANTUM, GrowableBuffer};

#[cfg(any(test, feature = "test-utils"))]
pub use growable::BufferBehaviour;
