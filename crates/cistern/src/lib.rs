// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Byte storage primitives.
//!
//! - [`buffer::GrowableBuffer`]: a growable, always zero-terminated byte
//!   buffer with append, prepend, slice, trim and search. Growth happens in
//!   1024-byte steps and released storage is wiped.
//! - [`ring::RingBuffer`]: a fixed power-of-two ring whose readable bytes are
//!   always one contiguous slice thanks to a mirrored backing region. Can be
//!   split into a producer and a consumer for use across two threads.
//!
//! # Quick Start
//!
//! ```rust
//! use cistern::buffer::GrowableBuffer;
//! use cistern::ring::RingBuffer;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut line = GrowableBuffer::from("  status: ");
//!     line.append_fmt(format_args!("{} ok  ", 3))?;
//!     line.trim();
//!     assert_eq!(line.as_bytes(), b"status: 3 ok");
//!
//!     let mut ring = RingBuffer::new(8)?;
//!     ring.try_offer(line.as_bytes())?;
//!     assert_eq!(ring.try_poll(6)?, b"status");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## License
//!
//! GPL-3.0-only

#![warn(missing_docs)]

/// Growable zero-terminated byte buffer.
pub mod buffer {
    pub use cistern_buffer::*;
}

/// Mirrored power-of-two ring buffer.
pub mod ring {
    pub use cistern_ring::*;
}
