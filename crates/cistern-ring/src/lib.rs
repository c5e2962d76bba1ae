// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Power-of-two byte ring buffer with wrap-free contiguous access.
//!
//! [`RingBuffer`] is a fixed-capacity FIFO of bytes. Its backing region is
//! twice the capacity and mirrored, so every readable range is a single
//! slice and every offer is a single copy, regardless of where the wrap
//! boundary falls.
//!
//! # Mirror Strategies
//!
//! - **Mapped** (Unix): one shared memory object mapped twice, back to back.
//!   Requires the capacity to be a multiple of the page size.
//! - **Portable**: a heap region kept mirrored in software. Works everywhere
//!   and for any capacity.
//! - **Auto** (default): mapped when possible, portable otherwise. A failed
//!   mapping is logged with `tracing` and falls back to portable.
//!
//! # Example
//!
//! ```rust
//! use cistern_ring::{MirrorStrategy, RingBuffer, RingError};
//!
//! fn example() -> Result<(), RingError> {
//!     let mut ring = RingBuffer::with_strategy(4, MirrorStrategy::Portable)?;
//!
//!     ring.try_offer(b"0123456789")?;
//!     ring.try_poll(6)?;
//!     ring.try_offer(b"abcdef")?;
//!
//!     // Wraps past the physical end, still one slice.
//!     assert_eq!(ring.peek(), Some(&b"6789abcdef"[..]));
//!
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Producer / Consumer
//!
//! ```rust
//! use cistern_ring::RingBuffer;
//!
//! let ring = RingBuffer::new(12).expect("Failed to new(..)");
//! let (mut producer, mut consumer) = ring.split();
//!
//! let writer = std::thread::spawn(move || {
//!     while producer.offer(b"ping") == 0 {}
//! });
//! writer.join().expect("Failed to join()");
//!
//! let polled = consumer.try_poll(4).expect("Failed to try_poll(..)");
//! assert_eq!(&*polled, b"ping");
//! ```
//!
//! ## License
//!
//! GPL-3.0-only

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod region;
mod ring;
mod spsc;

pub use error::{MirrorError, RingError};
pub use region::MirrorStrategy;
pub use ring::{MAX_ORDER, MIN_ORDER, RingBuffer};
pub use spsc::{Consumer, Polled, Producer};

#[cfg(any(test, feature = "test-utils"))]
pub use ring::MirrorBehaviour;
