// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! RingBuffer - power-of-two byte ring over a mirrored region.

use core::fmt;

use crate::error::RingError;
use crate::region::{self, MapFn, MirrorRegion, MirrorStrategy};
use crate::spsc::{Consumer, Producer, Shared};

/// Smallest accepted order (capacity 2, one usable byte).
pub const MIN_ORDER: u32 = 1;

/// Largest accepted order (capacity 1 GiB).
pub const MAX_ORDER: u32 = 30;

/// Controls how region creation behaves (for testing).
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum MirrorBehaviour {
    /// Normal behaviour.
    #[default]
    None,
    /// Every attempt to establish a mirrored mapping fails with
    /// [`MirrorError::Map`](crate::MirrorError::Map).
    FailAtMap,
}

#[cfg(any(test, feature = "test-utils"))]
impl MirrorBehaviour {
    fn map_fn(self) -> MapFn {
        match self {
            Self::None => region::map_mirrored,
            Self::FailAtMap => |_| Err(crate::error::MirrorError::Map),
        }
    }
}

/// Bytes readable between `head` and `tail` in a ring of `capacity`.
#[inline]
pub(crate) fn used_between(head: usize, tail: usize, capacity: usize) -> usize {
    if tail >= head {
        tail - head
    } else {
        capacity - (head - tail)
    }
}

/// Advances `index` by `n` modulo `capacity` without overflowing.
#[inline]
pub(crate) fn advance(index: usize, n: usize, capacity: usize) -> usize {
    (index + n % capacity) % capacity
}

/// A fixed-capacity circular byte queue.
///
/// Capacity is `2^order`. One slot is always left free so `head == tail`
/// means empty; at most `capacity() - 1` bytes are readable at once.
///
/// Readable bytes are always one contiguous slice, even when they wrap past
/// the physical end, because the region behind the ring is mirrored (see
/// [`MirrorStrategy`]).
///
/// # Example
///
/// ```rust
/// use cistern_ring::RingBuffer;
///
/// let mut ring = RingBuffer::new(4).expect("Failed to new(..)");
///
/// assert_eq!(ring.offer(b"hello"), 5);
/// assert_eq!(ring.peek(), Some(&b"hello"[..]));
/// assert_eq!(ring.poll(2), Some(&b"he"[..]));
/// assert_eq!(ring.used_space(), 3);
/// ```
pub struct RingBuffer {
    region: Box<dyn MirrorRegion>,
    order: u32,
    head: usize,
    tail: usize,
}

impl RingBuffer {
    /// Creates a ring of capacity `2^order` with [`MirrorStrategy::Auto`].
    pub fn new(order: u32) -> Result<Self, RingError> {
        Self::with_strategy(order, MirrorStrategy::Auto)
    }

    /// Creates a ring of capacity `2^order` backed as `strategy` requests.
    pub fn with_strategy(order: u32, strategy: MirrorStrategy) -> Result<Self, RingError> {
        Self::build(order, strategy, region::map_mirrored)
    }

    /// Creates a ring whose mirrored mappings behave as `behaviour` says.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_behaviour(
        order: u32,
        strategy: MirrorStrategy,
        behaviour: MirrorBehaviour,
    ) -> Result<Self, RingError> {
        Self::build(order, strategy, behaviour.map_fn())
    }

    fn build(order: u32, strategy: MirrorStrategy, map: MapFn) -> Result<Self, RingError> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(RingError::InvalidOrder { order });
        }

        let capacity = 1usize
            .checked_shl(order)
            .ok_or(RingError::InvalidOrder { order })?;
        let region = region::create(capacity, strategy, map)?;

        Ok(Self {
            region,
            order,
            head: 0,
            tail: 0,
        })
    }

    /// Returns `2^order`.
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Returns the order the ring was created with.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Returns the backend in use ([`MirrorStrategy::Mapped`] or
    /// [`MirrorStrategy::Portable`]).
    pub fn strategy(&self) -> MirrorStrategy {
        self.region.strategy()
    }

    /// Bytes currently readable.
    pub fn used_space(&self) -> usize {
        used_between(self.head, self.tail, self.capacity())
    }

    /// `capacity() - used_space()`. Never zero: one slot stays reserved.
    pub fn unused_space(&self) -> usize {
        self.capacity() - self.used_space()
    }

    /// Returns `true` if nothing is readable.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Writes `src` at the tail and returns the number of bytes written.
    ///
    /// The offer is all-or-nothing: when `unused_space() <= src.len()` nothing
    /// is written and 0 is returned, so the largest accepted offer is
    /// `unused_space() - 1` bytes.
    pub fn offer(&mut self, src: &[u8]) -> usize {
        let unused = self.unused_space();

        if unused <= src.len() {
            return 0;
        }

        let written = src.len().min(unused);

        unsafe { self.region.write(self.tail, &src[..written]) };

        self.tail += written;
        if self.tail >= self.capacity() {
            self.tail %= self.capacity();
        }

        written
    }

    /// Like [`offer`](Self::offer) but reports a rejected offer as
    /// [`RingError::CapacityExhausted`].
    pub fn try_offer(&mut self, src: &[u8]) -> Result<usize, RingError> {
        let unused = self.unused_space();

        if unused <= src.len() {
            return Err(RingError::CapacityExhausted {
                requested: src.len(),
                available: unused - 1,
            });
        }

        Ok(self.offer(src))
    }

    /// Borrows every readable byte without consuming it.
    ///
    /// Returns `None` when empty.
    pub fn peek(&self) -> Option<&[u8]> {
        if self.is_empty() {
            return None;
        }

        Some(unsafe { self.region.view(self.head, self.used_space()) })
    }

    /// Consumes `n` bytes and borrows them.
    ///
    /// Returns `None` when empty. The head advances by `n` modulo capacity
    /// even when fewer than `n` bytes are readable; callers must not poll
    /// more than [`used_space`](Self::used_space). Polling past it desyncs
    /// the ring (later reads yield stale bytes) but never touches memory
    /// outside the region: the returned view is cut to the readable bytes.
    /// Use [`try_poll`](Self::try_poll) for a checked variant.
    pub fn poll(&mut self, n: usize) -> Option<&[u8]> {
        if self.is_empty() {
            return None;
        }

        let start = self.head;
        let len = n.min(self.used_space());

        self.head = advance(self.head, n, self.capacity());

        Some(unsafe { self.region.view(start, len) })
    }

    /// Consumes exactly `n` bytes and borrows them.
    ///
    /// Fails with [`RingError::Empty`] when nothing is readable and with
    /// [`RingError::Underflow`] when fewer than `n` bytes are; the head is
    /// left untouched in both cases.
    pub fn try_poll(&mut self, n: usize) -> Result<&[u8], RingError> {
        let used = self.used_space();

        if used == 0 {
            return Err(RingError::Empty);
        }

        if n > used {
            return Err(RingError::Underflow {
                requested: n,
                available: used,
            });
        }

        let start = self.head;
        self.head = advance(self.head, n, self.capacity());

        Ok(unsafe { self.region.view(start, n) })
    }

    /// Splits the ring into a [`Producer`] and a [`Consumer`] that can live
    /// on different threads. Buffered bytes carry over.
    pub fn split(self) -> (Producer, Consumer) {
        let Self {
            region, head, tail, ..
        } = self;

        Shared::split(region, head, tail)
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("strategy", &self.strategy())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish_non_exhaustive()
    }
}
