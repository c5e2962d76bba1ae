// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Single-producer/single-consumer halves of a split ring.
//!
//! The producer owns `tail`, the consumer owns `head`. Each side loads the
//! other side's index with `Acquire` and publishes its own with `Release`, so
//! bytes written before a `tail` store are visible to the consumer that
//! observes it, and bytes released by a `head` store are no longer read when
//! the producer reuses them.

use core::fmt;
use core::ops::Deref;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::RingError;
use crate::region::{MirrorRegion, MirrorStrategy};
use crate::ring::{advance, used_between};

#[derive(Debug)]
pub(crate) struct Shared {
    region: Box<dyn MirrorRegion>,
    head: AtomicUsize,
    tail: AtomicUsize,
}

impl Shared {
    pub(crate) fn split(
        region: Box<dyn MirrorRegion>,
        head: usize,
        tail: usize,
    ) -> (Producer, Consumer) {
        let shared = Arc::new(Self {
            region,
            head: AtomicUsize::new(head),
            tail: AtomicUsize::new(tail),
        });

        let producer = Producer {
            shared: Arc::clone(&shared),
            tail,
        };
        let consumer = Consumer { shared, head };

        (producer, consumer)
    }

    fn capacity(&self) -> usize {
        self.region.capacity()
    }
}

/// Writing half of a split [`RingBuffer`](crate::RingBuffer).
pub struct Producer {
    shared: Arc<Shared>,
    tail: usize,
}

impl Producer {
    /// Returns the ring capacity.
    pub fn capacity(&self) -> usize {
        self.shared.capacity()
    }

    /// Returns the backend in use.
    pub fn strategy(&self) -> MirrorStrategy {
        self.shared.region.strategy()
    }

    /// Bytes the consumer has not yet released, as last observed.
    pub fn unused_space(&self) -> usize {
        let head = self.shared.head.load(Ordering::Acquire);
        self.capacity() - used_between(head, self.tail, self.capacity())
    }

    /// Writes `src` and publishes it to the consumer.
    ///
    /// Same all-or-nothing rule as [`RingBuffer::offer`](crate::RingBuffer::offer):
    /// returns 0 when `unused_space() <= src.len()`.
    pub fn offer(&mut self, src: &[u8]) -> usize {
        let unused = self.unused_space();

        if unused <= src.len() {
            return 0;
        }

        // The target range is free: the consumer never reads past `tail`.
        unsafe { self.shared.region.write(self.tail, src) };

        self.tail = advance(self.tail, src.len(), self.capacity());
        self.shared.tail.store(self.tail, Ordering::Release);

        src.len()
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("capacity", &self.capacity())
            .field("tail", &self.tail)
            .finish_non_exhaustive()
    }
}

/// Reading half of a split [`RingBuffer`](crate::RingBuffer).
pub struct Consumer {
    shared: Arc<Shared>,
    head: usize,
}

impl Consumer {
    /// Returns the ring capacity.
    pub fn capacity(&self) -> usize {
        self.shared.capacity()
    }

    /// Bytes published by the producer and not yet consumed.
    pub fn used_space(&self) -> usize {
        let tail = self.shared.tail.load(Ordering::Acquire);
        used_between(self.head, tail, self.capacity())
    }

    /// Returns `true` if nothing is readable.
    pub fn is_empty(&self) -> bool {
        self.used_space() == 0
    }

    /// Borrows every published byte without consuming it.
    pub fn peek(&self) -> Option<&[u8]> {
        let used = self.used_space();

        if used == 0 {
            return None;
        }

        Some(unsafe { self.shared.region.view(self.head, used) })
    }

    /// Borrows exactly `n` bytes; they are released to the producer when the
    /// returned [`Polled`] is dropped.
    pub fn try_poll(&mut self, n: usize) -> Result<Polled<'_>, RingError> {
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

        let bytes = unsafe { self.shared.region.view(self.head, n) };
        let next = advance(self.head, n, self.capacity());

        Ok(Polled {
            bytes,
            head: &mut self.head,
            next,
            shared: &self.shared,
        })
    }
}

impl fmt::Debug for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}

/// Bytes taken by [`Consumer::try_poll`].
///
/// The space is handed back to the producer on drop, so the bytes stay valid
/// for as long as this guard lives.
pub struct Polled<'a> {
    bytes: &'a [u8],
    head: &'a mut usize,
    next: usize,
    shared: &'a Shared,
}

impl Deref for Polled<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

impl fmt::Debug for Polled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polled")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl Drop for Polled<'_> {
    fn drop(&mut self) {
        *self.head = self.next;
        self.shared.head.store(self.next, Ordering::Release);
    }
}
