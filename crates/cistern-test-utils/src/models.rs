// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Reference models.
//!
//! Deliberately naive: a `VecDeque` for the ring and a `Vec` for the buffer's
//! logical content. They encode the observable contracts only.

use std::collections::VecDeque;

use cistern_util::{find_subslice, is_c_space, zero_terminated_len};

/// Reference model of a ring buffer with one reserved slot.
#[derive(Debug, Clone)]
pub struct RingModel {
    capacity: usize,
    queue: VecDeque<u8>,
}

impl RingModel {
    /// Creates an empty model holding at most `capacity - 1` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
        }
    }

    /// Bytes currently readable.
    pub fn used_space(&self) -> usize {
        self.queue.len()
    }

    /// `capacity - used_space()`.
    pub fn unused_space(&self) -> usize {
        self.capacity - self.queue.len()
    }

    /// All-or-nothing offer: rejected when `unused_space() <= src.len()`.
    pub fn offer(&mut self, src: &[u8]) -> usize {
        if self.unused_space() <= src.len() {
            return 0;
        }

        self.queue.extend(src.iter().copied());
        src.len()
    }

    /// Removes `n` bytes, or returns `None` when fewer are readable.
    pub fn try_poll(&mut self, n: usize) -> Option<Vec<u8>> {
        if self.queue.is_empty() || n > self.queue.len() {
            return None;
        }

        Some(self.queue.drain(..n).collect())
    }

    /// Copies out the readable bytes.
    pub fn peek(&self) -> Vec<u8> {
        self.queue.iter().copied().collect()
    }
}

/// Reference model of a growable buffer's logical content.
///
/// Content never holds a zero byte: anything after one is cut off, the same
/// way the real buffer's length scan stops at it.
#[derive(Debug, Clone, Default)]
pub struct TextModel {
    bytes: Vec<u8>,
}

impl TextModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model from initial content.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut model = Self {
            bytes: bytes.to_vec(),
        };
        model.cut_at_zero();
        model
    }

    fn cut_at_zero(&mut self) {
        let len = zero_terminated_len(&self.bytes);
        self.bytes.truncate(len);
    }

    /// Logical content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends `src`.
    pub fn append(&mut self, src: &[u8]) {
        self.bytes.extend_from_slice(src);
        self.cut_at_zero();
    }

    /// Prepends `src`.
    pub fn prepend(&mut self, src: &[u8]) {
        let mut bytes = src.to_vec();
        bytes.extend_from_slice(&self.bytes);
        self.bytes = bytes;
        self.cut_at_zero();
    }

    /// Resolves `[from, to)` the way `GrowableBuffer::slice` does.
    pub fn slice(&self, from: usize, to: isize) -> Option<Vec<u8>> {
        let len = self.bytes.len();
        let end = if to < 0 {
            len.checked_sub(to.unsigned_abs())?
        } else {
            (to as usize).min(len)
        };

        if end < from {
            return None;
        }

        Some(self.bytes[from..end].to_vec())
    }

    /// Removes leading C-locale whitespace.
    pub fn trim_left(&mut self) {
        let skip = self.bytes.iter().take_while(|&&b| is_c_space(b)).count();
        self.bytes.drain(..skip);
    }

    /// Removes trailing C-locale whitespace.
    pub fn trim_right(&mut self) {
        while self.bytes.last().is_some_and(|&b| is_c_space(b)) {
            self.bytes.pop();
        }
    }

    /// Removes whitespace on both ends.
    pub fn trim(&mut self) {
        self.trim_left();
        self.trim_right();
    }

    /// Content after filling a buffer of `capacity` bytes with `byte`.
    pub fn fill(&mut self, byte: u8, capacity: usize) {
        self.bytes = vec![byte; capacity];
        self.cut_at_zero();
    }

    /// Empties the content.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// First offset of `needle`.
    pub fn index_of(&self, needle: &[u8]) -> Option<usize> {
        find_subslice(&self.bytes, needle)
    }
}
