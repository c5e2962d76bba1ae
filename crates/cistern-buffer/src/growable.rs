// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use cistern_util::{
    fill_bytes_with_pattern, find_subslice, is_c_space, nearest_multiple_of, wipe_bytes,
    zero_terminated_len,
};

use crate::error::BufferError;
use crate::measure::{ByteCounter, SliceCursor};

/// Growth quantum: every reallocation rounds capacity up to a multiple of this.
pub const GROWTH_QUANTUM: usize = 1024;

/// Capacity used by [`GrowableBuffer::new`].
pub const DEFAULT_CAPACITY: usize = 64;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Failure injection for exercising allocation-failure paths.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum BufferBehaviour {
    /// Allocations behave normally.
    #[default]
    None,
    /// Every allocation made through the buffer fails.
    FailAtAllocate,
}

/// A zero-terminated, growable byte buffer.
///
/// The buffer owns exactly one allocation of `capacity + 1` bytes. The last
/// byte is a zero sentinel that no operation overwrites, so the logical length
/// is always the distance from the logical start to the first zero byte.
///
/// Bytes appended after an embedded zero are stored but invisible to
/// [`len`](Self::len) and [`as_bytes`](Self::as_bytes):
///
/// ```rust
/// use cistern_buffer::GrowableBuffer;
///
/// let mut buffer = GrowableBuffer::new();
/// buffer.append(b"ab\0cd").unwrap();
///
/// assert_eq!(buffer.len(), 2);
/// assert_eq!(&buffer.raw()[..5], b"ab\0cd");
/// ```
///
/// Every allocation the buffer releases (on growth, compaction and drop) is
/// wiped first.
pub struct GrowableBuffer {
    storage: Vec<u8>,
    start: usize,
    #[cfg(any(test, feature = "test-utils"))]
    behaviour: BufferBehaviour,
}

impl GrowableBuffer {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] bytes.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with `capacity` bytes of zeroed storage.
    ///
    /// Aborts on allocation failure like `Vec`; see
    /// [`try_with_capacity`](Self::try_with_capacity) for the fallible form.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is `usize::MAX`, leaving no room for the sentinel.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity < usize::MAX, "capacity overflow");

        Self::from_storage(alloc::vec![0u8; capacity + 1])
    }

    /// Creates an empty buffer with `capacity` bytes of zeroed storage.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, BufferError> {
        allocate_zeroed(capacity).map(Self::from_storage)
    }

    /// Creates a buffer whose capacity is exactly `bytes.len()`, holding a copy
    /// of `bytes`.
    pub fn from_copy(bytes: &[u8]) -> Self {
        let mut buffer = Self::with_capacity(bytes.len());
        buffer.storage[..bytes.len()].copy_from_slice(bytes);
        buffer
    }

    /// Fallible form of [`from_copy`](Self::from_copy).
    pub fn try_from_copy(bytes: &[u8]) -> Result<Self, BufferError> {
        let mut buffer = Self::try_with_capacity(bytes.len())?;
        buffer.storage[..bytes.len()].copy_from_slice(bytes);
        Ok(buffer)
    }

    fn from_storage(storage: Vec<u8>) -> Self {
        debug_assert_eq!(storage.last(), Some(&0));

        Self {
            storage,
            start: 0,
            #[cfg(any(test, feature = "test-utils"))]
            behaviour: BufferBehaviour::None,
        }
    }

    /// Changes the allocation behaviour of this buffer.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_behaviour(&mut self, behaviour: BufferBehaviour) {
        self.behaviour = behaviour;
    }

    fn allocate(&self, capacity: usize) -> Result<Vec<u8>, BufferError> {
        #[cfg(any(test, feature = "test-utils"))]
        if self.behaviour == BufferBehaviour::FailAtAllocate {
            return Err(BufferError::AllocationFailure {
                requested: capacity,
            });
        }

        allocate_zeroed(capacity)
    }

    /// Returns the allocated capacity, not counting the zero sentinel.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len() - 1
    }

    /// Returns the logical length: bytes from the logical start up to the
    /// first zero byte.
    #[inline]
    pub fn len(&self) -> usize {
        zero_terminated_len(&self.storage[self.start..])
    }

    /// Returns `true` if the logical content is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage[self.start] == 0
    }

    /// Returns the logical content.
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.len();
        &self.storage[self.start..self.start + len]
    }

    /// Returns the whole capacity, including bytes before the logical start
    /// and after the logical end, excluding the sentinel.
    pub fn raw(&self) -> &[u8] {
        &self.storage[..self.capacity()]
    }

    /// Free bytes between the logical start and the sentinel.
    #[inline]
    fn room(&self) -> usize {
        self.capacity() - self.start
    }

    /// Moves the logical content to offset 0 and wipes the vacated tail.
    fn shift_to_front(&mut self, len: usize) {
        if self.start == 0 {
            return;
        }

        let start = self.start;
        self.storage.copy_within(start..start + len, 0);
        wipe_bytes(&mut self.storage[len..start + len]);
        self.start = 0;
    }

    /// Reallocates to the next growth quantum that holds `needed` bytes.
    fn grow_to(&mut self, len: usize, needed: usize) -> Result<(), BufferError> {
        let capacity = nearest_multiple_of(GROWTH_QUANTUM, needed).ok_or(
            BufferError::AllocationFailure {
                requested: needed,
            },
        )?;

        let mut storage = match self.allocate(capacity) {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!(capacity, needed, "growable buffer reallocation failed");
                return Err(e);
            }
        };

        storage[..len].copy_from_slice(&self.storage[self.start..self.start + len]);

        let mut old = core::mem::replace(&mut self.storage, storage);
        old.zeroize();
        self.start = 0;

        Ok(())
    }

    /// Makes sure `additional` bytes fit after `len` bytes of content.
    ///
    /// Tries in order: the room already available, reclaiming a trimmed
    /// prefix, and reallocation. On success, `start + len + additional` is at
    /// most `capacity`.
    fn reserve_for(&mut self, len: usize, additional: usize) -> Result<(), BufferError> {
        let needed = len
            .checked_add(additional)
            .ok_or(BufferError::AllocationFailure {
                requested: usize::MAX,
            })?;

        if self.room() > needed {
            return Ok(());
        }

        if self.start > 0 && self.capacity() > needed {
            self.shift_to_front(len);
            return Ok(());
        }

        self.grow_to(len, needed)
    }

    /// Appends `src` after the logical content.
    ///
    /// All of `src` is copied, embedded zero bytes included, and a zero is
    /// written right after it. Grows capacity to the next multiple of
    /// [`GROWTH_QUANTUM`] when the content would not fit.
    ///
    /// On error nothing is written.
    pub fn append(&mut self, src: &[u8]) -> Result<(), BufferError> {
        if src.is_empty() {
            return Ok(());
        }

        let len = self.len();
        self.reserve_for(len, src.len())?;

        let at = self.start + len;
        self.storage[at..at + src.len()].copy_from_slice(src);
        self.storage[at + src.len()] = 0;

        Ok(())
    }

    /// Appends the UTF-8 bytes of `s`.
    pub fn append_str(&mut self, s: &str) -> Result<(), BufferError> {
        self.append(s.as_bytes())
    }

    /// Appends formatted output.
    ///
    /// The output is measured with a dry run first, then written into the
    /// reserved space, so capacity grows at most once per call.
    ///
    /// ```rust
    /// use cistern_buffer::GrowableBuffer;
    ///
    /// let mut buffer = GrowableBuffer::from_copy(b"id=");
    /// buffer.append_fmt(format_args!("{}-{:04x}", 7, 0xbeef_u16)).unwrap();
    ///
    /// assert_eq!(buffer.as_bytes(), b"id=7-beef");
    /// ```
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        let required = ByteCounter::measure(args).map_err(|_| BufferError::Format)?;

        if required == 0 {
            return Ok(());
        }

        let len = self.len();
        self.reserve_for(len, required)?;

        let at = self.start + len;
        let region = &mut self.storage[at..at + required];
        let mut cursor = SliceCursor::new(region);
        let result = fmt::write(&mut cursor, args);

        if result.is_err() || cursor.written() != required {
            // Roll back so the logical content is unchanged
            wipe_bytes(&mut self.storage[at..at + required]);
            return Err(BufferError::Format);
        }

        self.storage[at + required] = 0;

        Ok(())
    }

    /// Inserts `src` before the logical content.
    ///
    /// Reuses a trimmed prefix when it is large enough; otherwise the content
    /// is moved right with an overlap-safe copy, growing first if needed.
    ///
    /// On error nothing is written.
    pub fn prepend(&mut self, src: &[u8]) -> Result<(), BufferError> {
        if src.is_empty() {
            return Ok(());
        }

        let n = src.len();

        if self.start >= n {
            self.start -= n;
            self.storage[self.start..self.start + n].copy_from_slice(src);
            return Ok(());
        }

        let len = self.len();
        self.reserve_for(len, n)?;

        let start = self.start;
        self.storage.copy_within(start..start + len, start + n);
        self.storage[start + n + len] = 0;
        self.storage[start..start + n].copy_from_slice(src);

        Ok(())
    }

    /// Copies the logical range `[from, to)` into a new buffer.
    ///
    /// A negative `to` counts back from the end: `-1` is `len() - 1`. The
    /// resolved end is clamped to `len()`. Fails with
    /// [`BufferError::InvalidRange`] if it resolves before `from`.
    ///
    /// ```rust
    /// use cistern_buffer::GrowableBuffer;
    ///
    /// let buffer = GrowableBuffer::from_copy(b"0123456789");
    /// let slice = buffer.slice(2, -1).unwrap();
    ///
    /// assert_eq!(slice.as_bytes(), b"2345678");
    /// ```
    pub fn slice(&self, from: usize, to: isize) -> Result<GrowableBuffer, BufferError> {
        let len = self.len();
        let invalid = BufferError::InvalidRange { from, to };

        let end = if to < 0 {
            len.checked_sub(to.unsigned_abs()).ok_or(invalid)?
        } else {
            (to as usize).min(len)
        };

        if end < from {
            return Err(invalid);
        }

        let n = end - from;
        let mut storage = self.allocate(n)?;
        storage[..n].copy_from_slice(&self.as_bytes()[from..end]);

        Ok(Self::from_storage(storage))
    }

    /// Removes leading whitespace by advancing the logical start.
    pub fn trim_left(&mut self) {
        let capacity = self.capacity();

        while self.start < capacity {
            let byte = self.storage[self.start];

            if byte == 0 || !is_c_space(byte) {
                break;
            }

            self.storage[self.start] = 0;
            self.start += 1;
        }
    }

    /// Removes trailing whitespace by zeroing it.
    pub fn trim_right(&mut self) {
        let mut end = self.start + self.len();

        while end > self.start && is_c_space(self.storage[end - 1]) {
            end -= 1;
            self.storage[end] = 0;
        }
    }

    /// Removes leading and trailing whitespace.
    pub fn trim(&mut self) {
        self.trim_left();
        self.trim_right();
    }

    /// Shrinks the allocation to exactly the logical length plus sentinel.
    ///
    /// Returns the number of bytes of capacity released.
    pub fn compact(&mut self) -> Result<usize, BufferError> {
        let len = self.len();
        let released = self.capacity() - len;

        let mut storage = self.allocate(len)?;
        storage[..len].copy_from_slice(&self.storage[self.start..self.start + len]);

        let mut old = core::mem::replace(&mut self.storage, storage);
        old.zeroize();
        self.start = 0;

        Ok(released)
    }

    /// Stamps every byte of the capacity with `byte`.
    ///
    /// Covers the whole allocation, not just the logical content, and resets
    /// the logical start to offset 0. The sentinel is left untouched.
    pub fn fill(&mut self, byte: u8) {
        let capacity = self.capacity();
        fill_bytes_with_pattern(&mut self.storage[..capacity], byte);
        self.start = 0;
    }

    /// Zeroes the whole capacity.
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        wipe_bytes(&mut self.storage[..capacity]);
        self.start = 0;
    }

    /// Returns the offset of the first occurrence of `needle` in the logical
    /// content.
    pub fn index_of(&self, needle: &[u8]) -> Option<usize> {
        find_subslice(self.as_bytes(), needle)
    }

    /// Renders the raw capacity as hex, eight bytes per line.
    pub fn hex_dump(&self) -> String {
        let mut out = String::with_capacity(self.capacity() * 3);

        for (i, chunk) in self.raw().chunks(8).enumerate() {
            if i > 0 {
                out.push('\n');
            }

            for (j, &byte) in chunk.iter().enumerate() {
                if j > 0 {
                    out.push(' ');
                }
                out.push(HEX_DIGITS[usize::from(byte >> 4)] as char);
                out.push(HEX_DIGITS[usize::from(byte & 0x0F)] as char);
            }
        }

        out
    }
}

fn allocate_zeroed(capacity: usize) -> Result<Vec<u8>, BufferError> {
    let failure = BufferError::AllocationFailure {
        requested: capacity,
    };
    let total = capacity.checked_add(1).ok_or(failure)?;

    let mut storage = Vec::new();
    storage.try_reserve_exact(total).map_err(|_| failure)?;
    storage.resize(total, 0);

    Ok(storage)
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GrowableBuffer {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            start: self.start,
            #[cfg(any(test, feature = "test-utils"))]
            behaviour: self.behaviour,
        }
    }
}

impl PartialEq for GrowableBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for GrowableBuffer {}

impl core::fmt::Debug for GrowableBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}

impl fmt::Write for GrowableBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl Zeroize for GrowableBuffer {
    fn zeroize(&mut self) {
        self.clear();
    }
}

impl Drop for GrowableBuffer {
    fn drop(&mut self) {
        self.storage.zeroize();
    }
}

impl ZeroizeOnDrop for GrowableBuffer {}

impl From<&[u8]> for GrowableBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_copy(bytes)
    }
}

impl From<&str> for GrowableBuffer {
    fn from(s: &str) -> Self {
        Self::from_copy(s.as_bytes())
    }
}

impl From<Vec<u8>> for GrowableBuffer {
    /// Copies the bytes in and wipes the source vector.
    fn from(mut bytes: Vec<u8>) -> Self {
        let buffer = Self::from_copy(&bytes);
        bytes.zeroize();
        buffer
    }
}
