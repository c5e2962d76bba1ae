// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Two-pass formatting: measure first, then write into reserved space.

use core::fmt;

/// Counts formatted bytes without storing them.
#[derive(Debug, Default)]
pub(crate) struct ByteCounter {
    count: usize,
}

impl ByteCounter {
    /// Runs a dry formatting pass and returns the number of bytes produced.
    pub(crate) fn measure(args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
        let mut counter = Self::default();
        fmt::write(&mut counter, args)?;

        Ok(counter.count)
    }
}

impl fmt::Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count = self.count.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

/// Writes formatted bytes into a fixed slice, failing instead of overflowing.
pub(crate) struct SliceCursor<'a> {
    dst: &'a mut [u8],
    written: usize,
}

impl<'a> SliceCursor<'a> {
    pub(crate) fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, written: 0 }
    }

    /// Number of bytes written so far.
    pub(crate) fn written(&self) -> usize {
        self.written
    }
}

impl fmt::Write for SliceCursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.written.checked_add(bytes.len()).ok_or(fmt::Error)?;

        if end > self.dst.len() {
            return Err(fmt::Error);
        }

        self.dst[self.written..end].copy_from_slice(bytes);
        self.written = end;

        Ok(())
    }
}
