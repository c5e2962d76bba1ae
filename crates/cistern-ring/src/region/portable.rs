// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PortableRegion - heap region mirrored in software.

use core::ptr::{self, NonNull};
use std::alloc::{self, Layout};

use crate::error::MirrorError;

use super::{MirrorRegion, MirrorStrategy};

/// Software-mirrored region: `2 * capacity` heap bytes, every write copied
/// into the opposite half.
#[derive(Debug)]
pub(crate) struct PortableRegion {
    base: NonNull<u8>,
    capacity: usize,
    layout: Layout,
}

unsafe impl Send for PortableRegion {}
unsafe impl Sync for PortableRegion {}

impl PortableRegion {
    /// Allocates a zeroed `2 * capacity` region.
    pub(crate) fn new(capacity: usize) -> Result<Self, MirrorError> {
        let span = capacity.checked_mul(2).ok_or(MirrorError::Allocation)?;

        if span == 0 {
            return Err(MirrorError::Allocation);
        }

        let layout = Layout::from_size_align(span, 1).map_err(|_| MirrorError::Allocation)?;
        let base = NonNull::new(unsafe { alloc::alloc_zeroed(layout) })
            .ok_or(MirrorError::Allocation)?;

        Ok(Self {
            base,
            capacity,
            layout,
        })
    }
}

impl MirrorRegion for PortableRegion {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn strategy(&self) -> MirrorStrategy {
        MirrorStrategy::Portable
    }

    fn base(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    unsafe fn mirror(&self, offset: usize, len: usize) {
        let capacity = self.capacity;
        let base = self.base();
        let end = offset + len;

        // Part that landed in the first half goes up.
        let low_end = end.min(capacity);
        if low_end > offset {
            unsafe {
                ptr::copy_nonoverlapping(
                    base.add(offset),
                    base.add(offset + capacity),
                    low_end - offset,
                )
            };
        }

        // Part that ran past the first half goes down.
        if end > capacity {
            unsafe { ptr::copy_nonoverlapping(base.add(capacity), base, end - capacity) };
        }
    }
}

impl Drop for PortableRegion {
    fn drop(&mut self) {
        unsafe { alloc::dealloc(self.base.as_ptr(), self.layout) };
    }
}
