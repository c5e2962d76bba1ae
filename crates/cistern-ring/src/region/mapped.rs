// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! MappedRegion - one shared memory object mapped twice, back to back.
//!
//! Setup:
//! 1. Create an anonymous shared memory object (`memfd_create` on Linux and
//!    Android, an unlinked `mkstemp` file elsewhere) and size it to
//!    `capacity` bytes.
//! 2. Reserve `2 * capacity` bytes of address space with `PROT_NONE`.
//! 3. Map the object over each half with `MAP_FIXED | MAP_SHARED`.
//! 4. Close the descriptor; the mappings keep the object alive.

use core::ptr;

use crate::error::MirrorError;

use super::{MirrorRegion, MirrorStrategy};

/// Hardware-mirrored region.
#[derive(Debug)]
pub(crate) struct MappedRegion {
    base: *mut u8,
    capacity: usize,
}

unsafe impl Send for MappedRegion {}
unsafe impl Sync for MappedRegion {}

impl MappedRegion {
    /// Maps a `capacity`-byte object twice. `capacity` must be a multiple of
    /// the page size.
    pub(crate) fn new(capacity: usize) -> Result<Self, MirrorError> {
        let span = capacity.checked_mul(2).ok_or(MirrorError::Reserve)?;
        let size = libc::off_t::try_from(capacity).map_err(|_| MirrorError::Truncate)?;

        let fd = open_backing()?;
        let result = Self::map_twice(fd, capacity, span, size);

        unsafe { libc::close(fd) };

        result
    }

    fn map_twice(
        fd: libc::c_int,
        capacity: usize,
        span: usize,
        size: libc::off_t,
    ) -> Result<Self, MirrorError> {
        if unsafe { libc::ftruncate(fd, size) } != 0 {
            return Err(MirrorError::Truncate);
        }

        let reserved = unsafe {
            libc::mmap(
                ptr::null_mut(),
                span,
                libc::PROT_NONE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if reserved == libc::MAP_FAILED {
            return Err(MirrorError::Reserve);
        }

        // Owns the reservation from here on; drop unmaps it on failure.
        let region = Self {
            base: reserved as *mut u8,
            capacity,
        };

        for half in [0, capacity] {
            let target = unsafe { region.base.add(half) };
            let mapped = unsafe {
                libc::mmap(
                    target as *mut libc::c_void,
                    capacity,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_FIXED | libc::MAP_SHARED,
                    fd,
                    0,
                )
            };

            if mapped != target as *mut libc::c_void {
                return Err(MirrorError::Map);
            }
        }

        Ok(region)
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn open_backing() -> Result<libc::c_int, MirrorError> {
    let fd = unsafe { libc::memfd_create(c"cistern-ring".as_ptr(), libc::MFD_CLOEXEC) };

    if fd < 0 {
        return Err(MirrorError::Backing);
    }

    Ok(fd)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn open_backing() -> Result<libc::c_int, MirrorError> {
    let mut template = *b"/tmp/cistern-ring-XXXXXX\0";
    let fd = unsafe { libc::mkstemp(template.as_mut_ptr() as *mut libc::c_char) };

    if fd < 0 {
        return Err(MirrorError::Backing);
    }

    // The name is only needed to obtain the descriptor.
    unsafe { libc::unlink(template.as_ptr() as *const libc::c_char) };

    Ok(fd)
}

impl MirrorRegion for MappedRegion {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn strategy(&self) -> MirrorStrategy {
        MirrorStrategy::Mapped
    }

    fn base(&self) -> *mut u8 {
        self.base
    }

    unsafe fn mirror(&self, _offset: usize, _len: usize) {}
}

impl Drop for MappedRegion {
    fn drop(&mut self) {
        unsafe { libc::munmap(self.base as *mut libc::c_void, self.capacity * 2) };
    }
}
