// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Mirrored regions.
//!
//! A region is `2 * capacity` bytes where byte `i` and byte `i + capacity`
//! always hold the same value. Any run of fewer than `capacity` bytes that
//! starts in the first half can then be read or written as one slice, with no
//! special case at the wrap boundary.
//!
//! Two backends keep that invariant:
//!
//! - [`MappedRegion`] (Unix): one shared memory object mapped twice, back to
//!   back. The MMU keeps the halves identical.
//! - [`PortableRegion`]: a heap allocation where every write is copied into
//!   the other half after it lands.

use core::fmt;
use core::ptr;

use tracing::{debug, warn};

use crate::error::MirrorError;

#[cfg(unix)]
mod mapped;
mod portable;

#[cfg(unix)]
pub(crate) use mapped::MappedRegion;
pub(crate) use portable::PortableRegion;

/// Selects how the ring's region is backed.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum MirrorStrategy {
    /// Mapped when the platform and capacity allow it, portable otherwise.
    ///
    /// A mapping failure is logged and falls back to the portable region.
    #[default]
    Auto,
    /// Shared memory mapped twice. Creation fails rather than falling back.
    Mapped,
    /// Heap region mirrored in software on every write.
    Portable,
}

/// A `2 * capacity()` byte region whose halves hold identical bytes.
pub(crate) trait MirrorRegion: Send + Sync + fmt::Debug {
    /// Size of one half.
    fn capacity(&self) -> usize;

    /// Backend in use. Never [`MirrorStrategy::Auto`].
    fn strategy(&self) -> MirrorStrategy;

    /// Start of the region.
    fn base(&self) -> *mut u8;

    /// Restores the mirror invariant for the `len` bytes just written at
    /// `offset`.
    ///
    /// # Safety
    /// `offset < capacity()` and `len < capacity()`. No other thread may
    /// access the written bytes or their mirror images.
    unsafe fn mirror(&self, offset: usize, len: usize);

    /// Copies `src` to `offset` and restores the mirror invariant.
    ///
    /// # Safety
    /// `offset < capacity()` and `src.len() < capacity()`. No other thread
    /// may access the target bytes or their mirror images.
    unsafe fn write(&self, offset: usize, src: &[u8]) {
        debug_assert!(offset < self.capacity());
        debug_assert!(src.len() < self.capacity());

        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.base().add(offset), src.len());
            self.mirror(offset, src.len());
        }
    }

    /// Borrows `len` bytes starting at `offset`.
    ///
    /// # Safety
    /// `offset < capacity()` and `len < capacity()`. The bytes must not be
    /// written while the view is alive.
    unsafe fn view(&self, offset: usize, len: usize) -> &[u8] {
        debug_assert!(offset < self.capacity());
        debug_assert!(len < self.capacity());

        unsafe { core::slice::from_raw_parts(self.base().add(offset), len) }
    }
}

/// Establishes a hardware-mirrored region of `capacity` bytes.
pub(crate) type MapFn = fn(usize) -> Result<Box<dyn MirrorRegion>, MirrorError>;

/// Page size assumed when the system cannot report one.
const FALLBACK_PAGE_SIZE: usize = 4096;

/// Returns the system page size.
pub(crate) fn page_size() -> usize {
    #[cfg(unix)]
    {
        let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        checked_page_size(i64::from(raw))
    }

    #[cfg(not(unix))]
    {
        FALLBACK_PAGE_SIZE
    }
}

/// Accepts a reported page size only if it is a positive power of two.
#[cfg(any(unix, test))]
pub(crate) fn checked_page_size(raw: i64) -> usize {
    match usize::try_from(raw) {
        Ok(size) if size.is_power_of_two() => size,
        _ => FALLBACK_PAGE_SIZE,
    }
}

/// Whether `capacity` can be backed by a mirrored mapping on this platform.
pub(crate) fn supports_mapping(capacity: usize) -> bool {
    cfg!(unix) && capacity > 0 && capacity % page_size() == 0
}

/// Maps a shared memory object twice.
pub(crate) fn map_mirrored(capacity: usize) -> Result<Box<dyn MirrorRegion>, MirrorError> {
    #[cfg(unix)]
    {
        Ok(Box::new(MappedRegion::new(capacity)?))
    }

    #[cfg(not(unix))]
    {
        let _ = capacity;
        Err(MirrorError::Unsupported)
    }
}

/// Creates the region for `strategy`, using `map` for mirrored mappings.
pub(crate) fn create(
    capacity: usize,
    strategy: MirrorStrategy,
    map: MapFn,
) -> Result<Box<dyn MirrorRegion>, MirrorError> {
    let region = match strategy {
        MirrorStrategy::Portable => portable(capacity)?,
        MirrorStrategy::Mapped => {
            if !supports_mapping(capacity) {
                return Err(if cfg!(unix) {
                    MirrorError::Layout
                } else {
                    MirrorError::Unsupported
                });
            }

            map(capacity)?
        }
        MirrorStrategy::Auto if supports_mapping(capacity) => match map(capacity) {
            Ok(region) => region,
            Err(error) => {
                warn!(%error, capacity, "mirrored mapping failed, falling back to portable region");
                portable(capacity)?
            }
        },
        MirrorStrategy::Auto => portable(capacity)?,
    };

    debug!(strategy = ?region.strategy(), capacity, "ring region created");

    Ok(region)
}

fn portable(capacity: usize) -> Result<Box<dyn MirrorRegion>, MirrorError> {
    Ok(Box::new(PortableRegion::new(capacity)?))
}
