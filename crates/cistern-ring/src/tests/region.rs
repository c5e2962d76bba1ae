// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Tests for both region backends.

use crate::error::MirrorError;
use crate::region::{MirrorRegion, PortableRegion, checked_page_size, supports_mapping};

fn halves(region: &dyn MirrorRegion) -> (&[u8], &[u8]) {
    let capacity = region.capacity();
    let whole = unsafe { core::slice::from_raw_parts(region.base(), capacity * 2) };

    whole.split_at(capacity)
}

// =============================================================================
// PortableRegion
// =============================================================================

#[test]
fn test_portable_new_is_zeroed() {
    let region = PortableRegion::new(32).expect("Failed to new(..)");
    let (low, high) = halves(&region);

    assert!(low.iter().all(|&b| b == 0));
    assert!(high.iter().all(|&b| b == 0));
}

#[test]
fn test_portable_new_rejects_zero_capacity() {
    assert!(matches!(
        PortableRegion::new(0),
        Err(MirrorError::Allocation)
    ));
}

#[test]
fn test_portable_new_rejects_overflowing_capacity() {
    assert!(matches!(
        PortableRegion::new(usize::MAX),
        Err(MirrorError::Allocation)
    ));
}

#[test]
fn test_portable_write_inside_first_half_is_mirrored() {
    let region = PortableRegion::new(16).expect("Failed to new(..)");

    unsafe { region.write(3, b"abcd") };

    let (low, high) = halves(&region);
    assert_eq!(&low[3..7], b"abcd");
    assert_eq!(low, high);
}

#[test]
fn test_portable_write_across_boundary_is_mirrored() {
    let region = PortableRegion::new(16).expect("Failed to new(..)");

    unsafe { region.write(12, b"0123456789") };

    let (low, high) = halves(&region);
    assert_eq!(low, high);
    assert_eq!(&low[12..16], b"0123");
    assert_eq!(&low[0..6], b"456789");

    let view = unsafe { region.view(12, 10) };
    assert_eq!(view, b"0123456789");
}

#[test]
fn test_portable_halves_stay_equal_over_many_writes() {
    let region = PortableRegion::new(64).expect("Failed to new(..)");
    let mut offset = 0usize;

    for round in 0u8..200 {
        let len = usize::from(round % 63);
        let chunk = vec![round; len];

        unsafe { region.write(offset, &chunk) };
        offset = (offset + len) % 64;

        let (low, high) = halves(&region);
        assert_eq!(low, high, "round {round}");
    }
}

// =============================================================================
// MappedRegion
// =============================================================================

// =============================================================================
// page_size()
// =============================================================================

#[test]
fn test_checked_page_size_accepts_reported_size() {
    assert_eq!(checked_page_size(4096), 4096);
    assert_eq!(checked_page_size(16384), 16384);
}

#[test]
fn test_checked_page_size_falls_back_on_sysconf_failure() {
    assert_eq!(checked_page_size(-1), 4096);
    assert_eq!(checked_page_size(0), 4096);
    assert_eq!(checked_page_size(3000), 4096);
}

#[test]
fn test_supports_mapping_rejects_partial_pages() {
    assert!(!supports_mapping(0));
    assert!(!supports_mapping(16));
}

#[cfg(unix)]
mod mapped {
    use serial_test::serial;

    use super::halves;
    use crate::error::MirrorError;
    use crate::region::{MappedRegion, MirrorRegion, MirrorStrategy, page_size};
    use crate::tests::mapped_order;
    use crate::{RingBuffer, RingError};

    #[test]
    #[serial(mirror)]
    fn test_mapped_new_reports_strategy() {
        let region = MappedRegion::new(page_size()).expect("Failed to new(..)");

        assert_eq!(region.strategy(), MirrorStrategy::Mapped);
        assert_eq!(region.capacity(), page_size());
    }

    #[test]
    #[serial(mirror)]
    fn test_mapped_halves_alias() {
        let capacity = page_size();
        let region = MappedRegion::new(capacity).expect("Failed to new(..)");

        unsafe { *region.base() = 0xAB };
        unsafe { *region.base().add(capacity + 1) = 0xCD };

        let (low, high) = halves(&region);
        assert_eq!(high[0], 0xAB);
        assert_eq!(low[1], 0xCD);
    }

    #[test]
    #[serial(mirror)]
    fn test_mapped_write_across_boundary_is_contiguous() {
        let capacity = page_size();
        let region = MappedRegion::new(capacity).expect("Failed to new(..)");

        unsafe { region.write(capacity - 2, b"wrap") };

        let (low, high) = halves(&region);
        assert_eq!(&low[..2], b"ap");
        assert_eq!(&high[capacity - 2..], b"wr");
        assert_eq!(unsafe { region.view(capacity - 2, 4) }, b"wrap");
    }

    #[test]
    #[serial(mirror)]
    fn test_auto_maps_page_sized_ring() {
        let ring = RingBuffer::new(mapped_order()).expect("Failed to new(..)");

        assert_eq!(ring.strategy(), MirrorStrategy::Mapped);
    }

    #[test]
    fn test_mapped_strategy_rejects_sub_page_capacity() {
        let result = RingBuffer::with_strategy(4, MirrorStrategy::Mapped);

        assert!(matches!(
            result,
            Err(RingError::Mirror(MirrorError::Layout))
        ));
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    #[serial(mirror)]
    fn test_mapped_fails_when_descriptors_exhausted() {
        let mut original = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut original) };

        let none = libc::rlimit {
            rlim_cur: 0,
            rlim_max: original.rlim_max,
        };
        unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &none) };

        let mapped = RingBuffer::with_strategy(mapped_order(), MirrorStrategy::Mapped);
        let auto = RingBuffer::new(mapped_order());

        unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &original) };

        assert!(matches!(
            mapped,
            Err(RingError::Mirror(MirrorError::Backing))
        ));
        assert_eq!(
            auto.expect("Failed to new(..)").strategy(),
            MirrorStrategy::Portable
        );
    }
}
