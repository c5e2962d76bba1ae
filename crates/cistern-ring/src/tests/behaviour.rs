// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Mapping failure injection.

use tracing_test::traced_test;

use crate::error::MirrorError;
use crate::tests::mapped_order;
use crate::{MirrorBehaviour, MirrorStrategy, RingBuffer, RingError};

#[cfg(unix)]
#[test]
#[traced_test]
fn test_auto_falls_back_to_portable_when_mapping_fails() {
    let mut ring = RingBuffer::with_behaviour(
        mapped_order(),
        MirrorStrategy::Auto,
        MirrorBehaviour::FailAtMap,
    )
    .expect("Failed to with_behaviour(..)");

    assert_eq!(ring.strategy(), MirrorStrategy::Portable);
    assert!(logs_contain("falling back to portable region"));

    // The fallback ring is fully usable, including across the wrap.
    let capacity = ring.capacity();
    let block = vec![0x5A; capacity - 1];
    assert_eq!(ring.offer(&block), capacity - 1);
    assert_eq!(ring.poll(capacity - 2).map(<[u8]>::len), Some(capacity - 2));
    assert_eq!(ring.offer(b"tail"), 4);
    assert_eq!(ring.peek(), Some(&[0x5A, b't', b'a', b'i', b'l'][..]));
}

#[test]
#[traced_test]
fn test_auto_logs_region_creation() {
    let _ring = RingBuffer::with_behaviour(4, MirrorStrategy::Auto, MirrorBehaviour::None)
        .expect("Failed to with_behaviour(..)");

    assert!(logs_contain("ring region created"));
    assert!(!logs_contain("falling back"));
}

#[cfg(unix)]
#[test]
fn test_mapped_strategy_does_not_fall_back() {
    let result = RingBuffer::with_behaviour(
        mapped_order(),
        MirrorStrategy::Mapped,
        MirrorBehaviour::FailAtMap,
    );

    assert!(matches!(result, Err(RingError::Mirror(MirrorError::Map))));
}

#[test]
fn test_portable_strategy_ignores_mapping_behaviour() {
    let ring = RingBuffer::with_behaviour(
        mapped_order(),
        MirrorStrategy::Portable,
        MirrorBehaviour::FailAtMap,
    )
    .expect("Failed to with_behaviour(..)");

    assert_eq!(ring.strategy(), MirrorStrategy::Portable);
}
