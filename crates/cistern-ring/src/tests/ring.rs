// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{MAX_ORDER, MIN_ORDER, MirrorStrategy, RingBuffer, RingError};

fn portable(order: u32) -> RingBuffer {
    RingBuffer::with_strategy(order, MirrorStrategy::Portable).expect("Failed to with_strategy(..)")
}

fn sequence(range: core::ops::Range<u8>) -> Vec<u8> {
    range.collect()
}

// =============================================================================
// new() / with_strategy()
// =============================================================================

#[test]
fn test_new_capacity_is_power_of_two() {
    for order in MIN_ORDER..=10 {
        let ring = RingBuffer::new(order).expect("Failed to new(..)");

        assert_eq!(ring.capacity(), 1 << order);
        assert_eq!(ring.order(), order);
    }
}

#[test]
fn test_new_ring_is_empty() {
    let ring = portable(4);

    assert!(ring.is_empty());
    assert_eq!(ring.used_space(), 0);
    assert_eq!(ring.unused_space(), 16);
}

#[test]
fn test_new_rejects_order_zero() {
    let result = RingBuffer::new(0);

    assert!(matches!(result, Err(RingError::InvalidOrder { order: 0 })));
}

#[test]
fn test_new_rejects_order_above_max() {
    let result = RingBuffer::new(MAX_ORDER + 1);

    assert!(matches!(
        result,
        Err(RingError::InvalidOrder { order }) if order == MAX_ORDER + 1
    ));
}

#[test]
fn test_auto_uses_portable_for_small_capacity() {
    let ring = RingBuffer::new(4).expect("Failed to new(..)");

    assert_eq!(ring.strategy(), MirrorStrategy::Portable);
}

// =============================================================================
// offer()
// =============================================================================

#[test]
fn test_offer_returns_bytes_written() {
    let mut ring = portable(4);

    assert_eq!(ring.offer(b"abc"), 3);
    assert_eq!(ring.used_space(), 3);
    assert_eq!(ring.unused_space(), 13);
}

#[test]
fn test_offer_empty_writes_nothing() {
    let mut ring = portable(4);

    assert_eq!(ring.offer(&[]), 0);
    assert!(ring.is_empty());
}

#[test]
fn test_offer_of_unused_space_is_rejected() {
    let mut ring = portable(4);
    let block = [7u8; 16];

    assert_eq!(ring.offer(&block), 0);
    assert!(ring.is_empty());
}

#[test]
fn test_offer_of_unused_minus_one_fills_ring() {
    let mut ring = portable(4);
    let block = [7u8; 15];

    assert_eq!(ring.offer(&block), 15);
    assert_eq!(ring.used_space(), ring.capacity() - 1);
    assert_eq!(ring.unused_space(), 1);

    // Only an empty offer fits now.
    assert_eq!(ring.offer(b"x"), 0);
    assert_eq!(ring.used_space(), 15);
}

#[test]
fn test_offer_rejection_is_all_or_nothing() {
    let mut ring = portable(4);
    ring.offer(b"0123456789");

    assert_eq!(ring.offer(b"abcdef"), 0);
    assert_eq!(ring.peek(), Some(&b"0123456789"[..]));
}

#[test]
fn test_offer_tail_wraps_to_zero_at_capacity() {
    let mut ring = portable(3);

    ring.offer(b"abcd");
    ring.poll(4);
    ring.offer(b"efgh");

    // tail reached 8 and wrapped to 0; head is at 4.
    assert_eq!(ring.used_space(), 4);
    assert_eq!(ring.peek(), Some(&b"efgh"[..]));
}

// =============================================================================
// try_offer()
// =============================================================================

#[test]
fn test_try_offer_accepts_fitting_offer() {
    let mut ring = portable(4);

    assert_eq!(ring.try_offer(b"abc").expect("Failed to try_offer(..)"), 3);
}

#[test]
fn test_try_offer_reports_capacity_exhausted() {
    let mut ring = portable(4);
    ring.offer(b"0123456789");

    let result = ring.try_offer(b"abcdef");

    assert_eq!(
        result,
        Err(RingError::CapacityExhausted {
            requested: 6,
            available: 5,
        })
    );
    assert_eq!(ring.used_space(), 10);
}

// =============================================================================
// peek()
// =============================================================================

#[test]
fn test_peek_empty_returns_none() {
    let ring = portable(4);

    assert_eq!(ring.peek(), None);
}

#[test]
fn test_peek_does_not_consume() {
    let mut ring = portable(4);
    ring.offer(b"abc");

    assert_eq!(ring.peek(), Some(&b"abc"[..]));
    assert_eq!(ring.peek(), Some(&b"abc"[..]));
    assert_eq!(ring.used_space(), 3);
}

#[test]
fn test_peek_is_contiguous_across_wrap() {
    let mut ring = portable(4);

    ring.offer(&sequence(0..12));
    ring.poll(10);
    ring.offer(&sequence(12..22));

    assert_eq!(ring.peek(), Some(&sequence(10..22)[..]));
}

// =============================================================================
// poll()
// =============================================================================

#[test]
fn test_poll_empty_returns_none() {
    let mut ring = portable(4);

    assert_eq!(ring.poll(1), None);
}

#[test]
fn test_poll_returns_oldest_bytes() {
    let mut ring = portable(4);
    ring.offer(b"abcdef");

    assert_eq!(ring.poll(2), Some(&b"ab"[..]));
    assert_eq!(ring.poll(3), Some(&b"cde"[..]));
    assert_eq!(ring.used_space(), 1);
}

#[test]
fn test_poll_zero_returns_empty_view() {
    let mut ring = portable(4);
    ring.offer(b"abc");

    assert_eq!(ring.poll(0), Some(&[][..]));
    assert_eq!(ring.used_space(), 3);
}

#[test]
fn test_poll_wraparound_round_trip() {
    let mut ring = portable(4);

    assert_eq!(ring.offer(&sequence(0..10)), 10);
    assert_eq!(ring.poll(6), Some(&sequence(0..6)[..]));
    assert_eq!(ring.offer(&sequence(10..18)), 8);

    assert_eq!(ring.used_space(), 12);
    assert_eq!(ring.poll(12), Some(&sequence(6..18)[..]));
    assert!(ring.is_empty());
    assert_eq!(ring.used_space(), 0);
}

#[test]
fn test_poll_past_used_space_advances_head_unchecked() {
    let mut ring = portable(4);
    ring.offer(b"abc");

    // View is cut to the readable bytes, head moves by the full request.
    assert_eq!(ring.poll(5), Some(&b"abc"[..]));
    assert_eq!(ring.used_space(), 16 - 2);
}

#[test]
fn test_poll_huge_request_does_not_overflow() {
    let mut ring = portable(4);
    ring.offer(b"abc");

    assert_eq!(ring.poll(usize::MAX), Some(&b"abc"[..]));
}

// =============================================================================
// try_poll()
// =============================================================================

#[test]
fn test_try_poll_empty_fails() {
    let mut ring = portable(4);

    assert_eq!(ring.try_poll(1), Err(RingError::Empty));
}

#[test]
fn test_try_poll_underflow_leaves_head() {
    let mut ring = portable(4);
    ring.offer(b"abc");

    assert_eq!(
        ring.try_poll(4),
        Err(RingError::Underflow {
            requested: 4,
            available: 3,
        })
    );
    assert_eq!(ring.peek(), Some(&b"abc"[..]));
}

#[test]
fn test_try_poll_exact_drains() {
    let mut ring = portable(4);
    ring.offer(b"abc");

    assert_eq!(ring.try_poll(3).expect("Failed to try_poll(..)"), b"abc");
    assert!(ring.is_empty());
}

// =============================================================================
// used_space() / unused_space()
// =============================================================================

#[test]
fn test_space_sums_to_capacity_through_wraps() {
    let mut ring = portable(5);

    for round in 0u8..100 {
        let chunk = vec![round; usize::from(round % 13) + 1];
        ring.offer(&chunk);
        assert_eq!(ring.used_space() + ring.unused_space(), ring.capacity());

        ring.try_poll(ring.used_space().min(usize::from(round % 7))).ok();
        assert_eq!(ring.used_space() + ring.unused_space(), ring.capacity());
        assert!(ring.used_space() < ring.capacity());
    }
}

// =============================================================================
// Debug
// =============================================================================

#[test]
fn test_debug_hides_contents() {
    let mut ring = portable(4);
    ring.offer(b"secret");

    let debug = format!("{ring:?}");

    assert!(debug.contains("RingBuffer"));
    assert!(debug.contains("capacity: 16"));
    assert!(!debug.contains("secret"));
}
