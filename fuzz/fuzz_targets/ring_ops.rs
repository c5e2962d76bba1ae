// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#![no_main]

use libfuzzer_sys::fuzz_target;

use cistern_ring::{MirrorStrategy, RingBuffer};
use cistern_test_utils::{RingModel, RingOp, decode_ring_ops, ring_order_from};

fuzz_target!(|data: &[u8]| {
    let Some((&seed, stream)) = data.split_first() else {
        return;
    };

    let strategy = if seed & 0x80 == 0 {
        MirrorStrategy::Portable
    } else {
        MirrorStrategy::Auto
    };

    let Ok(mut ring) = RingBuffer::with_strategy(ring_order_from(seed), strategy) else {
        return;
    };
    let mut model = RingModel::new(ring.capacity());
    let mut in_contract = true;

    for op in decode_ring_ops(stream) {
        match op {
            RingOp::Offer(bytes) => {
                let written = ring.offer(&bytes);
                if in_contract {
                    assert_eq!(written, model.offer(&bytes));
                }
            }
            RingOp::Poll(n) => {
                // Polling past the readable bytes is allowed but leaves
                // the model behind.
                in_contract &= ring.is_empty() || n <= ring.used_space();

                let polled = ring.poll(n).map(<[u8]>::to_vec);
                if in_contract {
                    assert_eq!(polled, model.try_poll(n));
                }
            }
            RingOp::TryPoll(n) => {
                let polled = ring.try_poll(n).ok().map(<[u8]>::to_vec);
                if in_contract {
                    assert_eq!(polled, model.try_poll(n));
                }
            }
            RingOp::Peek => {
                let peeked = ring.peek().map(<[u8]>::to_vec);
                if in_contract {
                    let expected = model.peek();
                    assert_eq!(peeked, (!expected.is_empty()).then_some(expected));
                }
            }
        }

        assert_eq!(ring.used_space() + ring.unused_space(), ring.capacity());
        assert!(ring.used_space() < ring.capacity());
    }
});
