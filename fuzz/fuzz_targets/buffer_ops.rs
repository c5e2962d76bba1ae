// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#![no_main]

use libfuzzer_sys::fuzz_target;

use cistern_buffer::GrowableBuffer;
use cistern_test_utils::{BufferOp, TextModel, decode_buffer_ops};

fuzz_target!(|data: &[u8]| {
    let Some((&seed, stream)) = data.split_first() else {
        return;
    };

    let mut buffer = GrowableBuffer::with_capacity(usize::from(seed));
    let mut model = TextModel::new();

    for op in decode_buffer_ops(stream) {
        match &op {
            BufferOp::Append(bytes) => {
                buffer.append(bytes).expect("append");
                model.append(bytes);
            }
            BufferOp::AppendFmt(n) => {
                buffer.append_fmt(format_args!("{n}")).expect("append_fmt");
                model.append(n.to_string().as_bytes());
            }
            BufferOp::Prepend(bytes) => {
                buffer.prepend(bytes).expect("prepend");
                model.prepend(bytes);
            }
            BufferOp::Slice { from, to } => {
                let sliced = buffer.slice(*from, *to).ok();
                assert_eq!(
                    sliced.as_ref().map(|s| s.as_bytes().to_vec()),
                    model.slice(*from, *to)
                );
            }
            BufferOp::TrimLeft => {
                buffer.trim_left();
                model.trim_left();
            }
            BufferOp::TrimRight => {
                buffer.trim_right();
                model.trim_right();
            }
            BufferOp::Trim => {
                buffer.trim();
                model.trim();
            }
            BufferOp::Compact => {
                buffer.compact().expect("compact");
            }
            BufferOp::Fill(byte) => {
                buffer.fill(*byte);
                model.fill(*byte, buffer.capacity());
            }
            BufferOp::Clear => {
                buffer.clear();
                model.clear();
            }
            BufferOp::IndexOf(needle) => {
                assert_eq!(buffer.index_of(needle), model.index_of(needle));
            }
        }

        assert_eq!(buffer.as_bytes(), model.as_bytes(), "after {op:?}");
        assert!(buffer.len() <= buffer.capacity());
    }
});
