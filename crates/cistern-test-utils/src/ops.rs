// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Opcode-stream decoding.
//!
//! A stream is a sequence of records. The first byte of a record is a control
//! byte whose value (modulo the number of operations) selects the operation;
//! the bytes after it are that operation's parameters. Payloads are truncated
//! to whatever input remains, so every byte string decodes to something.

/// Cursor over raw fuzz input.
#[derive(Debug, Clone)]
pub struct OpStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> OpStream<'a> {
    /// Creates a cursor at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Consumes one byte.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Consumes up to `n` bytes; fewer if the input runs out.
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let end = self.pos.saturating_add(n).min(self.data.len());
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        bytes
    }

    /// Consumes a length byte followed by up to that many payload bytes.
    pub fn take_prefixed(&mut self) -> Option<&'a [u8]> {
        let len = self.next_byte()?;
        Some(self.take(len as usize))
    }
}

/// A decoded ring buffer operation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RingOp {
    /// Offer the payload.
    Offer(Vec<u8>),
    /// Unchecked poll of `n` bytes.
    Poll(usize),
    /// Checked poll of `n` bytes.
    TryPoll(usize),
    /// Peek at the readable bytes.
    Peek,
}

/// Maps a seed byte to a ring order between 4 (16 bytes) and 12 (4 KiB).
pub fn ring_order_from(byte: u8) -> u32 {
    u32::from(byte % 9) + 4
}

/// Decodes `data` into ring operations.
///
/// Record layout: `[control, len, payload...]` for offers, `[control, n]`
/// for polls and `[control, _]` for peeks.
pub fn decode_ring_ops(data: &[u8]) -> Vec<RingOp> {
    let mut stream = OpStream::new(data);
    let mut ops = Vec::new();

    while let Some(control) = stream.next_byte() {
        let Some(len) = stream.next_byte() else {
            break;
        };

        let op = match control % 4 {
            0 => RingOp::Offer(stream.take(len as usize).to_vec()),
            1 => RingOp::Poll(len as usize),
            2 => RingOp::TryPoll(len as usize),
            _ => RingOp::Peek,
        };

        ops.push(op);
    }

    ops
}

/// A decoded growable buffer operation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BufferOp {
    /// Append the payload.
    Append(Vec<u8>),
    /// Append a formatted number.
    AppendFmt(u32),
    /// Prepend the payload.
    Prepend(Vec<u8>),
    /// Slice with a signed end.
    Slice {
        /// Start offset.
        from: usize,
        /// End offset, negative counting from the end.
        to: isize,
    },
    /// Trim leading whitespace.
    TrimLeft,
    /// Trim trailing whitespace.
    TrimRight,
    /// Trim both ends.
    Trim,
    /// Shrink to fit.
    Compact,
    /// Fill the capacity with a byte.
    Fill(u8),
    /// Zero the capacity.
    Clear,
    /// Search for the payload.
    IndexOf(Vec<u8>),
}

/// Decodes `data` into growable buffer operations.
pub fn decode_buffer_ops(data: &[u8]) -> Vec<BufferOp> {
    let mut stream = OpStream::new(data);
    let mut ops = Vec::new();

    while let Some(control) = stream.next_byte() {
        let op = match control % 11 {
            0 => match stream.take_prefixed() {
                Some(payload) => BufferOp::Append(payload.to_vec()),
                None => break,
            },
            1 => {
                let raw = stream.take(4);
                let mut le = [0u8; 4];
                le[..raw.len()].copy_from_slice(raw);
                BufferOp::AppendFmt(u32::from_le_bytes(le))
            }
            2 => match stream.take_prefixed() {
                Some(payload) => BufferOp::Prepend(payload.to_vec()),
                None => break,
            },
            3 => {
                let (Some(from), Some(to)) = (stream.next_byte(), stream.next_byte()) else {
                    break;
                };
                BufferOp::Slice {
                    from: from as usize,
                    to: isize::from(to as i8),
                }
            }
            4 => BufferOp::TrimLeft,
            5 => BufferOp::TrimRight,
            6 => BufferOp::Trim,
            7 => BufferOp::Compact,
            8 => match stream.next_byte() {
                Some(byte) => BufferOp::Fill(byte),
                None => break,
            },
            9 => BufferOp::Clear,
            _ => match stream.take_prefixed() {
                Some(payload) => BufferOp::IndexOf(payload.to_vec()),
                None => break,
            },
        };

        ops.push(op);
    }

    ops
}
