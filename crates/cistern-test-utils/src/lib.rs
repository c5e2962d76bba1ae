// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for cistern crates.
//!
//! - [`OpStream`] decodes fuzz-style byte streams where each control byte
//!   selects an operation and the following bytes carry its parameters.
//! - [`RingOp`] / [`BufferOp`] are the decoded operations.
//! - [`RingModel`] / [`TextModel`] are plain reference models the real
//!   containers are checked against.
//!
//! ## License
//!
//! GPL-3.0-only

mod models;
mod ops;

pub use models::{RingModel, TextModel};
pub use ops::{BufferOp, OpStream, RingOp, decode_buffer_ops, decode_ring_ops, ring_order_from};
