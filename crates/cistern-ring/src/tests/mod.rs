// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod behaviour;
mod region;
mod ring;

use crate::region::page_size;

/// Smallest order whose capacity can be mapped twice on this system.
pub(crate) fn mapped_order() -> u32 {
    page_size().trailing_zeros()
}
