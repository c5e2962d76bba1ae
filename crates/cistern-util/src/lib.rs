// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Byte-level helpers shared by the cistern containers.
//!
//! Everything here works on plain slices: scanning for the zero terminator,
//! C-locale whitespace classification, quantum rounding, substring search,
//! pattern fills and wipes that the optimizer is not allowed to drop.

#![cfg_attr(not(test), no_std)]

use zeroize::Zeroize;

/// Stamps every byte of `slice` with `pattern`.
///
/// Used for capacity-wide fills, where the caller passes the storage up to
/// but not including its zero sentinel.
///
/// # Example
///
/// ```
/// use cistern_util::{fill_bytes_with_pattern, zero_terminated_len};
///
/// let mut storage = [0u8; 9];
/// fill_bytes_with_pattern(&mut storage[..8], b'A');
/// assert_eq!(zero_terminated_len(&storage), 8);
/// ```
#[inline]
pub fn fill_bytes_with_pattern(slice: &mut [u8], pattern: u8) {
    slice.fill(pattern);
}

/// Zeroes released or cleared storage.
///
/// Goes through `zeroize`, so the writes stay even when the storage is freed
/// right after.
///
/// # Example
///
/// ```
/// use cistern_util::{is_slice_zeroized, wipe_bytes};
///
/// let mut vacated = *b"old tail";
/// wipe_bytes(&mut vacated);
/// assert!(is_slice_zeroized(&vacated));
/// ```
#[inline]
pub fn wipe_bytes(slice: &mut [u8]) {
    slice.zeroize();
}

/// Returns `true` when no byte of `slice` is set.
///
/// # Example
///
/// ```
/// use cistern_util::is_slice_zeroized;
///
/// assert!(is_slice_zeroized(&[0u8; 10]));
/// assert!(!is_slice_zeroized(b"\0\0x"));
/// ```
#[inline]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    !slice.iter().any(|&b| b != 0)
}

/// Returns the number of bytes before the first zero byte.
///
/// If the slice holds no zero byte the whole slice length is returned.
///
/// # Example
///
/// ```
/// use cistern_util::zero_terminated_len;
///
/// assert_eq!(zero_terminated_len(b"ab\0cd"), 2);
/// assert_eq!(zero_terminated_len(b"abc"), 3);
/// assert_eq!(zero_terminated_len(b""), 0);
/// ```
#[inline]
pub fn zero_terminated_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

/// Returns `true` for the six whitespace bytes of the C locale.
///
/// Differs from [`u8::is_ascii_whitespace`] by also accepting vertical tab
/// (`0x0B`).
#[inline]
pub fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Rounds `n` up to the nearest multiple of `quantum`.
///
/// `quantum` must be a power of two. Returns `None` when the rounded value
/// does not fit in `usize`.
///
/// # Example
///
/// ```
/// use cistern_util::nearest_multiple_of;
///
/// assert_eq!(nearest_multiple_of(1024, 1), Some(1024));
/// assert_eq!(nearest_multiple_of(1024, 1024), Some(1024));
/// assert_eq!(nearest_multiple_of(1024, 1025), Some(2048));
/// assert_eq!(nearest_multiple_of(1024, 0), Some(0));
/// assert_eq!(nearest_multiple_of(1024, usize::MAX), None);
/// ```
#[inline]
pub fn nearest_multiple_of(quantum: usize, n: usize) -> Option<usize> {
    debug_assert!(quantum.is_power_of_two());

    n.checked_add(quantum - 1).map(|v| v & !(quantum - 1))
}

/// Finds the first occurrence of `needle` inside `haystack`.
///
/// An empty needle matches at offset 0.
///
/// # Example
///
/// ```
/// use cistern_util::find_subslice;
///
/// assert_eq!(find_subslice(b"hello world", b"world"), Some(6));
/// assert_eq!(find_subslice(b"hello", b"xyz"), None);
/// assert_eq!(find_subslice(b"hello", b""), Some(0));
/// ```
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }

    if needle.len() > haystack.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
