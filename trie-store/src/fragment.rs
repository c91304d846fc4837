//! Helpers for comparing and cutting path fragments.

use std::cmp::min;

/// Returns the length in bytes of the longest common prefix of `a` and `b`.
///
/// The result is bounded by the shorter of the two and always lands on a character boundary of
/// both strings, so it can be used directly to slice either one.
pub fn common_prefix(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let len = min(a.len(), b.len());
    let mut idx = 0;
    while idx < len {
        if a[idx] != b[idx] {
            break;
        }
        idx += 1;
    }
    // Both strings agree on bytes [0, idx), so a boundary in one is a boundary in the other.
    while idx > 0 && !is_char_boundary(a, idx) {
        idx -= 1;
    }
    idx
}

/// Whether `fragment` is `prefix` followed by exactly one `delimiter`.
pub(crate) fn is_delimited_extension(fragment: &str, matched: usize, delimiter: char) -> bool {
    matched > 0
        && fragment.len() == matched + delimiter.len_utf8()
        && fragment.ends_with(delimiter)
}

fn is_char_boundary(bytes: &[u8], idx: usize) -> bool {
    // Same test as str::is_char_boundary: continuation bytes look like 0b10xx_xxxx.
    idx >= bytes.len() || (bytes[idx] as i8) >= -0x40
}
