//! Stock hash and compare functions for byte keys.
//!
//! Tables accept any [`HashFn`](crate::raw_table::HashFn) and
//! [`CmpFn`](crate::raw_table::CmpFn) pair;
//! these are the defaults the typed facade wires in and the ones most
//! callers want: FNV-1a for short binary keys, djb2 for text, and a plain
//! lexicographic compare.

use core::cmp::Ordering;
use core::hash::Hasher;
use fnv::FnvHasher;

/// 64-bit FNV-1a over the key bytes.
///
/// Fast and well distributed for the short keys hash tables typically see.
/// Empty input hashes to the FNV offset basis.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut h = FnvHasher::default();
    h.write(bytes);
    h.finish()
}

/// djb2 over the key bytes (hash 5381, then `h * 33 + byte`).
pub fn djb2(bytes: &[u8]) -> u64 {
    let mut h: u64 = 5381;
    for &b in bytes {
        h = h.wrapping_mul(33).wrapping_add(u64::from(b));
    }
    h
}

/// Lexicographic byte compare; `Ordering::Equal` iff the slices match
/// exactly, length included.
pub fn bytewise(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}
