//! bytetable: byte-keyed collections built around a chaining hash table
//! with caller-supplied hash and comparison functions, plus a growable
//! array and the set and stack adapters layered on them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the hash engine generic over raw key bytes so one
//!   implementation of chaining, growth, and ownership serves every
//!   typed container on top.
//! - Layers:
//!   - RawTable<V>: chained hash table addressed by `&[u8]` keys; owns
//!     a copy of each key's bytes; caller-supplied `fn` pointers for
//!     hashing and comparison; doubles and rehashes past 3/4 load.
//!   - TableKey + Map<K, V>: typed facade that encodes keys to bytes at
//!     the call boundary and forwards everything to the engine.
//!   - Set<T>: adapter storing each item under its own encoding, so the
//!     item serves as key and value at once.
//!   - Array<T> and Stack<T>: contiguous buffer with an explicit
//!     capacity contract, and the LIFO adapter over it.
//!
//! Constraints
//! - Single-threaded: no interior mutability, no locking; instances
//!   have one owner and `Drop` releases storage exactly once.
//! - Every fallible operation returns `Result<_, Error>`; failures are
//!   values, never panics, and a failed call leaves the container in
//!   its prior consistent state (growth included).
//! - Allocation failure surfaces as `Error::AllocFailed` from the
//!   bucket-array and item-buffer reservation sites.
//! - Duplicate keys are rejected on insert; an existing entry is never
//!   overwritten, and the duplicate check runs before any growth.
//! - Hash and comparison functions are treated as black boxes; the
//!   engine requires determinism over the key bytes and nothing else.
//!
//! Why this split?
//! - Localize invariants: chain placement, load-factor growth, and
//!   key-byte ownership live in one module with one set of tests.
//! - The typed layers add no policy of their own; Map and Set inherit
//!   duplicate handling, growth, and error kinds unchanged.
//! - The array tracks its contract capacity itself instead of exposing
//!   allocator rounding, so doubling and resize behavior is exact.
//!
//! Key layout and ownership
//! - `KeyLayout::Fixed(n)` tables reject keys of any other length with
//!   `InvalidArgument`; `Variable` tables accept arbitrary byte slices,
//!   the empty slice and interior zero bytes included.
//! - The table owns its key-byte copies outright. Values are owned by
//!   the container and come back out by value on `remove`/`pop`, are
//!   handed to `clear_with` callbacks, or drop with the container.
//! - Rehashing uses each entry's own stored bytes, so growth cannot
//!   lose or duplicate entries even in mixed-length variable tables.
//!
//! Notes and non-goals
//! - No iteration-order guarantees anywhere; removal may reorder a
//!   bucket's chain.
//! - No thread safety and no `Send`/`Sync` promises beyond what the
//!   contained types derive structurally.
//! - Capacity never shrinks; `clear` keeps storage for reuse.
//! - The stock `fnv1a`/`djb2`/`bytewise` functions are defaults for the
//!   typed layers, not requirements of the engine.

mod array;
mod error;
pub mod hash;
mod key;
mod map;
pub mod raw_table;
mod raw_table_proptest;
pub mod set;
mod stack;

// Public surface
pub use array::Array;
pub use error::{Error, Result};
pub use key::TableKey;
pub use map::Map;
pub use raw_table::{CmpFn, HashFn, KeyLayout, RawTable, RawTableBuilder};
pub use set::Set;
pub use stack::Stack;
