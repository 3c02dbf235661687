//! TableKey: typed keys that expose their byte encoding to the raw engine.

use crate::raw_table::KeyLayout;
use core::mem::size_of;

/// A type usable as a key in the typed containers.
///
/// `with_bytes` hands the key's encoding to a closure instead of returning a
/// slice, so integer keys can encode into a stack buffer without allocating.
/// The encoding must be deterministic: equal keys produce equal bytes.
pub trait TableKey {
    /// Layout every key of this type produces. `Fixed(n)` encodings are
    /// always exactly `n` bytes.
    const LAYOUT: KeyLayout;

    fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R;
}

macro_rules! impl_table_key_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl TableKey for $t {
                const LAYOUT: KeyLayout = KeyLayout::Fixed(size_of::<$t>());

                fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
                    f(&self.to_ne_bytes())
                }
            }
        )*
    };
}

impl_table_key_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl TableKey for str {
    const LAYOUT: KeyLayout = KeyLayout::Variable;

    fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.as_bytes())
    }
}

impl TableKey for String {
    const LAYOUT: KeyLayout = KeyLayout::Variable;

    fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.as_bytes())
    }
}

impl TableKey for [u8] {
    const LAYOUT: KeyLayout = KeyLayout::Variable;

    fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl TableKey for Vec<u8> {
    const LAYOUT: KeyLayout = KeyLayout::Variable;

    fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl<const N: usize> TableKey for [u8; N] {
    const LAYOUT: KeyLayout = KeyLayout::Fixed(N);

    fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl<K: TableKey + ?Sized> TableKey for &K {
    const LAYOUT: KeyLayout = K::LAYOUT;

    fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        (**self).with_bytes(f)
    }
}
