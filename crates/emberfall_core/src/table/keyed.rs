//! # Keyed Table
//!
//! A map from a bounded ordinal key type to values, backed by either a dense
//! shifted-ordinal array or an ordinal-keyed hash map - whichever the key
//! type's cached profile selected.

use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::error::{TableError, TableResult};
use crate::keys::{KeyProfile, OrdinalKey, TableVariant};

/// Owned backing store of a [`KeyedTable`].
#[derive(Clone, Debug)]
enum Backing<V> {
    /// One slot per ordinal in the key range, indexed by shifted ordinal.
    Dense(Box<[V]>),
    /// One entry per defined ordinal.
    Sparse(FxHashMap<i32, V>),
}

/// A table mapping every defined value of `K` to a `V`.
///
/// Construction inspects the cached distribution profile of `K` (computing
/// it on first use) and picks the backing store:
///
/// - **Dense**: a linear array of `value_range` slots indexed by
///   `ordinal - min_ordinal`, with gaps masked invalid
/// - **Sparse**: a hash map pre-populated with every defined ordinal
///
/// Every defined key starts at `V::default()`. Cloning a table deep-copies
/// the backing store; the profile metadata stays shared (it is immutable).
///
/// # Thread Safety
///
/// A table is a plain value: mutate it from one thread at a time. Only the
/// profile cache behind construction is safe to race on.
///
/// # Example
///
/// ```rust,ignore
/// let mut stats: KeyedTable<StatKind, u32> = KeyedTable::new();
/// stats.set(StatKind::Attack, 40)?;
/// assert_eq!(*stats.get(StatKind::Attack)?, 40);
/// ```
#[derive(Clone, Debug)]
pub struct KeyedTable<K: OrdinalKey, V> {
    /// Owned storage, shape chosen by the profile.
    backing: Backing<V>,
    /// Shared per-key-type metadata.
    profile: &'static KeyProfile,
    /// Marker for the key type.
    _key: PhantomData<K>,
}

impl<K: OrdinalKey, V: Clone + Default> KeyedTable<K, V> {
    /// Creates a table with every defined key set to `V::default()`.
    #[must_use]
    pub fn new() -> Self {
        let profile = KeyProfile::of::<K>();
        let backing = match profile.variant() {
            TableVariant::Dense => {
                Backing::Dense(vec![V::default(); profile.value_range()].into_boxed_slice())
            }
            TableVariant::Sparse => {
                let mut map = FxHashMap::default();
                map.reserve(profile.unique_count());
                for key in K::all_values() {
                    map.insert(key.to_ordinal(), V::default());
                }
                Backing::Sparse(map)
            }
        };

        Self {
            backing,
            profile,
            _key: PhantomData,
        }
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidKey`] if the key's ordinal is not a defined value.
    pub fn get(&self, key: K) -> TableResult<&V> {
        let ordinal = key.to_ordinal();
        let slot = match &self.backing {
            Backing::Dense(slots) => self
                .profile
                .index_of(ordinal)
                .and_then(|index| slots.get(index)),
            Backing::Sparse(map) => map.get(&ordinal),
        };
        slot.ok_or(TableError::InvalidKey { ordinal })
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidKey`] if the key's ordinal is not a defined value.
    pub fn get_mut(&mut self, key: K) -> TableResult<&mut V> {
        let ordinal = key.to_ordinal();
        let profile = self.profile;
        let slot = match &mut self.backing {
            Backing::Dense(slots) => profile
                .index_of(ordinal)
                .and_then(move |index| slots.get_mut(index)),
            Backing::Sparse(map) => map.get_mut(&ordinal),
        };
        slot.ok_or(TableError::InvalidKey { ordinal })
    }

    /// Writes the value for `key` in place.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidKey`] if the key's ordinal is not a defined
    /// value; the table is left untouched.
    pub fn set(&mut self, key: K, value: V) -> TableResult<()> {
        *self.get_mut(key)? = value;
        Ok(())
    }

    /// Returns the value for `key`, or `None` instead of failing.
    #[must_use]
    pub fn try_get(&self, key: K) -> Option<&V> {
        self.get(key).ok()
    }

    /// Writes the value for `key`; returns whether the write happened.
    pub fn try_set(&mut self, key: K, value: V) -> bool {
        self.set(key, value).is_ok()
    }

    /// Resets every defined key to `V::default()`.
    ///
    /// Backing storage is kept, not shrunk.
    pub fn clear(&mut self) {
        match &mut self.backing {
            Backing::Dense(slots) => {
                for slot in slots.iter_mut() {
                    *slot = V::default();
                }
            }
            Backing::Sparse(map) => {
                for slot in map.values_mut() {
                    *slot = V::default();
                }
            }
        }
    }

    /// Assigns a clone of `value` to every defined key.
    pub fn set_all(&mut self, value: V) {
        match &mut self.backing {
            Backing::Dense(slots) => {
                for slot in slots.iter_mut() {
                    *slot = value.clone();
                }
            }
            Backing::Sparse(map) => {
                for slot in map.values_mut() {
                    *slot = value.clone();
                }
            }
        }
    }

    /// Returns `true` if `key`'s ordinal is one of the defined values.
    #[must_use]
    pub fn is_valid_key(&self, key: K) -> bool {
        let ordinal = key.to_ordinal();
        match &self.backing {
            Backing::Dense(_) => self.profile.is_defined(ordinal),
            Backing::Sparse(map) => map.contains_key(&ordinal),
        }
    }

    /// Number of defined keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.profile.unique_count()
    }

    /// Returns `true` if the key type defines no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage strategy this table was built with.
    #[inline]
    #[must_use]
    pub fn variant(&self) -> TableVariant {
        self.profile.variant()
    }

    /// Iterates over `(key, value)` for exactly the defined keys, each once.
    ///
    /// Dense tables skip masked-invalid indices; sparse tables walk their
    /// entries directly. Entry order is ordinal order for dense tables and
    /// unspecified for sparse ones.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let inner = match &self.backing {
            Backing::Dense(slots) => IterInner::Dense(slots.iter().enumerate()),
            Backing::Sparse(map) => IterInner::Sparse(map.iter()),
        };
        Iter {
            inner,
            profile: self.profile,
            _key: PhantomData,
        }
    }
}

impl<K: OrdinalKey, V: Clone + Default> Default for KeyedTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the defined `(key, value)` entries of a [`KeyedTable`].
pub struct Iter<'a, K: OrdinalKey, V> {
    /// Backing-specific cursor.
    inner: IterInner<'a, V>,
    /// Shared per-key-type metadata.
    profile: &'static KeyProfile,
    /// Marker for the key type.
    _key: PhantomData<K>,
}

enum IterInner<'a, V> {
    Dense(std::iter::Enumerate<std::slice::Iter<'a, V>>),
    Sparse(std::collections::hash_map::Iter<'a, i32, V>),
}

impl<'a, K: OrdinalKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Dense(slots) => {
                for (index, value) in slots.by_ref() {
                    if let Some(mask) = self.profile.valid_mask() {
                        if !mask.get(index) {
                            continue;
                        }
                    }
                    if let Some(key) = K::from_ordinal(self.profile.ordinal_at(index)) {
                        return Some((key, value));
                    }
                }
                None
            }
            IterInner::Sparse(entries) => {
                for (&ordinal, value) in entries.by_ref() {
                    if let Some(key) = K::from_ordinal(ordinal) {
                        return Some((key, value));
                    }
                }
                None
            }
        }
    }
}
