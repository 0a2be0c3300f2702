//! # Flag Table
//!
//! The boolean sibling of [`KeyedTable`](crate::table::KeyedTable): one bit
//! per ordinal instead of a full element slot.

use std::marker::PhantomData;

use crate::bits::BitArray;
use crate::error::{TableError, TableResult};
use crate::keys::{KeyProfile, OrdinalKey};

/// A table mapping every defined value of `K` to a flag.
///
/// Always bit-packed over the full ordinal range, whatever generic variant
/// the key type's profile selected: one bit per in-range ordinal is at least
/// as dense as any map would be. Validity checks go through the profile's
/// range bounds and validity mask, exactly like a dense [`KeyedTable`].
///
/// [`KeyedTable`]: crate::table::KeyedTable
#[derive(Clone, Debug)]
pub struct FlagTable<K: OrdinalKey> {
    /// One bit per ordinal in the key range. Bits at invalid indices stay
    /// zero, so popcounts only see defined keys.
    bits: BitArray,
    /// Shared per-key-type metadata.
    profile: &'static KeyProfile,
    /// Marker for the key type.
    _key: PhantomData<K>,
}

impl<K: OrdinalKey> FlagTable<K> {
    /// Creates a table with every defined key cleared.
    #[must_use]
    pub fn new() -> Self {
        let profile = KeyProfile::of::<K>();
        Self {
            bits: BitArray::with_len(profile.value_range()),
            profile,
            _key: PhantomData,
        }
    }

    /// Returns the flag for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidKey`] if the key's ordinal is not a defined value.
    pub fn get(&self, key: K) -> TableResult<bool> {
        let ordinal = key.to_ordinal();
        self.profile
            .index_of(ordinal)
            .map(|index| self.bits.get(index))
            .ok_or(TableError::InvalidKey { ordinal })
    }

    /// Writes the flag for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidKey`] if the key's ordinal is not a defined
    /// value; the table is left untouched.
    pub fn set(&mut self, key: K, value: bool) -> TableResult<()> {
        let ordinal = key.to_ordinal();
        let index = self
            .profile
            .index_of(ordinal)
            .ok_or(TableError::InvalidKey { ordinal })?;
        self.bits.set(index, value);
        Ok(())
    }

    /// Returns the flag for `key`, or `None` instead of failing.
    #[must_use]
    pub fn try_get(&self, key: K) -> Option<bool> {
        self.get(key).ok()
    }

    /// Writes the flag for `key`; returns whether the write happened.
    pub fn try_set(&mut self, key: K, value: bool) -> bool {
        self.set(key, value).is_ok()
    }

    /// Clears every flag.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Assigns `value` to every defined key.
    pub fn set_all(&mut self, value: bool) {
        match self.profile.valid_mask() {
            // No gaps: every in-range bit is a defined key.
            None => self.bits.fill(value),
            Some(mask) => {
                for index in 0..self.bits.len() {
                    if mask.get(index) {
                        self.bits.set(index, value);
                    }
                }
            }
        }
    }

    /// Returns `true` if `key`'s ordinal is one of the defined values.
    #[must_use]
    pub fn is_valid_key(&self, key: K) -> bool {
        self.profile.is_defined(key.to_ordinal())
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

    /// Number of defined keys whose flag is currently set.
    #[must_use]
    pub fn count_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterates over `(key, flag)` for exactly the defined keys, in ordinal
    /// order, each once.
    pub fn iter(&self) -> impl Iterator<Item = (K, bool)> + '_ {
        (0..self.bits.len()).filter_map(move |index| {
            if let Some(mask) = self.profile.valid_mask() {
                if !mask.get(index) {
                    return None;
                }
            }
            let key = K::from_ordinal(self.profile.ordinal_at(index))?;
            Some((key, self.bits.get(index)))
        })
    }
}

impl<K: OrdinalKey> Default for FlagTable<K> {
    fn default() -> Self {
        Self::new()
    }
}
