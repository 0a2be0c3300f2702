//! # Cycling Slot Allocator
//!
//! Hands out keys by walking a persistent wrapping cursor forward, so a
//! freed key is only reconsidered after every other key in the range.

use rustc_hash::FxHashMap;

use crate::error::{SlotsError, SlotsResult};
use crate::slots::SlotIndex;

/// A bounded collection that allocates its own keys.
///
/// Unlike a free-list allocator, which hands back the most recently freed
/// slot first, the cursor always continues forward from wherever it last
/// stopped and wraps at the end of the range. A just-freed key is therefore
/// the *last* candidate revisited - consumers that treat key reuse as
/// meaningful (wire protocols, stale handle detection) get the longest
/// possible grace period.
///
/// # Thread Safety
///
/// Not thread-safe. Confine an allocator to one owner (one per connection
/// handler is the typical shape).
///
/// # Example
///
/// ```rust,ignore
/// let mut sessions: CyclingSlots<u8, Session> = CyclingSlots::new();
/// let key = sessions.add(session)?;
/// // ... later
/// sessions.remove(key);
/// ```
#[derive(Clone, Debug)]
pub struct CyclingSlots<I: SlotIndex, V> {
    /// Occupied slots. Absence from the map is what "free" means.
    entries: FxHashMap<I, V>,
    /// Rolling cursor; persists across allocations, never resets.
    cursor: I,
}

impl<I: SlotIndex, V> CyclingSlots<I, V> {
    /// Creates an empty allocator over the full range of `I`.
    ///
    /// The cursor starts at the end of the range, so the first allocation
    /// lands on [`SlotIndex::FIRST`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            cursor: I::LAST,
        }
    }

    /// Allocates the next free key and binds `value` to it.
    ///
    /// This is the atomic path: the key is reserved and assigned in one
    /// call. Prefer it over [`CyclingSlots::next_free_key`].
    ///
    /// # Errors
    ///
    /// [`SlotsError::Exhausted`] when every slot is occupied. The cursor is
    /// back at its starting position afterwards, and the allocator stays
    /// usable once any slot is freed.
    pub fn add(&mut self, value: V) -> SlotsResult<I> {
        let key = self.next_free_key()?;
        self.entries.insert(key, value);
        Ok(key)
    }

    /// Advances the cursor to the next free key and returns it **without
    /// reserving it**.
    ///
    /// The returned key stays free until the caller binds it with
    /// [`CyclingSlots::insert`]; interleaving other allocations in between
    /// can hand the same key out twice. [`CyclingSlots::add`] is the safe
    /// path.
    ///
    /// # Errors
    ///
    /// [`SlotsError::Exhausted`] after a full cycle finds no free slot.
    pub fn next_free_key(&mut self) -> SlotsResult<I> {
        let start = self.cursor;
        loop {
            self.cursor = self.cursor.successor();
            if !self.entries.contains_key(&self.cursor) {
                return Ok(self.cursor);
            }
            if self.cursor == start {
                return Err(SlotsError::Exhausted {
                    capacity: I::span(),
                });
            }
        }
    }

    /// Returns the value bound to `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: I) -> Option<&V> {
        self.entries.get(&key)
    }

    /// Returns a mutable reference to the value bound to `key`.
    #[inline]
    pub fn get_mut(&mut self, key: I) -> Option<&mut V> {
        self.entries.get_mut(&key)
    }

    /// Binds `value` to `key` directly, returning the displaced value.
    pub fn insert(&mut self, key: I, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Frees `key`, returning its value.
    ///
    /// The key becomes eligible for reuse only after the cursor has wrapped
    /// past every other free candidate.
    pub fn remove(&mut self, key: I) -> Option<V> {
        self.entries.remove(&key)
    }

    /// Returns `true` if `key` is currently bound.
    #[inline]
    #[must_use]
    pub fn is_set(&self, key: I) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of occupied slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of slots in the index range.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        I::span()
    }

    /// Iterates over the currently occupied keys (unspecified order).
    pub fn keys(&self) -> impl Iterator<Item = I> + '_ {
        self.entries.keys().copied()
    }

    /// Iterates over the currently bound values (unspecified order).
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Iterates over `(key, value)` for the occupied slots (unspecified
    /// order).
    pub fn iter(&self) -> impl Iterator<Item = (I, &V)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl<I: SlotIndex, V> Default for CyclingSlots<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_full_range_coverage_before_any_repeat() {
        let mut slots: CyclingSlots<u8, u32> = CyclingSlots::new();
        let mut seen = HashSet::new();
        for n in 0..256u32 {
            let key = slots.add(n).unwrap();
            assert!(seen.insert(key), "key {key} issued twice");
        }
        assert_eq!(slots.len(), 256);
        assert_eq!(seen.len(), 256);
    }

    #[test]
    fn test_first_allocation_is_range_start() {
        let mut slots: CyclingSlots<u8, ()> = CyclingSlots::new();
        assert_eq!(slots.add(()).unwrap(), 0);
        assert_eq!(slots.add(()).unwrap(), 1);

        let mut signed: CyclingSlots<i8, ()> = CyclingSlots::new();
        assert_eq!(signed.add(()).unwrap(), i8::MIN);
    }

    #[test]
    fn test_freed_key_is_reused_last() {
        let mut slots: CyclingSlots<u8, u32> = CyclingSlots::new();

        // Occupy 0..10, then free the very first key issued.
        let keys: Vec<u8> = (0..10).map(|n| slots.add(n).unwrap()).collect();
        let first = keys[0];
        assert_eq!(slots.remove(first), Some(0));

        // The cursor keeps walking forward through the untouched remainder
        // of the range; the freed key only comes back after a full wrap.
        for n in 10..=255u32 {
            let key = slots.add(n).unwrap();
            assert_ne!(key, first, "freed key reused before a full cycle");
        }
        assert_eq!(slots.add(999).unwrap(), first);
    }

    #[test]
    fn test_exhausted_when_full_and_recoverable() {
        let mut slots: CyclingSlots<u8, u32> = CyclingSlots::new();
        for n in 0..256u32 {
            slots.add(n).unwrap();
        }

        assert_eq!(
            slots.next_free_key(),
            Err(SlotsError::Exhausted { capacity: 256 })
        );
        assert_eq!(slots.add(0), Err(SlotsError::Exhausted { capacity: 256 }));

        // Freeing one slot anywhere makes the allocator usable again.
        assert!(slots.remove(17).is_some());
        assert_eq!(slots.add(1000).unwrap(), 17);
    }

    #[test]
    fn test_exhausted_leaves_cursor_in_place() {
        let mut slots: CyclingSlots<u8, u32> = CyclingSlots::new();
        for n in 0..256u32 {
            slots.add(n).unwrap();
        }
        // A failed probe wraps the cursor back to its origin; the next
        // successful allocation continues from there.
        assert!(slots.next_free_key().is_err());
        assert!(slots.remove(0).is_some());
        assert_eq!(slots.add(0).unwrap(), 0);
    }

    #[test]
    fn test_next_free_key_does_not_reserve() {
        let mut slots: CyclingSlots<u8, u32> = CyclingSlots::new();
        let key = slots.next_free_key().unwrap();
        assert!(!slots.is_set(key));

        // Unbound, so a later probe can hand the same slot out again after
        // a wrap; binding it is the caller's job.
        assert_eq!(slots.insert(key, 5), None);
        assert!(slots.is_set(key));
        assert_eq!(slots.get(key), Some(&5));
    }

    #[test]
    fn test_consecutive_probes_advance() {
        let mut slots: CyclingSlots<u8, u32> = CyclingSlots::new();
        let a = slots.next_free_key().unwrap();
        let b = slots.next_free_key().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_and_accessors() {
        let mut slots: CyclingSlots<u16, String> = CyclingSlots::new();
        let key = slots.add("session".to_string()).unwrap();

        assert_eq!(slots.get(key).map(String::as_str), Some("session"));
        slots.get_mut(key).unwrap().push('!');
        assert_eq!(slots.get(key).map(String::as_str), Some("session!"));

        assert_eq!(slots.remove(key), Some("session!".to_string()));
        assert_eq!(slots.remove(key), None);
        assert!(!slots.is_set(key));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_iteration_over_occupied_slots() {
        let mut slots: CyclingSlots<i16, u32> = CyclingSlots::new();
        let k1 = slots.add(10).unwrap();
        let k2 = slots.add(20).unwrap();

        let mut keys: Vec<i16> = slots.keys().collect();
        keys.sort_unstable();
        let mut expected = vec![k1, k2];
        expected.sort_unstable();
        assert_eq!(keys, expected);

        let mut values: Vec<u32> = slots.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![10, 20]);

        assert_eq!(slots.iter().count(), 2);
    }

    #[test]
    fn test_signed_width_walks_negative_range() {
        let mut slots: CyclingSlots<i8, u32> = CyclingSlots::new();
        let mut seen = HashSet::new();
        for n in 0..256u32 {
            assert!(seen.insert(slots.add(n).unwrap()));
        }
        assert!(seen.contains(&i8::MIN));
        assert!(seen.contains(&-1));
        assert!(seen.contains(&i8::MAX));
        assert!(slots.add(0).is_err());
    }

    #[test]
    fn test_native_width_starts_inside_clamped_bounds() {
        let mut slots: CyclingSlots<usize, ()> = CyclingSlots::new();
        assert_eq!(slots.add(()).unwrap(), 1);
        assert_eq!(slots.capacity(), usize::MAX - 1);
    }
}
