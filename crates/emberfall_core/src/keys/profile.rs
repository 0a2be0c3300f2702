//! # Key Distribution Profile
//!
//! Per-key-type distribution stats, the storage-strategy decision derived
//! from them, and the process-wide cache holding both.
//!
//! The profile for a key type is computed exactly once, on first use, behind
//! a write lock; after publication it is immutable and shared by every table
//! instance of that key type.

use std::any::TypeId;
use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::bits::BitArray;
use crate::keys::OrdinalKey;

/// Maximum number of skipped ordinals a key type may have and still always
/// get dense storage.
pub const SKIP_THRESHOLD: usize = 10;

/// Minimum defined-to-range ratio for dense storage once the skip threshold
/// is exceeded.
pub const DENSITY_THRESHOLD: f64 = 0.30;

/// Storage strategy selected for a key type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableVariant {
    /// Linear array indexed by `ordinal - min_ordinal`.
    Dense,
    /// Hash map keyed by ordinal, holding only defined ordinals.
    Sparse,
}

/// Selects the storage strategy for a key distribution.
///
/// The skip count early-out is checked before the density ratio: a type with
/// few gaps always gets dense storage no matter how wide its range is.
#[must_use]
pub fn select_variant(unique_count: usize, value_range: usize) -> TableVariant {
    let skipped_count = value_range.saturating_sub(unique_count);
    if skipped_count <= SKIP_THRESHOLD {
        return TableVariant::Dense;
    }

    #[allow(clippy::cast_precision_loss)]
    let density = unique_count as f64 / value_range as f64;
    if density < DENSITY_THRESHOLD {
        TableVariant::Sparse
    } else {
        TableVariant::Dense
    }
}

/// Cached distribution metadata for one key type.
///
/// Holds the ordinal bounds, gap statistics, the chosen [`TableVariant`],
/// and - when the range has gaps - a validity mask marking which dense
/// indices correspond to real defined keys.
#[derive(Debug)]
pub struct KeyProfile {
    /// Smallest defined ordinal (0 when no values are defined).
    min_ordinal: i32,
    /// Largest defined ordinal (-1 when no values are defined).
    max_ordinal: i32,
    /// Count of distinct defined ordinals.
    unique_count: usize,
    /// `max_ordinal - min_ordinal + 1`.
    value_range: usize,
    /// Ordinals inside the range that are not defined values.
    skipped_count: usize,
    /// Storage strategy chosen for this distribution.
    variant: TableVariant,
    /// Marks which dense indices are defined keys; `None` when the range has
    /// no gaps (every index valid).
    valid_mask: Option<BitArray>,
}

type ProfileRegistry = RwLock<FxHashMap<TypeId, &'static KeyProfile>>;

static REGISTRY: OnceLock<ProfileRegistry> = OnceLock::new();

impl KeyProfile {
    /// Returns the cached profile for `K`, computing it on first use.
    ///
    /// The computation runs under the registry write lock, so racing first
    /// uses of the same key type still produce exactly one profile.
    pub fn of<K: OrdinalKey>() -> &'static Self {
        let registry = REGISTRY.get_or_init(|| RwLock::new(FxHashMap::default()));
        let type_id = TypeId::of::<K>();

        if let Some(profile) = registry.read().get(&type_id).copied() {
            return profile;
        }

        *registry.write().entry(type_id).or_insert_with(|| {
            let profile = Self::compute::<K>();
            tracing::debug!(
                "key profile computed: unique={} range={} skipped={} variant={:?}",
                profile.unique_count,
                profile.value_range,
                profile.skipped_count,
                profile.variant
            );
            Box::leak(Box::new(profile))
        })
    }

    fn compute<K: OrdinalKey>() -> Self {
        let mut ordinals: Vec<i32> = K::all_values().iter().map(|key| key.to_ordinal()).collect();
        ordinals.sort_unstable();
        ordinals.dedup();

        if ordinals.is_empty() {
            return Self {
                min_ordinal: 0,
                max_ordinal: -1,
                unique_count: 0,
                value_range: 0,
                skipped_count: 0,
                variant: TableVariant::Dense,
                valid_mask: None,
            };
        }

        let min_ordinal = ordinals[0];
        let max_ordinal = ordinals[ordinals.len() - 1];
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value_range = (i64::from(max_ordinal) - i64::from(min_ordinal) + 1) as usize;
        let unique_count = ordinals.len();
        let skipped_count = value_range - unique_count;
        let variant = select_variant(unique_count, value_range);

        let valid_mask = if skipped_count > 0 {
            let mut mask = BitArray::with_len(value_range);
            for &ordinal in &ordinals {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let index = (i64::from(ordinal) - i64::from(min_ordinal)) as usize;
                mask.set(index, true);
            }
            Some(mask)
        } else {
            None
        };

        Self {
            min_ordinal,
            max_ordinal,
            unique_count,
            value_range,
            skipped_count,
            variant,
            valid_mask,
        }
    }

    /// Smallest defined ordinal.
    #[inline]
    #[must_use]
    pub const fn min_ordinal(&self) -> i32 {
        self.min_ordinal
    }

    /// Largest defined ordinal.
    #[inline]
    #[must_use]
    pub const fn max_ordinal(&self) -> i32 {
        self.max_ordinal
    }

    /// Count of distinct defined ordinals.
    #[inline]
    #[must_use]
    pub const fn unique_count(&self) -> usize {
        self.unique_count
    }

    /// Width of the inclusive ordinal range.
    #[inline]
    #[must_use]
    pub const fn value_range(&self) -> usize {
        self.value_range
    }

    /// Ordinals inside the range that are not defined values.
    #[inline]
    #[must_use]
    pub const fn skipped_count(&self) -> usize {
        self.skipped_count
    }

    /// Storage strategy chosen for this key type.
    #[inline]
    #[must_use]
    pub const fn variant(&self) -> TableVariant {
        self.variant
    }

    /// Validity mask over dense indices, if the range has gaps.
    #[inline]
    #[must_use]
    pub const fn valid_mask(&self) -> Option<&BitArray> {
        self.valid_mask.as_ref()
    }

    /// Dense index for `ordinal`, or `None` if the ordinal is outside the
    /// defined set.
    #[must_use]
    pub fn index_of(&self, ordinal: i32) -> Option<usize> {
        if ordinal < self.min_ordinal || ordinal > self.max_ordinal {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (i64::from(ordinal) - i64::from(self.min_ordinal)) as usize;
        match &self.valid_mask {
            Some(mask) if !mask.get(index) => None,
            _ => Some(index),
        }
    }

    /// Ordinal at a dense index (the inverse of [`KeyProfile::index_of`],
    /// without the validity check).
    #[inline]
    #[must_use]
    pub fn ordinal_at(&self, index: usize) -> i32 {
        #[allow(clippy::cast_possible_truncation)]
        let ordinal = i64::from(self.min_ordinal) + index as i64;
        ordinal as i32
    }

    /// Returns `true` if `ordinal` is one of the key type's defined values.
    #[inline]
    #[must_use]
    pub fn is_defined(&self, ordinal: i32) -> bool {
        self.index_of(ordinal).is_some()
    }
}
