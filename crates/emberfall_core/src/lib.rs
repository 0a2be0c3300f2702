//! # EMBERFALL Collection Core
//!
//! Keyed collections shared by the client's stat, slot, and session systems:
//!
//! - [`KeyedTable`]: maps a bounded ordinal key type to values, picking dense
//!   array storage or a hash map per key type from cached distribution stats
//! - [`FlagTable`]: the bit-packed sibling for boolean payloads
//! - [`CyclingSlots`]: hands out integer keys from a bounded range, deferring
//!   reuse of freed keys for as long as possible
//!
//! ## Architecture Rules
//!
//! 1. **Storage strategy is decided once per key type** - the distribution
//!    profile is computed on first use and shared process-wide
//! 2. **O(1) access** - dense tables index by shifted ordinal, sparse tables
//!    hash the ordinal
//! 3. **No I/O, no blocking** - every operation completes on the calling
//!    thread
//!
//! ## Example
//!
//! ```rust,ignore
//! use emberfall_core::{KeyedTable, ordinal_key};
//!
//! ordinal_key! {
//!     pub enum StatKind {
//!         Health = 0,
//!         Mana = 1,
//!         Attack = 2,
//!     }
//! }
//!
//! let mut stats: KeyedTable<StatKind, u32> = KeyedTable::new();
//! stats.set(StatKind::Health, 100)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bits;
pub mod error;
pub mod keys;
pub mod slots;
pub mod table;

pub use bits::BitArray;
pub use error::{SlotsError, SlotsResult, TableError, TableResult};
pub use keys::{
    select_variant, KeyProfile, OrdinalKey, TableVariant, DENSITY_THRESHOLD, SKIP_THRESHOLD,
};
pub use slots::{CyclingSlots, SlotIndex};
pub use table::{FlagTable, KeyedTable};
