//! # Ordinal Keys
//!
//! The bounded key domain behind every keyed table.
//!
//! ## Design Philosophy
//!
//! - A key type declares its full set of defined values up front
//! - Distribution stats (bounds, gaps, density) are computed once per key
//!   type and cached process-wide
//! - The cached profile decides the storage strategy for every table of that
//!   key type

mod ordinal;
mod profile;

pub use ordinal::OrdinalKey;
pub use profile::{select_variant, KeyProfile, TableVariant, DENSITY_THRESHOLD, SKIP_THRESHOLD};
