//! # Keyed Tables
//!
//! Tables keyed by a bounded ordinal key type.
//!
//! ## Design Philosophy
//!
//! - The storage strategy is not the caller's concern: the cached key profile
//!   picks dense or sparse backing per key type
//! - Dense tables index by shifted ordinal; sparse tables hash the ordinal
//! - Boolean payloads get a bit per slot instead of a full element

mod flags;
mod keyed;

pub use flags::FlagTable;
pub use keyed::{Iter, KeyedTable};
