#![deny(missing_docs)]

//! # psgc-core: Foundational Types for the PSGC Generator
//!
//! This crate defines the primitives every other crate in the workspace
//! depends on. It has no internal crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **[`PsgcCode`] is the only carrier of hierarchy.** A code is validated
//!    once at construction (9 ASCII digits). Every ancestor lookup after that
//!    is total: [`ancestor_prefix`] cannot fail on a valid code.
//!
//! 2. **Closed level sets.** [`Level`] has exactly eight variants and
//!    [`SourceLevel`] exactly the seven registry tags. Every consumer matches
//!    exhaustively.
//!
//! 3. **Static island-group table.** [`resolve_island_group`] never defaults;
//!    an unknown region code is a [`ValidationError::UnresolvedIslandGroup`].

pub mod code;
pub mod error;
pub mod island;
pub mod level;
pub mod name;

// Re-export primary types at crate root for ergonomic imports.
pub use code::{ancestor_prefix, CodeDepth, PsgcCode, CODE_WIDTH};
pub use error::ValidationError;
pub use island::{resolve_island_group, IslandGroup};
pub use level::{AncestorField, Collection, Level, SourceLevel};
pub use name::{is_preserved_acronym, title_case, PRESERVED_ACRONYMS};
