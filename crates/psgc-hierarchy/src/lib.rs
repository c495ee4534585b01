//! # psgc-hierarchy: The Hierarchy Resolver
//!
//! Turns the registry's flat record list into a fully cross-referenced
//! hierarchy. Source records carry no parent pointers; every ancestor is
//! derived from code-prefix arithmetic plus membership in the code sets of
//! levels resolved earlier.
//!
//! - [`record`]: the flat input record ([`RawRecord`]).
//! - [`unit`]: the published unit types, one per level.
//! - [`overrides`]: registry exception tables.
//! - [`normalize`]: one normalization rule per level.
//! - [`index`]: code sets and per-ancestor grouping indices.
//! - [`builder`]: dependency-ordered orchestration ([`HierarchyBuilder`]).
//!
//! All data-integrity faults are detected here, before any artifact is
//! planned.

pub mod builder;
pub mod error;
pub mod index;
pub mod normalize;
pub mod overrides;
pub mod record;
pub mod unit;

pub use builder::{BuildReport, Hierarchy, HierarchyBuilder, MalformedCodePolicy};
pub use error::{HierarchyError, HierarchyResult};
pub use index::{CodeSet, GroupMap, Indexed};
pub use record::RawRecord;
pub use unit::{
    Barangay, City, CityMunicipality, District, GeographicUnit, IslandGroupUnit, Locality,
    Municipality, Province, Region, SubMunicipality,
};
