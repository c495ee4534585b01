//! # Island Groups
//!
//! The coarsest grouping. Membership is a fixed manual mapping from region
//! codes; it cannot be derived from code arithmetic because region numbers
//! were not assigned geographically (region 17, MIMAROPA, is in Luzon;
//! region 15, the former ARMM, is in Mindanao).

use serde::{Deserialize, Serialize};

use crate::code::{ancestor_prefix, CodeDepth, PsgcCode};
use crate::error::ValidationError;

/// Region codes of Luzon.
///
/// MIMAROPA appears under both its current code `17` and the legacy
/// Region IV-B code `41` still carried by older publication files.
pub const LUZON_REGION_CODES: &[&str] = &[
    "130000000", "140000000", "010000000", "020000000", "030000000", "040000000", "170000000",
    "410000000", "050000000",
];

/// Region codes of the Visayas.
pub const VISAYAS_REGION_CODES: &[&str] = &["060000000", "070000000", "080000000"];

/// Region codes of Mindanao.
pub const MINDANAO_REGION_CODES: &[&str] = &[
    "090000000", "100000000", "110000000", "120000000", "160000000", "150000000",
];

/// One of the three island groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IslandGroup {
    /// `luzon`
    Luzon,
    /// `visayas`
    Visayas,
    /// `mindanao`
    Mindanao,
}

impl IslandGroup {
    /// All island groups in publication order.
    pub const ALL: [IslandGroup; 3] = [IslandGroup::Luzon, IslandGroup::Visayas, IslandGroup::Mindanao];

    /// The island-group code used in records and paths.
    pub fn code(self) -> &'static str {
        match self {
            IslandGroup::Luzon => "luzon",
            IslandGroup::Visayas => "visayas",
            IslandGroup::Mindanao => "mindanao",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            IslandGroup::Luzon => "Luzon",
            IslandGroup::Visayas => "Visayas",
            IslandGroup::Mindanao => "Mindanao",
        }
    }

    /// Region codes belonging to this island group.
    pub fn region_codes(self) -> &'static [&'static str] {
        match self {
            IslandGroup::Luzon => LUZON_REGION_CODES,
            IslandGroup::Visayas => VISAYAS_REGION_CODES,
            IslandGroup::Mindanao => MINDANAO_REGION_CODES,
        }
    }

    /// Whether `region_code` is one of this group's regions.
    pub fn contains(self, region_code: &PsgcCode) -> bool {
        self.region_codes().contains(&region_code.as_str())
    }
}

impl std::fmt::Display for IslandGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Look up the island group of a region code.
///
/// The region prefix of `region_code` is taken first, so any code inside a
/// region resolves to that region's group.
///
/// # Errors
///
/// Returns [`ValidationError::UnresolvedIslandGroup`] if the region is in
/// none of the three tables.
pub fn resolve_island_group(region_code: &PsgcCode) -> Result<IslandGroup, ValidationError> {
    let region = ancestor_prefix(region_code, CodeDepth::Region);
    IslandGroup::ALL
        .into_iter()
        .find(|group| group.contains(&region))
        .ok_or_else(|| ValidationError::UnresolvedIslandGroup(region.as_str().to_string()))
}
