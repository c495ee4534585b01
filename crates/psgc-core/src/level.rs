//! # Geographic Levels
//!
//! [`Level`] is the closed set of hierarchy levels. [`SourceLevel`] is the
//! registry's `geographicLevel` tag, used only to partition raw records.
//! [`Collection`] names the published collections, which add the combined
//! cities-municipalities view to the eight levels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::code::CodeDepth;
use crate::error::ValidationError;

/// A level of the administrative hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// Luzon, Visayas, Mindanao.
    IslandGroup,
    /// Administrative region.
    Region,
    /// Province.
    Province,
    /// Metro Manila district; occupies the province code space.
    District,
    /// City.
    City,
    /// Municipality.
    Municipality,
    /// Sub-municipality (the districts of the City of Manila).
    SubMunicipality,
    /// Barangay.
    Barangay,
}

impl Level {
    /// All levels, coarsest first.
    pub const ALL: [Level; 8] = [
        Level::IslandGroup,
        Level::Region,
        Level::Province,
        Level::District,
        Level::City,
        Level::Municipality,
        Level::SubMunicipality,
        Level::Barangay,
    ];

    /// Prefix depth of codes at this level. Island groups have no code
    /// position of their own.
    pub fn code_depth(self) -> Option<CodeDepth> {
        match self {
            Level::IslandGroup => None,
            Level::Region => Some(CodeDepth::Region),
            Level::Province | Level::District => Some(CodeDepth::ProvinceOrDistrict),
            Level::City | Level::Municipality | Level::SubMunicipality => {
                Some(CodeDepth::Locality)
            }
            Level::Barangay => Some(CodeDepth::Barangay),
        }
    }

    /// Human-readable level name.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::IslandGroup => "island group",
            Level::Region => "region",
            Level::Province => "province",
            Level::District => "district",
            Level::City => "city",
            Level::Municipality => "municipality",
            Level::SubMunicipality => "sub-municipality",
            Level::Barangay => "barangay",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The registry's `geographicLevel` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLevel {
    /// `Reg`
    Reg,
    /// `Prov`
    Prov,
    /// `Dist`
    Dist,
    /// `Mun`
    Mun,
    /// `City`
    City,
    /// `SubMun`
    SubMun,
    /// `Bgy`
    Bgy,
}

impl SourceLevel {
    /// The hierarchy level this tag partitions into.
    pub fn level(self) -> Level {
        match self {
            SourceLevel::Reg => Level::Region,
            SourceLevel::Prov => Level::Province,
            SourceLevel::Dist => Level::District,
            SourceLevel::Mun => Level::Municipality,
            SourceLevel::City => Level::City,
            SourceLevel::SubMun => Level::SubMunicipality,
            SourceLevel::Bgy => Level::Barangay,
        }
    }

    /// The tag as written in the registry.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceLevel::Reg => "Reg",
            SourceLevel::Prov => "Prov",
            SourceLevel::Dist => "Dist",
            SourceLevel::Mun => "Mun",
            SourceLevel::City => "City",
            SourceLevel::SubMun => "SubMun",
            SourceLevel::Bgy => "Bgy",
        }
    }
}

impl FromStr for SourceLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reg" => Ok(SourceLevel::Reg),
            "Prov" => Ok(SourceLevel::Prov),
            "Dist" => Ok(SourceLevel::Dist),
            "Mun" => Ok(SourceLevel::Mun),
            "City" => Ok(SourceLevel::City),
            "SubMun" => Ok(SourceLevel::SubMun),
            "Bgy" => Ok(SourceLevel::Bgy),
            other => Err(ValidationError::UnknownSourceLevel(other.to_string())),
        }
    }
}

/// A published collection of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    /// `island-groups`
    IslandGroups,
    /// `regions`
    Regions,
    /// `provinces`
    Provinces,
    /// `districts`
    Districts,
    /// `cities`
    Cities,
    /// `municipalities`
    Municipalities,
    /// `cities-municipalities`: the union view of cities and municipalities.
    CitiesMunicipalities,
    /// `sub-municipalities`
    SubMunicipalities,
    /// `barangays`
    Barangays,
}

impl Collection {
    /// All collections in publication order.
    pub const ALL: [Collection; 9] = [
        Collection::IslandGroups,
        Collection::Regions,
        Collection::Provinces,
        Collection::Districts,
        Collection::Cities,
        Collection::Municipalities,
        Collection::CitiesMunicipalities,
        Collection::SubMunicipalities,
        Collection::Barangays,
    ];

    /// Path segment of this collection in the artifact tree.
    pub fn slug(self) -> &'static str {
        match self {
            Collection::IslandGroups => "island-groups",
            Collection::Regions => "regions",
            Collection::Provinces => "provinces",
            Collection::Districts => "districts",
            Collection::Cities => "cities",
            Collection::Municipalities => "municipalities",
            Collection::CitiesMunicipalities => "cities-municipalities",
            Collection::SubMunicipalities => "sub-municipalities",
            Collection::Barangays => "barangays",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// An ancestor code field carried by units below the region level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AncestorField {
    /// `regionCode` (a region's own code for region units).
    Region,
    /// `provinceCode`
    Province,
    /// `districtCode`
    District,
    /// `cityCode`
    City,
    /// `municipalityCode`
    Municipality,
    /// `subMunicipalityCode`
    SubMunicipality,
}

impl AncestorField {
    /// All ancestor fields, coarsest first.
    pub const ALL: [AncestorField; 6] = [
        AncestorField::Region,
        AncestorField::Province,
        AncestorField::District,
        AncestorField::City,
        AncestorField::Municipality,
        AncestorField::SubMunicipality,
    ];

    /// JSON field name on the published record.
    pub fn field_name(self) -> &'static str {
        match self {
            AncestorField::Region => "regionCode",
            AncestorField::Province => "provinceCode",
            AncestorField::District => "districtCode",
            AncestorField::City => "cityCode",
            AncestorField::Municipality => "municipalityCode",
            AncestorField::SubMunicipality => "subMunicipalityCode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_level_parses_every_tag() {
        for tag in ["Reg", "Prov", "Dist", "Mun", "City", "SubMun", "Bgy"] {
            let level: SourceLevel = tag.parse().unwrap();
            assert_eq!(level.as_str(), tag);
        }
    }

    #[test]
    fn source_level_rejects_unknown_tag() {
        let err = "Brgy".parse::<SourceLevel>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownSourceLevel("Brgy".to_string()));
        assert!("".parse::<SourceLevel>().is_err());
        assert!("reg".parse::<SourceLevel>().is_err());
    }

    #[test]
    fn source_levels_map_to_distinct_levels() {
        assert_eq!(SourceLevel::Mun.level(), Level::Municipality);
        assert_eq!(SourceLevel::City.level(), Level::City);
        assert_eq!(SourceLevel::SubMun.level(), Level::SubMunicipality);
        assert_eq!(SourceLevel::Bgy.level(), Level::Barangay);
    }

    #[test]
    fn provinces_and_districts_share_depth() {
        assert_eq!(Level::Province.code_depth(), Level::District.code_depth());
        assert_eq!(Level::IslandGroup.code_depth(), None);
    }

    #[test]
    fn collection_slugs_serialize_kebab_case() {
        for collection in Collection::ALL {
            let json = serde_json::to_string(&collection).unwrap();
            assert_eq!(json, format!("\"{}\"", collection.slug()));
        }
    }
}
