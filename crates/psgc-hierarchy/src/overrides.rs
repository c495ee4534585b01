//! # Registry Exception Tables
//!
//! Literal corrections for known defects in the registry publication.
//! Each table is matched by exact value; none of them is a general rule.

/// District codes whose barangays are also assigned the district code as
/// their `cityCode`.
///
/// The City of Manila is published only as a district (`133900000`,
/// "City of Manila, First District"); there is no city record covering its
/// barangays, which sit under the Manila sub-municipalities instead.
/// Without this remap no Manila barangay has a city. Reported upstream as
/// psgc/api issue #2.
pub const DISTRICT_AS_CITY: &[&str] = &["133900000"];

/// Sub-municipality names the title-caser gets wrong, keyed by the exact
/// registry spelling.
///
/// Title casing lowers the roman numerals of `TONDO I/II` to `Tondo I/ii`.
pub const SUB_MUNICIPALITY_NAMES: &[(&str, &str)] = &[("TONDO I/II", "Tondo I/II")];

/// Whether barangays under `district_code` take it as their city code.
pub fn is_district_as_city(district_code: &str) -> bool {
    DISTRICT_AS_CITY.contains(&district_code)
}

/// The corrected published name for a sub-municipality, if its registry
/// name is in [`SUB_MUNICIPALITY_NAMES`].
pub fn sub_municipality_name(registry_name: &str) -> Option<&'static str> {
    SUB_MUNICIPALITY_NAMES
        .iter()
        .find(|(raw, _)| *raw == registry_name)
        .map(|(_, fixed)| *fixed)
}
