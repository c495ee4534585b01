//! # Level Normalizer
//!
//! One rule per level. Each rule takes a validated record plus the code
//! sets of the levels it resolves against, passed explicitly:
//!
//! | Rule | Resolves against |
//! |---|---|
//! | [`normalize_region`] | nothing |
//! | [`normalize_province`], [`normalize_district`] | regions |
//! | [`normalize_locality`], [`normalize_city_municipality`], [`normalize_sub_municipality`] | [`AdministrativeSets`] |
//! | [`normalize_barangay`] | [`BarangayParents`] |
//!
//! An ancestor is present only when its prefix is a member of the
//! corresponding set. Provinces and districts share the 4-digit code space;
//! a prefix found in both is an [`HierarchyError::AmbiguousAncestor`].

use std::sync::OnceLock;

use psgc_core::{
    is_preserved_acronym, resolve_island_group, title_case, ancestor_prefix, CodeDepth,
    IslandGroup, PsgcCode, SourceLevel, ValidationError,
};
use regex::Regex;

use crate::error::{HierarchyError, HierarchyResult};
use crate::index::CodeSet;
use crate::overrides;
use crate::record::RawRecord;
use crate::unit::{
    Barangay, CityMunicipality, District, Locality, Province, Region, SubMunicipality,
};

/// A raw record whose code has passed validation.
#[derive(Debug, Clone)]
pub struct CheckedRecord<'a> {
    /// Position in the input list.
    pub index: usize,
    /// The validated code.
    pub code: PsgcCode,
    /// The raw record.
    pub raw: &'a RawRecord,
}

/// Code sets resolved before any city-level rule runs.
#[derive(Debug, Clone, Copy)]
pub struct AdministrativeSets<'a> {
    pub regions: &'a CodeSet,
    pub provinces: &'a CodeSet,
    pub districts: &'a CodeSet,
}

/// Code sets a barangay resolves its containers against.
#[derive(Debug, Clone, Copy)]
pub struct BarangayParents<'a> {
    pub admin: AdministrativeSets<'a>,
    pub cities: &'a CodeSet,
    pub municipalities: &'a CodeSet,
    pub sub_municipalities: &'a CodeSet,
}

fn label_runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new(r"(?i)[a-z\-\s]+").expect("label pattern is valid"))
}

/// Split a registry region label into `(name, region_name)`.
///
/// Known shapes:
///
/// - `Region I (Ilocos Region)` → (`Ilocos Region`, `Region I`)
/// - `National Capital Region (NCR)` → (`NCR`, `National Capital Region`)
/// - `MIMAROPA Region` → (`MIMAROPA Region`, `MIMAROPA Region`), the one
///   region without an enclosed short name.
///
/// # Errors
///
/// Any other shape is rejected with
/// [`ValidationError::UnrecognizedRegionLabel`].
pub fn split_region_label(label: &str) -> Result<(String, String), ValidationError> {
    let runs: Vec<&str> = label_runs().find_iter(label).map(|m| m.as_str()).collect();
    let (region_run, name_run) = match runs.as_slice() {
        [region, name] => (region.trim(), name.trim()),
        [only] if only.to_lowercase().contains("mimaropa") => (only.trim(), only.trim()),
        _ => return Err(ValidationError::UnrecognizedRegionLabel(label.to_string())),
    };
    if region_run.is_empty() || name_run.is_empty() {
        return Err(ValidationError::UnrecognizedRegionLabel(label.to_string()));
    }

    let name = if is_preserved_acronym(name_run) {
        name_run.to_string()
    } else {
        title_case(name_run)
    };

    let region_name = if is_preserved_acronym(region_run) {
        region_run.to_string()
    } else if region_run
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("region"))
    {
        format!("Region{}", &region_run[6..])
    } else {
        title_case(region_run)
    };

    Ok((name, region_name))
}

/// Strip the registry's ` (Capital)` marker, reporting whether it was there.
pub fn strip_capital_marker(name: &str) -> (&str, bool) {
    match name
        .strip_suffix("(Capital)")
        .and_then(|rest| rest.strip_suffix(char::is_whitespace))
    {
        Some(stripped) => (stripped, true),
        None => (name, false),
    }
}

/// The display name of a district: the last comma-separated segment of the
/// label, without the ` (Not a Province)` marker.
pub fn district_name(label: &str) -> String {
    let label = label.replacen(" (Not a Province)", "", 1);
    let last = label.rsplit(',').next().unwrap_or_default();
    title_case(last.trim())
}

fn island_group(code: &PsgcCode) -> HierarchyResult<IslandGroup> {
    resolve_island_group(code).map_err(|_| HierarchyError::UnresolvedIslandGroup {
        code: code.clone(),
        region_code: ancestor_prefix(code, CodeDepth::Region),
    })
}

/// Resolve the province and district of `code`. At most one is present.
///
/// # Errors
///
/// [`HierarchyError::AmbiguousAncestor`] if the 4-digit prefix is in both
/// sets.
pub fn province_or_district(
    code: &PsgcCode,
    sets: &AdministrativeSets<'_>,
) -> HierarchyResult<(Option<PsgcCode>, Option<PsgcCode>)> {
    let province = sets.provinces.resolve(code, CodeDepth::ProvinceOrDistrict);
    let district = sets.districts.resolve(code, CodeDepth::ProvinceOrDistrict);
    match (province, district) {
        (Some(prefix), Some(_)) => Err(HierarchyError::AmbiguousAncestor {
            code: code.clone(),
            prefix,
        }),
        pair => Ok(pair),
    }
}

/// Normalize a `Reg` record.
pub fn normalize_region(rec: &CheckedRecord<'_>) -> HierarchyResult<Region> {
    let (name, region_name) =
        split_region_label(&rec.raw.name).map_err(|_| HierarchyError::UnrecognizedRegionLabel {
            code: rec.code.clone(),
            label: rec.raw.name.clone(),
        })?;
    Ok(Region {
        code: rec.code.clone(),
        name,
        region_name,
        island_group_code: island_group(&rec.code)?,
        psgc10_digit_code: rec.raw.psgc10_digit_code.clone(),
    })
}

/// Normalize a `Prov` record.
pub fn normalize_province(rec: &CheckedRecord<'_>, regions: &CodeSet) -> HierarchyResult<Province> {
    Ok(Province {
        code: rec.code.clone(),
        name: title_case(&rec.raw.name),
        region_code: regions.resolve(&rec.code, CodeDepth::Region),
        island_group_code: island_group(&rec.code)?,
        psgc10_digit_code: rec.raw.psgc10_digit_code.clone(),
    })
}

/// Normalize a `Dist` record.
pub fn normalize_district(rec: &CheckedRecord<'_>, regions: &CodeSet) -> HierarchyResult<District> {
    Ok(District {
        code: rec.code.clone(),
        name: district_name(&rec.raw.name),
        region_code: regions.resolve(&rec.code, CodeDepth::Region),
        island_group_code: island_group(&rec.code)?,
        psgc10_digit_code: rec.raw.psgc10_digit_code.clone(),
    })
}

/// Normalize a `City` or `Mun` record for its own collection.
pub fn normalize_locality(
    rec: &CheckedRecord<'_>,
    sets: &AdministrativeSets<'_>,
) -> HierarchyResult<Locality> {
    let (name, is_capital) = strip_capital_marker(&rec.raw.name);
    let (province_code, district_code) = province_or_district(&rec.code, sets)?;
    Ok(Locality {
        code: rec.code.clone(),
        name: title_case(name),
        old_name: rec.raw.old_name.clone(),
        is_capital,
        province_code,
        district_code,
        region_code: sets.regions.resolve(&rec.code, CodeDepth::Region),
        island_group_code: island_group(&rec.code)?,
        psgc10_digit_code: rec.raw.psgc10_digit_code.clone(),
    })
}

/// Normalize a `City` or `Mun` record for the combined view.
pub fn normalize_city_municipality(
    rec: &CheckedRecord<'_>,
    source: SourceLevel,
    sets: &AdministrativeSets<'_>,
) -> HierarchyResult<CityMunicipality> {
    let locality = normalize_locality(rec, sets)?;
    Ok(CityMunicipality {
        code: locality.code,
        name: locality.name,
        old_name: locality.old_name,
        is_capital: locality.is_capital,
        is_city: source == SourceLevel::City,
        is_municipality: source == SourceLevel::Mun,
        province_code: locality.province_code,
        district_code: locality.district_code,
        region_code: locality.region_code,
        island_group_code: locality.island_group_code,
        psgc10_digit_code: locality.psgc10_digit_code,
    })
}

/// Normalize a `SubMun` record.
pub fn normalize_sub_municipality(
    rec: &CheckedRecord<'_>,
    sets: &AdministrativeSets<'_>,
) -> HierarchyResult<SubMunicipality> {
    let name = match overrides::sub_municipality_name(&rec.raw.name) {
        Some(fixed) => fixed.to_string(),
        None => title_case(&rec.raw.name),
    };
    let (province_code, district_code) = province_or_district(&rec.code, sets)?;
    Ok(SubMunicipality {
        code: rec.code.clone(),
        name,
        old_name: rec.raw.old_name.clone(),
        district_code,
        province_code,
        region_code: sets.regions.resolve(&rec.code, CodeDepth::Region),
        island_group_code: island_group(&rec.code)?,
        psgc10_digit_code: rec.raw.psgc10_digit_code.clone(),
    })
}

/// Normalize a `Bgy` record.
pub fn normalize_barangay(
    rec: &CheckedRecord<'_>,
    parents: &BarangayParents<'_>,
) -> HierarchyResult<Barangay> {
    let code = &rec.code;
    let (province_code, district_code) = province_or_district(code, &parents.admin)?;

    let mut city_code = parents.cities.resolve(code, CodeDepth::Locality);
    if let Some(district) = district_code
        .as_ref()
        .filter(|d| overrides::is_district_as_city(d.as_str()))
    {
        tracing::trace!(%code, %district, "district taken as city code");
        city_code = Some(district.clone());
    }

    Ok(Barangay {
        code: code.clone(),
        name: rec.raw.name.clone(),
        old_name: rec.raw.old_name.clone(),
        sub_municipality_code: parents.sub_municipalities.resolve(code, CodeDepth::Locality),
        city_code,
        municipality_code: parents.municipalities.resolve(code, CodeDepth::Locality),
        district_code,
        province_code,
        region_code: parents.admin.regions.resolve(code, CodeDepth::Region),
        island_group_code: island_group(code)?,
        psgc10_digit_code: rec.raw.psgc10_digit_code.clone(),
    })
}
