//! # Hierarchy Builder
//!
//! Runs the level rules in dependency order, threading each level's code
//! set into the levels that resolve against it:
//!
//! ```text
//! Region → Province → District → City / Municipality → SubMunicipality
//!        → CitiesMunicipalities (union) → Barangay
//! ```
//!
//! The result is a [`Hierarchy`]: nine immutable, insertion-ordered
//! collections with their grouping indices. Every data-integrity fault is
//! raised here, so a failed build never reaches artifact planning.

use std::collections::BTreeMap;

use psgc_core::{Collection, IslandGroup, Level, PsgcCode, SourceLevel};
use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, HierarchyResult};
use crate::index::{CodeSet, Indexed};
use crate::normalize::{self, AdministrativeSets, BarangayParents, CheckedRecord};
use crate::record::RawRecord;
use crate::unit::{
    Barangay, City, CityMunicipality, District, IslandGroupUnit, Municipality, Province, Region,
    SubMunicipality,
};

/// What to do with a record whose code is not nine digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedCodePolicy {
    /// Fail the build on the first malformed code.
    #[default]
    Abort,
    /// Drop the record with a warning and count it in the [`BuildReport`].
    Skip,
}

/// Summary of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Units per published collection.
    pub counts: BTreeMap<Collection, usize>,
    /// Records dropped under [`MalformedCodePolicy::Skip`].
    pub skipped_malformed: usize,
    /// Unrecognized `geographicLevel` tags and how often each was seen.
    pub unknown_levels: BTreeMap<String, usize>,
}

/// The fully linked hierarchy.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    island_groups: Vec<IslandGroupUnit>,
    regions: Indexed<Region>,
    provinces: Indexed<Province>,
    districts: Indexed<District>,
    cities: Indexed<City>,
    municipalities: Indexed<Municipality>,
    cities_municipalities: Indexed<CityMunicipality>,
    sub_municipalities: Indexed<SubMunicipality>,
    barangays: Indexed<Barangay>,
    report: BuildReport,
}

impl Hierarchy {
    pub fn island_groups(&self) -> &[IslandGroupUnit] {
        &self.island_groups
    }

    pub fn regions(&self) -> &Indexed<Region> {
        &self.regions
    }

    pub fn provinces(&self) -> &Indexed<Province> {
        &self.provinces
    }

    pub fn districts(&self) -> &Indexed<District> {
        &self.districts
    }

    pub fn cities(&self) -> &Indexed<City> {
        &self.cities
    }

    pub fn municipalities(&self) -> &Indexed<Municipality> {
        &self.municipalities
    }

    pub fn cities_municipalities(&self) -> &Indexed<CityMunicipality> {
        &self.cities_municipalities
    }

    pub fn sub_municipalities(&self) -> &Indexed<SubMunicipality> {
        &self.sub_municipalities
    }

    pub fn barangays(&self) -> &Indexed<Barangay> {
        &self.barangays
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Number of units in `collection`.
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::IslandGroups => self.island_groups.len(),
            Collection::Regions => self.regions.len(),
            Collection::Provinces => self.provinces.len(),
            Collection::Districts => self.districts.len(),
            Collection::Cities => self.cities.len(),
            Collection::Municipalities => self.municipalities.len(),
            Collection::CitiesMunicipalities => self.cities_municipalities.len(),
            Collection::SubMunicipalities => self.sub_municipalities.len(),
            Collection::Barangays => self.barangays.len(),
        }
    }
}

/// Records partitioned by source tag, registry order preserved.
#[derive(Default)]
struct Partition<'a> {
    regions: Vec<CheckedRecord<'a>>,
    provinces: Vec<CheckedRecord<'a>>,
    districts: Vec<CheckedRecord<'a>>,
    /// Cities and municipalities interleaved as the registry lists them.
    localities: Vec<(SourceLevel, CheckedRecord<'a>)>,
    sub_municipalities: Vec<CheckedRecord<'a>>,
    barangays: Vec<CheckedRecord<'a>>,
}

impl<'a> Partition<'a> {
    fn localities_of(&self, source: SourceLevel) -> impl Iterator<Item = &CheckedRecord<'a>> {
        self.localities
            .iter()
            .filter(move |(tag, _)| *tag == source)
            .map(|(_, rec)| rec)
    }
}

/// Builds a [`Hierarchy`] from raw registry records.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    policy: MalformedCodePolicy,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: MalformedCodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the hierarchy.
    ///
    /// # Errors
    ///
    /// Any [`HierarchyError`]. Malformed codes are fatal only under
    /// [`MalformedCodePolicy::Abort`].
    pub fn build(&self, records: &[RawRecord]) -> HierarchyResult<Hierarchy> {
        let mut report = BuildReport::default();
        let part = self.partition(records, &mut report)?;

        let regions = Indexed::new(
            Collection::Regions,
            collect(&part.regions, normalize::normalize_region)?,
        )?;
        let region_codes = regions.codes();
        logged(Level::Region, regions.len());

        require(Level::Province, part.provinces.len(), &[&region_codes], "regions")?;
        let provinces = Indexed::new(
            Collection::Provinces,
            collect(&part.provinces, |rec| {
                normalize::normalize_province(rec, &region_codes)
            })?,
        )?;
        logged(Level::Province, provinces.len());

        require(Level::District, part.districts.len(), &[&region_codes], "regions")?;
        let districts = Indexed::new(
            Collection::Districts,
            collect(&part.districts, |rec| {
                normalize::normalize_district(rec, &region_codes)
            })?,
        )?;
        logged(Level::District, districts.len());

        let province_codes = provinces.codes();
        let district_codes = districts.codes();
        check_disjoint(&province_codes, &district_codes)?;
        let admin = AdministrativeSets {
            regions: &region_codes,
            provinces: &province_codes,
            districts: &district_codes,
        };

        let admin_sets = [&province_codes, &district_codes];
        let locality_count = part.localities.len();
        require(Level::City, locality_count, &admin_sets, "provinces or districts")?;

        let cities = Indexed::new(
            Collection::Cities,
            part.localities_of(SourceLevel::City)
                .map(|rec| normalize::normalize_locality(rec, &admin))
                .collect::<HierarchyResult<Vec<_>>>()?,
        )?;
        logged(Level::City, cities.len());

        let municipalities = Indexed::new(
            Collection::Municipalities,
            part.localities_of(SourceLevel::Mun)
                .map(|rec| normalize::normalize_locality(rec, &admin))
                .collect::<HierarchyResult<Vec<_>>>()?,
        )?;
        logged(Level::Municipality, municipalities.len());

        require(
            Level::SubMunicipality,
            part.sub_municipalities.len(),
            &admin_sets,
            "provinces or districts",
        )?;
        let sub_municipalities = Indexed::new(
            Collection::SubMunicipalities,
            collect(&part.sub_municipalities, |rec| {
                normalize::normalize_sub_municipality(rec, &admin)
            })?,
        )?;
        logged(Level::SubMunicipality, sub_municipalities.len());

        let cities_municipalities = Indexed::new(
            Collection::CitiesMunicipalities,
            part.localities
                .iter()
                .map(|(source, rec)| normalize::normalize_city_municipality(rec, *source, &admin))
                .collect::<HierarchyResult<Vec<_>>>()?,
        )?;
        tracing::info!(
            collection = %Collection::CitiesMunicipalities,
            count = cities_municipalities.len(),
            "combined view built"
        );

        let city_codes = cities.codes();
        let municipality_codes = municipalities.codes();
        let sub_municipality_codes = sub_municipalities.codes();
        require(
            Level::Barangay,
            part.barangays.len(),
            &[&city_codes, &municipality_codes],
            "cities or municipalities",
        )?;
        let parents = BarangayParents {
            admin,
            cities: &city_codes,
            municipalities: &municipality_codes,
            sub_municipalities: &sub_municipality_codes,
        };
        let barangays = Indexed::new(
            Collection::Barangays,
            collect(&part.barangays, |rec| normalize::normalize_barangay(rec, &parents))?,
        )?;
        logged(Level::Barangay, barangays.len());

        let mut hierarchy = Hierarchy {
            island_groups: IslandGroup::ALL.into_iter().map(IslandGroupUnit::from).collect(),
            regions,
            provinces,
            districts,
            cities,
            municipalities,
            cities_municipalities,
            sub_municipalities,
            barangays,
            report,
        };
        hierarchy.report.counts = Collection::ALL
            .into_iter()
            .map(|c| (c, hierarchy.count(c)))
            .collect();
        Ok(hierarchy)
    }

    fn partition<'a>(
        &self,
        records: &'a [RawRecord],
        report: &mut BuildReport,
    ) -> HierarchyResult<Partition<'a>> {
        let mut part = Partition::default();

        for (index, raw) in records.iter().enumerate() {
            let source: SourceLevel = match raw.geographic_level.parse() {
                Ok(source) => source,
                Err(_) => {
                    tracing::warn!(
                        index,
                        code = %raw.code,
                        tag = %raw.geographic_level,
                        "unknown geographic level, record skipped"
                    );
                    *report
                        .unknown_levels
                        .entry(raw.geographic_level.clone())
                        .or_default() += 1;
                    continue;
                }
            };

            let code = match PsgcCode::new(raw.code.as_str()) {
                Ok(code) => code,
                Err(source_err) => match self.policy {
                    MalformedCodePolicy::Abort => {
                        return Err(HierarchyError::MalformedCode {
                            index,
                            level: source.level(),
                            source: source_err,
                        });
                    }
                    MalformedCodePolicy::Skip => {
                        tracing::warn!(index, code = %raw.code, error = %source_err, "malformed code, record skipped");
                        report.skipped_malformed += 1;
                        continue;
                    }
                },
            };

            let rec = CheckedRecord { index, code, raw };
            match source {
                SourceLevel::Reg => part.regions.push(rec),
                SourceLevel::Prov => part.provinces.push(rec),
                SourceLevel::Dist => part.districts.push(rec),
                SourceLevel::City | SourceLevel::Mun => part.localities.push((source, rec)),
                SourceLevel::SubMun => part.sub_municipalities.push(rec),
                SourceLevel::Bgy => part.barangays.push(rec),
            }
        }

        Ok(part)
    }
}

fn collect<'a, T>(
    records: &[CheckedRecord<'a>],
    rule: impl Fn(&CheckedRecord<'a>) -> HierarchyResult<T>,
) -> HierarchyResult<Vec<T>> {
    records.iter().map(rule).collect()
}

/// Fail when a level has records but every set it resolves against is empty.
fn require(
    level: Level,
    records: usize,
    prerequisites: &[&CodeSet],
    prerequisite: &'static str,
) -> HierarchyResult<()> {
    if records > 0 && prerequisites.iter().all(|set| set.is_empty()) {
        return Err(HierarchyError::EmptyPrerequisite {
            level,
            prerequisite,
        });
    }
    Ok(())
}

/// Provinces and districts partition the 4-digit code space.
fn check_disjoint(provinces: &CodeSet, districts: &CodeSet) -> HierarchyResult<()> {
    match districts.iter().find(|code| provinces.contains(code)) {
        Some(shared) => Err(HierarchyError::AmbiguousAncestor {
            code: shared.clone(),
            prefix: shared.clone(),
        }),
        None => Ok(()),
    }
}

fn logged(level: Level, count: usize) {
    tracing::info!(%level, count, "level normalized");
}
