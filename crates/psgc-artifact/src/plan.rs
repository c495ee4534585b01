//! # Artifact Planner
//!
//! Walks a [`Hierarchy`] and enumerates every `(logical path, payload)`
//! pair of the published tree:
//!
//! | Root | Children per unit | Grouped by |
//! |---|---|---|
//! | `island-groups` | every other collection | `regionCode` in the group's region table (regions by own code) |
//! | `regions` | all below regions | `regionCode` |
//! | `provinces`, `districts` | cities, municipalities, cities-municipalities, sub-municipalities, barangays | `provinceCode` / `districtCode` |
//! | `cities`, `municipalities`, `sub-municipalities` | barangays | `cityCode` / `municipalityCode` / `subMunicipalityCode` |
//! | `cities-municipalities` | barangays | `cityCode` or `municipalityCode` |
//! | `barangays` | none | |
//!
//! Each collection root also gets the full list, and each unit a single-record
//! artifact at `<collection>/<code>`.
//!
//! Units are serialized once when the planner is created; payloads borrow
//! those strings, so a unit listed under many groupings costs one render.

use std::collections::HashSet;

use psgc_core::{AncestorField, Collection, IslandGroup, PsgcCode};
use psgc_hierarchy::{GeographicUnit, GroupMap, Hierarchy, Indexed};

use crate::error::{ArtifactError, ArtifactResult};
use crate::path::ArtifactPath;

const BELOW_REGION: &[Collection] = &[
    Collection::Provinces,
    Collection::Districts,
    Collection::Cities,
    Collection::Municipalities,
    Collection::CitiesMunicipalities,
    Collection::SubMunicipalities,
    Collection::Barangays,
];

const BELOW_PROVINCE: &[Collection] = &[
    Collection::Cities,
    Collection::Municipalities,
    Collection::CitiesMunicipalities,
    Collection::SubMunicipalities,
    Collection::Barangays,
];

const BELOW_LOCALITY: &[Collection] = &[Collection::Barangays];

/// The body of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<'p> {
    /// One pre-rendered record.
    Single(&'p str),
    /// Pre-rendered records of a JSON array, in collection order.
    Many(Vec<&'p str>),
}

impl Payload<'_> {
    /// The payload as compact JSON text.
    pub fn to_json(&self) -> String {
        match self {
            Payload::Single(record) => (*record).to_string(),
            Payload::Many(records) => format!("[{}]", records.join(",")),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Payload::Single(_) => 1,
            Payload::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A planned artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact<'p> {
    pub path: ArtifactPath,
    pub payload: Payload<'p>,
}

impl PlannedArtifact<'_> {
    pub fn to_json(&self) -> String {
        self.payload.to_json()
    }
}

/// One collection, rendered.
#[derive(Debug)]
struct View<'h> {
    payloads: Vec<String>,
    /// Empty for island groups, which are keyed by [`IslandGroup`].
    codes: Vec<&'h PsgcCode>,
    regions: Vec<Option<&'h PsgcCode>>,
    groups: Vec<(AncestorField, &'h GroupMap)>,
}

impl<'h> View<'h> {
    fn of<T: GeographicUnit>(indexed: &'h Indexed<T>) -> ArtifactResult<Self> {
        let units = indexed.units();
        Ok(Self {
            payloads: units
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<_, _>>()?,
            codes: units.iter().map(|u| u.code()).collect(),
            regions: units
                .iter()
                .map(|u| u.ancestor(AncestorField::Region))
                .collect(),
            groups: AncestorField::ALL
                .into_iter()
                .filter_map(|field| indexed.group(field).map(|map| (field, map)))
                .collect(),
        })
    }

    fn island_groups(hierarchy: &'h Hierarchy) -> ArtifactResult<Self> {
        let units = hierarchy.island_groups();
        Ok(Self {
            payloads: units
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<_, _>>()?,
            codes: Vec::new(),
            regions: vec![None; units.len()],
            groups: Vec::new(),
        })
    }

    fn all(&self) -> Vec<&str> {
        self.payloads.iter().map(String::as_str).collect()
    }

    /// Positions of units carrying `ancestor` in any of `fields`, in
    /// collection order.
    fn grouped_by(&self, fields: &[AncestorField], ancestor: &PsgcCode) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .groups
            .iter()
            .filter(|(field, _)| fields.contains(field))
            .filter_map(|(_, map)| map.get(ancestor))
            .flatten()
            .copied()
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    fn in_island_group(&self, group: IslandGroup) -> Vec<usize> {
        self.regions
            .iter()
            .copied()
            .enumerate()
            .filter_map(|(at, region)| region.filter(|rc| group.contains(rc)).map(|_| at))
            .collect()
    }

    fn select(&self, positions: &[usize]) -> Vec<&str> {
        positions
            .iter()
            .map(|&at| self.payloads[at].as_str())
            .collect()
    }
}

#[derive(Debug)]
struct Views<'h> {
    island_groups: View<'h>,
    regions: View<'h>,
    provinces: View<'h>,
    districts: View<'h>,
    cities: View<'h>,
    municipalities: View<'h>,
    cities_municipalities: View<'h>,
    sub_municipalities: View<'h>,
    barangays: View<'h>,
}

impl<'h> Views<'h> {
    fn get(&self, collection: Collection) -> &View<'h> {
        match collection {
            Collection::IslandGroups => &self.island_groups,
            Collection::Regions => &self.regions,
            Collection::Provinces => &self.provinces,
            Collection::Districts => &self.districts,
            Collection::Cities => &self.cities,
            Collection::Municipalities => &self.municipalities,
            Collection::CitiesMunicipalities => &self.cities_municipalities,
            Collection::SubMunicipalities => &self.sub_municipalities,
            Collection::Barangays => &self.barangays,
        }
    }
}

#[derive(Default)]
struct Plan<'p> {
    artifacts: Vec<PlannedArtifact<'p>>,
    seen: HashSet<ArtifactPath>,
}

impl<'p> Plan<'p> {
    fn push(&mut self, path: ArtifactPath, payload: Payload<'p>) -> ArtifactResult<()> {
        if !self.seen.insert(path.clone()) {
            return Err(ArtifactError::DuplicatePath(path.to_string()));
        }
        self.artifacts.push(PlannedArtifact { path, payload });
        Ok(())
    }
}

/// Plans the artifact tree of one hierarchy.
#[derive(Debug)]
pub struct ArtifactPlanner<'h> {
    hierarchy: &'h Hierarchy,
    views: Views<'h>,
}

impl<'h> ArtifactPlanner<'h> {
    /// Render every unit of `hierarchy` once.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::Json`] if a unit fails to serialize.
    pub fn new(hierarchy: &'h Hierarchy) -> ArtifactResult<Self> {
        let views = Views {
            island_groups: View::island_groups(hierarchy)?,
            regions: View::of(hierarchy.regions())?,
            provinces: View::of(hierarchy.provinces())?,
            districts: View::of(hierarchy.districts())?,
            cities: View::of(hierarchy.cities())?,
            municipalities: View::of(hierarchy.municipalities())?,
            cities_municipalities: View::of(hierarchy.cities_municipalities())?,
            sub_municipalities: View::of(hierarchy.sub_municipalities())?,
            barangays: View::of(hierarchy.barangays())?,
        };
        Ok(Self { hierarchy, views })
    }

    pub fn hierarchy(&self) -> &'h Hierarchy {
        self.hierarchy
    }

    /// Enumerate every artifact, collection by collection.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::DuplicatePath`] if a logical path would be planned
    /// twice.
    pub fn plan(&self) -> ArtifactResult<Vec<PlannedArtifact<'_>>> {
        let mut plan = Plan::default();
        for collection in Collection::ALL {
            let before = plan.artifacts.len();
            match collection {
                Collection::IslandGroups => self.plan_island_groups(&mut plan)?,
                Collection::Regions => {
                    self.plan_level(&mut plan, collection, &[AncestorField::Region], BELOW_REGION)?
                }
                Collection::Provinces => self.plan_level(
                    &mut plan,
                    collection,
                    &[AncestorField::Province],
                    BELOW_PROVINCE,
                )?,
                Collection::Districts => self.plan_level(
                    &mut plan,
                    collection,
                    &[AncestorField::District],
                    BELOW_PROVINCE,
                )?,
                Collection::Cities => {
                    self.plan_level(&mut plan, collection, &[AncestorField::City], BELOW_LOCALITY)?
                }
                Collection::Municipalities => self.plan_level(
                    &mut plan,
                    collection,
                    &[AncestorField::Municipality],
                    BELOW_LOCALITY,
                )?,
                Collection::CitiesMunicipalities => self.plan_level(
                    &mut plan,
                    collection,
                    &[AncestorField::City, AncestorField::Municipality],
                    BELOW_LOCALITY,
                )?,
                Collection::SubMunicipalities => self.plan_level(
                    &mut plan,
                    collection,
                    &[AncestorField::SubMunicipality],
                    BELOW_LOCALITY,
                )?,
                Collection::Barangays => self.plan_level(&mut plan, collection, &[], &[])?,
            }
            tracing::debug!(
                %collection,
                artifacts = plan.artifacts.len() - before,
                "collection planned"
            );
        }
        Ok(plan.artifacts)
    }

    fn plan_island_groups<'p>(&'p self, plan: &mut Plan<'p>) -> ArtifactResult<()> {
        let view = self.views.get(Collection::IslandGroups);
        let root = ArtifactPath::collection(Collection::IslandGroups);
        plan.push(root.clone(), Payload::Many(view.all()))?;

        for (at, unit) in self.hierarchy.island_groups().iter().enumerate() {
            let unit_path = root.join(unit.code.code());
            plan.push(unit_path.clone(), Payload::Single(&view.payloads[at]))?;

            for &child in std::iter::once(&Collection::Regions).chain(BELOW_REGION) {
                let child_view = self.views.get(child);
                let positions = child_view.in_island_group(unit.code);
                plan.push(
                    unit_path.join(child.slug()),
                    Payload::Many(child_view.select(&positions)),
                )?;
            }
        }
        Ok(())
    }

    fn plan_level<'p>(
        &'p self,
        plan: &mut Plan<'p>,
        collection: Collection,
        fields: &[AncestorField],
        children: &[Collection],
    ) -> ArtifactResult<()> {
        let view = self.views.get(collection);
        let root = ArtifactPath::collection(collection);
        plan.push(root.clone(), Payload::Many(view.all()))?;

        for (at, &code) in view.codes.iter().enumerate() {
            let unit_path = root.join(code.as_str());
            plan.push(unit_path.clone(), Payload::Single(&view.payloads[at]))?;

            for &child in children {
                let child_view = self.views.get(child);
                let positions = child_view.grouped_by(fields, code);
                plan.push(
                    unit_path.join(child.slug()),
                    Payload::Many(child_view.select(&positions)),
                )?;
            }
        }
        Ok(())
    }
}
