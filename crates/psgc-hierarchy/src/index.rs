//! # Code Sets and Grouping Indices
//!
//! [`CodeSet`] is the set of codes resolved at one level; later levels
//! test ancestor prefixes against it. [`Indexed`] holds one level's units in
//! insertion order together with a by-code lookup and one [`GroupMap`] per
//! ancestor field, so grouping queries never rescan the collection.

use std::collections::{BTreeMap, HashMap, HashSet};

use psgc_core::{ancestor_prefix, AncestorField, CodeDepth, Collection, PsgcCode};

use crate::error::{HierarchyError, HierarchyResult};
use crate::unit::GeographicUnit;

/// Codes of all units resolved at one level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSet(HashSet<PsgcCode>);

impl CodeSet {
    /// Whether `code` is in the set.
    pub fn contains(&self, code: &PsgcCode) -> bool {
        self.0.contains(code)
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the codes (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &PsgcCode> {
        self.0.iter()
    }

    /// The ancestor of `code` at `depth`, if that ancestor is in the set.
    pub fn resolve(&self, code: &PsgcCode, depth: CodeDepth) -> Option<PsgcCode> {
        let prefix = ancestor_prefix(code, depth);
        self.contains(&prefix).then_some(prefix)
    }
}

impl FromIterator<PsgcCode> for CodeSet {
    fn from_iter<I: IntoIterator<Item = PsgcCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ancestor code → positions of the units carrying it, in insertion order.
pub type GroupMap = HashMap<PsgcCode, Vec<usize>>;

/// One level's units with lookup and grouping indices.
#[derive(Debug, Clone)]
pub struct Indexed<T> {
    collection: Collection,
    units: Vec<T>,
    positions: HashMap<PsgcCode, usize>,
    groups: BTreeMap<AncestorField, GroupMap>,
}

impl<T: GeographicUnit> Indexed<T> {
    /// Index `units`, rejecting duplicate codes.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::DuplicateCode`] on the first code seen
    /// twice.
    pub fn new(collection: Collection, units: Vec<T>) -> HierarchyResult<Self> {
        let mut positions = HashMap::with_capacity(units.len());
        let mut groups: BTreeMap<AncestorField, GroupMap> = BTreeMap::new();

        for (at, unit) in units.iter().enumerate() {
            if positions.insert(unit.code().clone(), at).is_some() {
                return Err(HierarchyError::DuplicateCode {
                    collection,
                    code: unit.code().clone(),
                });
            }
            for field in AncestorField::ALL {
                if let Some(ancestor) = unit.ancestor(field) {
                    groups
                        .entry(field)
                        .or_default()
                        .entry(ancestor.clone())
                        .or_default()
                        .push(at);
                }
            }
        }

        Ok(Self {
            collection,
            units,
            positions,
            groups,
        })
    }

    /// The collection these units are published under.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Units in insertion order.
    pub fn units(&self) -> &[T] {
        &self.units
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the level has no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The unit with `code`, if any.
    pub fn get(&self, code: &PsgcCode) -> Option<&T> {
        self.positions.get(code).map(|&at| &self.units[at])
    }

    /// All codes of this level.
    pub fn codes(&self) -> CodeSet {
        self.units.iter().map(|u| u.code().clone()).collect()
    }

    /// The grouping index for `field`. Empty when no unit carries it.
    pub fn group(&self, field: AncestorField) -> Option<&GroupMap> {
        self.groups.get(&field)
    }

    /// Positions of units whose `field` equals `ancestor`.
    pub fn positions_by(&self, field: AncestorField, ancestor: &PsgcCode) -> &[usize] {
        self.groups
            .get(&field)
            .and_then(|map| map.get(ancestor))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Units whose `field` equals `ancestor`, in insertion order.
    pub fn grouped_by<'a>(
        &'a self,
        field: AncestorField,
        ancestor: &PsgcCode,
    ) -> impl Iterator<Item = &'a T> + 'a {
        self.positions_by(field, ancestor)
            .iter()
            .map(move |&at| &self.units[at])
    }
}
