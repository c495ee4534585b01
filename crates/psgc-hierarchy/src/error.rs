//! Hierarchy build errors.
//!
//! Every variant is fatal for the run. Each carries the code (and where
//! useful the record index) so the offending registry row can be located.

use psgc_core::{Collection, Level, PsgcCode, ValidationError};
use thiserror::Error;

/// Errors raised while building the hierarchy.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// A record's code is not nine digits.
    #[error("record #{index} ({level}): {source}")]
    MalformedCode {
        index: usize,
        level: Level,
        source: ValidationError,
    },

    /// A unit's region prefix is in no island-group table.
    #[error("{code}: region {region_code} does not belong to any island group")]
    UnresolvedIslandGroup {
        code: PsgcCode,
        region_code: PsgcCode,
    },

    /// A 4-digit prefix is both a province and a district.
    #[error("{code}: ancestor {prefix} is both a province and a district")]
    AmbiguousAncestor { code: PsgcCode, prefix: PsgcCode },

    /// Two records in one collection share a code.
    #[error("duplicate code {code} in {collection}")]
    DuplicateCode {
        collection: Collection,
        code: PsgcCode,
    },

    /// A level has records but the code sets it resolves against are empty.
    #[error("{level} records present but no {prerequisite} were resolved")]
    EmptyPrerequisite {
        level: Level,
        prerequisite: &'static str,
    },

    /// A region label does not match a known registry shape.
    #[error("{code}: unrecognized region label {label:?}")]
    UnrecognizedRegionLabel { code: PsgcCode, label: String },
}

/// Result type alias for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> PsgcCode {
        PsgcCode::new(s).unwrap()
    }

    #[test]
    fn malformed_code_display_names_record() {
        let err = HierarchyError::MalformedCode {
            index: 42,
            level: Level::Barangay,
            source: PsgcCode::new("1234").unwrap_err(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("#42"));
        assert!(msg.contains("barangay"));
        assert!(msg.contains("1234"));
    }

    #[test]
    fn ambiguous_ancestor_display() {
        let err = HierarchyError::AmbiguousAncestor {
            code: code("133901001"),
            prefix: code("133900000"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("133900000"));
        assert!(msg.contains("both a province and a district"));
    }

    #[test]
    fn duplicate_code_display() {
        let err = HierarchyError::DuplicateCode {
            collection: Collection::Barangays,
            code: code("012801001"),
        };
        assert_eq!(format!("{err}"), "duplicate code 012801001 in barangays");
    }

    #[test]
    fn empty_prerequisite_display() {
        let err = HierarchyError::EmptyPrerequisite {
            level: Level::Barangay,
            prerequisite: "cities or municipalities",
        };
        assert!(format!("{err}").contains("no cities or municipalities"));
    }
}
