//! # Validation Errors
//!
//! Errors raised while constructing core primitives from registry input.
//! Each variant carries the rejected input so that a bad row can be found
//! in the publication file without guesswork.

use thiserror::Error;

/// Validation errors for core primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A code is not exactly nine ASCII digits.
    #[error("malformed PSGC code \"{value}\": {reason}")]
    MalformedCode {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `geographicLevel` tag outside the registry's fixed tag set.
    #[error("unknown geographic level tag \"{0}\" (expected Reg, Prov, Dist, Mun, City, SubMun or Bgy)")]
    UnknownSourceLevel(String),

    /// A region code that belongs to none of the island groups.
    #[error("region code {0} does not belong to any island group")]
    UnresolvedIslandGroup(String),

    /// A region label whose shape is not one of the known registry forms.
    #[error("unrecognized region label \"{0}\"")]
    UnrecognizedRegionLabel(String),
}
