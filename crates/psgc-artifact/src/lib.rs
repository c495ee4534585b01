//! # psgc-artifact: Artifact Planner and Writers
//!
//! Turns a built [`psgc_hierarchy::Hierarchy`] into the static tree:
//!
//! - [`plan`]: enumerates `(logical path, payload)` pairs for every
//!   collection, single-unit and child-collection view.
//! - [`sink`]: the [`ArtifactSink`] seam, with a filesystem writer and an
//!   in-memory one.
//! - [`manifest`]: SHA-256 digests of the published tree and verification
//!   of a tree on disk.
//!
//! Planning is pure; only sinks touch the filesystem. A planned path is
//! written by exactly one producer, and nothing reads the output tree back
//! except [`verify_tree`].

pub mod error;
pub mod manifest;
pub mod path;
pub mod plan;
pub mod sink;

pub use error::{ArtifactError, ArtifactResult};
pub use manifest::{
    publish, sha256_hex, verify_tree, Manifest, ManifestEntry, VerifyReport, MANIFEST_FILE,
};
pub use path::ArtifactPath;
pub use plan::{ArtifactPlanner, Payload, PlannedArtifact};
pub use sink::{ArtifactSink, FsArtifactSink, MemorySink};
