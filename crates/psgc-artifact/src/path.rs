//! Logical artifact paths.
//!
//! A logical path is a `/`-joined sequence of collection slugs and codes,
//! e.g. `provinces/012800000/barangays`. Each logical path materializes as
//! two files: `<path>.json` and `<path>/index.html`.

use std::path::{Path, PathBuf};

use psgc_core::Collection;

/// A logical artifact path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    /// The root path of a collection.
    pub fn collection(collection: Collection) -> Self {
        Self(collection.slug().to_string())
    }

    /// Append one segment.
    pub fn join(&self, segment: impl AsRef<str>) -> Self {
        Self(format!("{}/{}", self.0, segment.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative name of the JSON file.
    pub fn json_file(&self) -> String {
        format!("{}.json", self.0)
    }

    /// Relative name of the HTML twin.
    pub fn html_file(&self) -> String {
        format!("{}/index.html", self.0)
    }

    /// Resolve a relative file name under `root`.
    pub fn on_disk(root: &Path, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }
}

impl From<&str> for ArtifactPath {
    fn from(logical: &str) -> Self {
        Self(logical.to_string())
    }
}

impl std::fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twins_of_a_nested_path() {
        let path = ArtifactPath::collection(Collection::Provinces)
            .join("012800000")
            .join(Collection::Barangays.slug());
        assert_eq!(path.as_str(), "provinces/012800000/barangays");
        assert_eq!(path.json_file(), "provinces/012800000/barangays.json");
        assert_eq!(path.html_file(), "provinces/012800000/barangays/index.html");
    }

    #[test]
    fn on_disk_joins_segments() {
        let root = Path::new("/srv/public");
        let file = ArtifactPath::on_disk(root, "regions/010000000.json");
        assert_eq!(file, Path::new("/srv/public/regions/010000000.json"));
    }
}
