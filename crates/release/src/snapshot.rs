//! In-memory view of the repository files a release needs.

use std::collections::BTreeMap;

/// File contents at the release base, keyed by repository-relative path.
///
/// A path that is not present reads as a missing file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySnapshot {
    repository: String,
    files: BTreeMap<String, String>,
}

impl RepositorySnapshot {
    /// Create an empty snapshot of the named repository.
    #[must_use]
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            files: BTreeMap::new(),
        }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Store the content of a file.
    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.files.insert(normalize_path(path), content.into());
    }

    /// Content of a file, if present.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(&normalize_path(path)).map(String::as_str)
    }

    /// Whether the snapshot holds the file.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    /// Repository name, the last-resort component and package name.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Paths held, in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Strip leading `./` and `/` so equivalent spellings share a key.
pub(crate) fn normalize_path(path: &str) -> String {
    let mut path = path;
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest;
        } else {
            return path.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = RepositorySnapshot::new("acme/web")
            .with_file("package.json", "{}")
            .with_file("./samples/package.json", "{\"name\":\"s\"}");

        assert_eq!(snapshot.repository(), "acme/web");
        assert_eq!(snapshot.get("package.json"), Some("{}"));
        assert_eq!(snapshot.get("/samples/package.json"), Some("{\"name\":\"s\"}"));
        assert!(snapshot.contains("./package.json"));
        assert!(!snapshot.contains("app.json"));
        assert_eq!(
            snapshot.paths().collect::<Vec<_>>(),
            ["package.json", "samples/package.json"]
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("././a/b"), "a/b");
        assert_eq!(normalize_path("/a"), "a");
        assert_eq!(normalize_path("a/./b"), "a/./b");
    }
}
