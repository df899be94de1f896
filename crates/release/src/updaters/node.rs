//! npm manifest and lockfile updaters.

use super::json::{object_entry, parse_object, to_string_like};
use super::{ContentUpdater, require};
use crate::error::Result;
use crate::version::Version;
use serde_json::Value;
use tracing::debug;

/// Rewrites the top-level `version` of `package.json`.
///
/// Dependency fields are left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageJson {
    version: Version,
}

impl PackageJson {
    /// Create the updater.
    #[must_use]
    pub const fn new(version: Version) -> Self {
        Self { version }
    }
}

impl ContentUpdater for PackageJson {
    fn update_content(&self, content: Option<&str>) -> Result<String> {
        let content = require(content)?;
        let mut root = parse_object(content)?;
        root.insert("version".to_string(), Value::String(self.version.to_string()));
        to_string_like(&root, content)
    }
}

/// Keeps `package-lock.json` / `npm-shrinkwrap.json` in sync with the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLockJson {
    version: Version,
}

impl PackageLockJson {
    /// Create the updater.
    #[must_use]
    pub const fn new(version: Version) -> Self {
        Self { version }
    }
}

impl ContentUpdater for PackageLockJson {
    fn update_content(&self, content: Option<&str>) -> Result<String> {
        let content = require(content)?;
        let mut root = parse_object(content)?;
        let version = Value::String(self.version.to_string());
        root.insert("version".to_string(), version.clone());

        // lockfileVersion 2 and 3 mirror the root package under packages[""]
        let lockfile_version = root
            .get("lockfileVersion")
            .and_then(Value::as_u64)
            .unwrap_or(1);
        if lockfile_version >= 2
            && let Some(packages) = root.get_mut("packages").and_then(Value::as_object_mut)
        {
            object_entry(packages, "")?.insert("version".to_string(), version);
        }

        to_string_like(&root, content)
    }
}

/// Points the samples' dependency on the released package at the new version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplesPackageJson {
    version: Version,
    package_name: String,
}

impl SamplesPackageJson {
    /// Create the updater for the dependency named `package_name`.
    #[must_use]
    pub fn new(version: Version, package_name: impl Into<String>) -> Self {
        Self {
            version,
            package_name: package_name.into(),
        }
    }

    /// Name of the dependency that gets rewritten.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }
}

impl ContentUpdater for SamplesPackageJson {
    fn update_content(&self, content: Option<&str>) -> Result<String> {
        let content = require(content)?;
        let mut root = parse_object(content)?;

        let Some(dependency) = root
            .get_mut("dependencies")
            .and_then(Value::as_object_mut)
            .and_then(|deps| deps.get_mut(&self.package_name))
        else {
            debug!(package = %self.package_name, "Samples do not depend on the package");
            return Ok(content.to_string());
        };

        *dependency = Value::String(format!("^{}", self.version));
        to_string_like(&root, content)
    }
}
