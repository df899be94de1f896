//! Cargo manifest and lockfile updaters.
//!
//! Both edit the document with `toml_edit`, so comments, key order and
//! formatting outside the touched values survive.

use super::{ContentUpdater, require};
use crate::error::{Error, Result};
use crate::version::Version;
use toml_edit::{DocumentMut, Item};

/// Rewrites the version of a `Cargo.toml`.
///
/// Handles both `[package].version` and `[workspace.package].version`.
/// A package that inherits its version (`version.workspace = true`) is left
/// alone; the workspace root carries the number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoToml {
    version: Version,
}

impl CargoToml {
    /// Create the updater.
    #[must_use]
    pub const fn new(version: Version) -> Self {
        Self { version }
    }
}

impl ContentUpdater for CargoToml {
    fn update_content(&self, content: Option<&str>) -> Result<String> {
        let mut doc = require(content)?.parse::<DocumentMut>()?;
        let mut updated = false;

        if let Some(Item::Table(package)) = doc.get_mut("package")
            && package.get("version").is_some_and(Item::is_str)
        {
            package["version"] = toml_edit::value(self.version.to_string());
            updated = true;
        }

        if let Some(workspace) = doc.get_mut("workspace")
            && let Some(Item::Table(package)) = workspace.get_mut("package")
            && package.contains_key("version")
        {
            package["version"] = toml_edit::value(self.version.to_string());
            updated = true;
        }

        if !updated {
            return Err(Error::manifest(
                "No [package].version or [workspace.package].version to update",
                None,
            ));
        }
        Ok(doc.to_string())
    }
}

/// Rewrites the locked version of the released package in `Cargo.lock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoLock {
    version: Version,
    package_name: String,
}

impl CargoLock {
    /// Create the updater for the crate named `package_name`.
    #[must_use]
    pub fn new(version: Version, package_name: impl Into<String>) -> Self {
        Self {
            version,
            package_name: package_name.into(),
        }
    }
}

impl ContentUpdater for CargoLock {
    fn update_content(&self, content: Option<&str>) -> Result<String> {
        let mut doc = require(content)?.parse::<DocumentMut>()?;

        if let Some(packages) = doc
            .get_mut("package")
            .and_then(Item::as_array_of_tables_mut)
        {
            for package in packages.iter_mut() {
                if package.get("name").and_then(Item::as_str) == Some(self.package_name.as_str()) {
                    package["version"] = toml_edit::value(self.version.to_string());
                }
            }
        }

        Ok(doc.to_string())
    }
}
