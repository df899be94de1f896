//! Component and package name resolution.
//!
//! Names come from the first non-empty source in a fixed order:
//! explicit configuration, then the manifest, then the repository name.
//! The winning source is reported alongside the value.

use crate::config::ReleaseConfig;
use crate::error::{Error, Result};
use crate::snapshot::RepositorySnapshot;
use crate::strategy::Strategy;
use std::fmt;
use tracing::debug;

/// Where a resolved name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameSource {
    /// Set in the release configuration.
    Explicit,
    /// Read from the ecosystem manifest.
    Manifest,
    /// Derived from the repository name.
    Repository,
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::Manifest => write!(f, "manifest"),
            Self::Repository => write!(f, "repository"),
        }
    }
}

/// A resolved name and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The name.
    pub value: String,
    /// Which source supplied it.
    pub source: NameSource,
}

/// Pick the first candidate with a non-blank value.
#[must_use]
pub fn resolve_name<I>(candidates: I) -> Option<Resolved>
where
    I: IntoIterator<Item = (NameSource, Option<String>)>,
{
    candidates.into_iter().find_map(|(source, value)| {
        let value = value?.trim().to_string();
        (!value.is_empty()).then_some(Resolved { value, source })
    })
}

/// Component and package name for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    /// Component used in tags and titles.
    pub component: Resolved,
    /// Package name handed to updaters.
    pub package_name: Resolved,
}

/// Resolve both names for a strategy.
///
/// The component prefers `component`, then the normalized `package-name`,
/// then the normalized manifest name, then the repository name. The package
/// name prefers `package-name`, then the manifest name, then the repository
/// name.
///
/// # Errors
///
/// Returns an error if the manifest cannot be parsed, or
/// [`Error::Config`] if no source yields a name.
pub fn resolve_names(
    strategy: &dyn Strategy,
    config: &ReleaseConfig,
    snapshot: &RepositorySnapshot,
) -> Result<ResolvedNames> {
    let manifest_name = strategy.manifest_package_name(snapshot, config)?;
    let repository_name = snapshot
        .repository()
        .rsplit('/')
        .next()
        .map(str::to_string);
    let normalize = |name: Option<&str>| name.map(|n| strategy.normalize_component(n));

    let component = resolve_name([
        (NameSource::Explicit, config.component.clone()),
        (NameSource::Explicit, normalize(config.package_name.as_deref())),
        (NameSource::Manifest, normalize(manifest_name.as_deref())),
        (NameSource::Repository, repository_name.clone()),
    ])
    .ok_or_else(missing_name)?;

    let package_name = resolve_name([
        (NameSource::Explicit, config.package_name.clone()),
        (NameSource::Manifest, manifest_name),
        (NameSource::Repository, repository_name),
    ])
    .ok_or_else(missing_name)?;

    debug!(
        component = %component.value,
        component_source = %component.source,
        package_name = %package_name.value,
        package_name_source = %package_name.source,
        "Resolved release names"
    );

    Ok(ResolvedNames {
        component,
        package_name,
    })
}

fn missing_name() -> Error {
    Error::config(
        "Cannot determine a component or package name",
        "Set `component` or `package-name`, or pass a repository name",
    )
}
