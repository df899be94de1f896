//! Release strategies: one per ecosystem.
//!
//! A strategy declares which files it manages and how to update them. It
//! contributes a base set of updates and, optionally, an overlay set. The
//! [`UpdaterRegistry`](crate::registry::UpdaterRegistry) merges the two.

mod expo;
mod node;
mod rust;
mod simple;

pub use expo::Expo;
pub use node::Node;
pub use rust::Rust;
pub use simple::Simple;

use crate::commit::Commit;
use crate::config::ReleaseConfig;
use crate::error::{Error, Result};
use crate::snapshot::RepositorySnapshot;
use crate::updaters::Update;
use crate::version::Version;
use std::fmt;

/// Names accepted by [`strategy_for`].
pub const STRATEGY_NAMES: &[&str] = &["simple", "node", "expo", "rust"];

/// Everything an updater set is bound to for one release.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    /// Version being released.
    pub version: &'a Version,
    /// Commits included in the release.
    pub commits: &'a [Commit],
    /// Resolved component name.
    pub component: &'a str,
    /// Resolved package name.
    pub package_name: &'a str,
    /// Rendered changelog entry.
    pub notes: &'a str,
    /// Release configuration.
    pub config: &'a ReleaseConfig,
    /// File contents at the release base.
    pub snapshot: &'a RepositorySnapshot,
}

impl UpdateContext<'_> {
    /// Repository-relative path of a package file.
    #[must_use]
    pub fn path(&self, file: &str) -> String {
        self.config.package_file(file)
    }
}

/// An ecosystem's release behaviour.
pub trait Strategy: fmt::Debug + Send + Sync {
    /// Short strategy name.
    fn name(&self) -> &'static str;

    /// Manifest the package name is read from, relative to the package path.
    fn manifest_path(&self) -> Option<&'static str> {
        None
    }

    /// Every file the strategy may read or write, relative to the package path.
    fn files(&self) -> Vec<&'static str>;

    /// Read the package name out of the manifest's content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed.
    fn parse_package_name(&self, _manifest: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Package name declared in the manifest at [`Strategy::manifest_path`],
    /// if the strategy has one and the snapshot holds it.
    ///
    /// # Errors
    ///
    /// Returns an error naming the manifest if it exists but cannot be parsed.
    fn manifest_package_name(
        &self,
        snapshot: &RepositorySnapshot,
        config: &ReleaseConfig,
    ) -> Result<Option<String>> {
        let Some(manifest) = self.manifest_path() else {
            return Ok(None);
        };
        let path = config.package_file(manifest);
        match snapshot.get(&path) {
            Some(content) => self
                .parse_package_name(content)
                .map_err(|e| e.at_path(&path)),
            None => Ok(None),
        }
    }

    /// Turn a package name into a component name.
    fn normalize_component(&self, name: &str) -> String {
        name.to_string()
    }

    /// Updates shared with other ecosystems built on this one.
    ///
    /// # Errors
    ///
    /// Returns an error if an updater cannot be configured from the snapshot.
    fn base_updates(&self, ctx: &UpdateContext<'_>) -> Result<Vec<Update>>;

    /// Ecosystem-specific updates that take precedence over the base set.
    ///
    /// # Errors
    ///
    /// Returns an error if an updater cannot be configured from the snapshot.
    fn overlay_updates(&self, _ctx: &UpdateContext<'_>) -> Result<Vec<Update>> {
        Ok(Vec::new())
    }
}

/// Look up a strategy by name.
///
/// # Errors
///
/// Returns [`Error::Config`] for an unknown name.
pub fn strategy_for(name: &str) -> Result<Box<dyn Strategy>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "simple" => Ok(Box::new(Simple)),
        "node" => Ok(Box::new(Node)),
        "expo" => Ok(Box::new(Expo::default())),
        "rust" => Ok(Box::new(Rust)),
        other => Err(Error::config(
            format!("Unknown release strategy: {other}"),
            format!("Use one of: {}", STRATEGY_NAMES.join(", ")),
        )),
    }
}

/// Repository-relative paths a release with this strategy touches.
///
/// The changelog comes first, then the strategy's files in declared order.
#[must_use]
pub fn managed_paths(strategy: &dyn Strategy, config: &ReleaseConfig) -> Vec<String> {
    let mut paths = vec![config.package_file(&config.changelog.path)];
    for file in strategy.files() {
        let path = config.package_file(file);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}
