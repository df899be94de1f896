//! Base + overlay composition of updates.
//!
//! The registry holds two layers. Resolution walks the base layer, then the
//! overlay layer, keeping one entry per path: a later entry for a path that
//! is already present replaces it in its original slot, a new path is
//! appended. Overlays therefore win over base entries without moving them.

use crate::error::Result;
use crate::strategy::{Strategy, UpdateContext};
use crate::updaters::{Changelog, Update};
use tracing::debug;

/// Ordered base and overlay update sets for one release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdaterRegistry {
    base: Vec<Update>,
    overlay: Vec<Update>,
}

impl UpdaterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries to the base layer.
    #[must_use]
    pub fn with_base(mut self, updates: impl IntoIterator<Item = Update>) -> Self {
        self.base.extend(updates);
        self
    }

    /// Append entries to the overlay layer.
    #[must_use]
    pub fn with_overlay(mut self, updates: impl IntoIterator<Item = Update>) -> Self {
        self.overlay.extend(updates);
        self
    }

    /// Merge both layers into the final update list.
    #[must_use]
    pub fn resolve(self) -> Vec<Update> {
        let mut resolved: Vec<Update> = Vec::with_capacity(self.base.len() + self.overlay.len());
        for (layer, updates) in [("base", self.base), ("overlay", self.overlay)] {
            for update in updates {
                match resolved.iter_mut().find(|u| u.path == update.path) {
                    Some(slot) => {
                        debug!(
                            path = %update.path,
                            layer,
                            replaced = slot.updater.kind(),
                            by = update.updater.kind(),
                            "Replacing update"
                        );
                        *slot = update;
                    }
                    None => resolved.push(update),
                }
            }
        }
        resolved
    }

    /// Build the complete update list for a strategy.
    ///
    /// The changelog always leads the base layer and may be created.
    ///
    /// # Errors
    ///
    /// Propagates errors from the strategy's update builders.
    pub fn build_updates(strategy: &dyn Strategy, ctx: &UpdateContext<'_>) -> Result<Vec<Update>> {
        let changelog = Update::creating(
            ctx.path(&ctx.config.changelog.path),
            Changelog::new(ctx.version.clone(), ctx.notes),
        );
        let registry = Self::new()
            .with_base([changelog])
            .with_base(strategy.base_updates(ctx)?)
            .with_overlay(strategy.overlay_updates(ctx)?);
        Ok(registry.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseConfig;
    use crate::snapshot::RepositorySnapshot;
    use crate::strategy::{Expo, Node};
    use crate::updaters::{PackageJson, Updater, VersionTxt, WhenMissing};
    use crate::version::Version;

    fn v(patch: u64) -> Version {
        Version::new(1, 0, patch)
    }

    #[test]
    fn test_overlay_replaces_in_place() {
        let updates = UpdaterRegistry::new()
            .with_base([
                Update::new("a.json", PackageJson::new(v(1))),
                Update::new("b.txt", VersionTxt::new(v(1))),
            ])
            .with_overlay([
                Update::new("a.json", VersionTxt::new(v(2))),
                Update::new("c.txt", VersionTxt::new(v(2))),
            ])
            .resolve();

        let paths: Vec<&str> = updates.iter().map(|u| u.path.as_str()).collect();
        assert_eq!(paths, ["a.json", "b.txt", "c.txt"]);
        assert_eq!(updates[0].updater, Updater::from(VersionTxt::new(v(2))));
    }

    #[test]
    fn test_last_declaration_wins_within_layer() {
        let updates = UpdaterRegistry::new()
            .with_base([
                Update::new("a.txt", VersionTxt::new(v(1))),
                Update::new("a.txt", VersionTxt::new(v(3))),
            ])
            .resolve();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].updater, Updater::from(VersionTxt::new(v(3))));
    }

    #[test]
    fn test_build_updates_expo_order() {
        let snapshot = RepositorySnapshot::new("acme/app").with_file(
            "package.json",
            r#"{"name": "app", "dependencies": {"expo": "~44.0.0"}}"#,
        );
        let config = ReleaseConfig::default();
        let version = Version::new(1, 0, 0);
        let ctx = UpdateContext {
            version: &version,
            commits: &[],
            component: "app",
            package_name: "app",
            notes: "## 1.0.0",
            config: &config,
            snapshot: &snapshot,
        };

        let updates = UpdaterRegistry::build_updates(&Expo::new(Node), &ctx).unwrap();
        let kinds: Vec<(&str, &str)> = updates
            .iter()
            .map(|u| (u.path.as_str(), u.updater.kind()))
            .collect();
        assert_eq!(
            kinds,
            [
                ("CHANGELOG.md", "changelog"),
                ("package.json", "package-json"),
                ("package-lock.json", "package-lock-json"),
                ("npm-shrinkwrap.json", "package-lock-json"),
                ("samples/package.json", "samples-package-json"),
                ("app.json", "app-json"),
            ]
        );
        let missing: Vec<WhenMissing> = updates.iter().map(|u| u.when_missing).collect();
        assert_eq!(
            missing,
            [
                WhenMissing::Create,
                WhenMissing::Fail,
                WhenMissing::Ignore,
                WhenMissing::Ignore,
                WhenMissing::Ignore,
                WhenMissing::Fail,
            ]
        );
    }
}
