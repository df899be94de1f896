//! Expo apps: npm packages plus an `app.json`.

use super::node::PACKAGE_JSON;
use super::{Node, Strategy, UpdateContext};
use crate::error::{Error, Result};
use crate::updaters::{AppJson, Update};
use crate::version::Version;
use serde_json::Value;
use tracing::debug;

const APP_JSON: &str = "app.json";

/// Strategy for Expo apps.
///
/// Everything npm-related is delegated to the wrapped [`Node`] strategy; the
/// overlay adds `app.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expo {
    node: Node,
}

impl Expo {
    /// Wrap a Node strategy.
    #[must_use]
    pub const fn new(node: Node) -> Self {
        Self { node }
    }
}

impl Strategy for Expo {
    fn name(&self) -> &'static str {
        "expo"
    }

    fn manifest_path(&self) -> Option<&'static str> {
        self.node.manifest_path()
    }

    fn files(&self) -> Vec<&'static str> {
        let mut files = self.node.files();
        files.push(APP_JSON);
        files
    }

    fn parse_package_name(&self, manifest: &str) -> Result<Option<String>> {
        self.node.parse_package_name(manifest)
    }

    fn normalize_component(&self, name: &str) -> String {
        self.node.normalize_component(name)
    }

    fn base_updates(&self, ctx: &UpdateContext<'_>) -> Result<Vec<Update>> {
        self.node.base_updates(ctx)
    }

    fn overlay_updates(&self, ctx: &UpdateContext<'_>) -> Result<Vec<Update>> {
        let sdk = expo_sdk_version(ctx)?;
        debug!(sdk = %sdk, "Detected Expo SDK version");
        Ok(vec![Update::new(
            ctx.path(APP_JSON),
            AppJson::new(ctx.version.clone(), sdk),
        )])
    }
}

/// Read the Expo SDK version from the `expo` dependency of `package.json`.
///
/// The dependency is a requirement such as `~44.0.0`; its first comparator
/// supplies the version, with omitted parts read as zero.
fn expo_sdk_version(ctx: &UpdateContext<'_>) -> Result<Version> {
    let path = ctx.path(PACKAGE_JSON);
    let content = ctx
        .snapshot
        .get(&path)
        .ok_or_else(|| Error::not_found(&path))?;
    let manifest: Value =
        serde_json::from_str(content).map_err(|e| Error::from(e).at_path(&path))?;

    let requirement = manifest
        .get("dependencies")
        .and_then(|deps| deps.get("expo"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::manifest("No `expo` dependency declared", Some(path.clone())))?;

    let parsed = semver::VersionReq::parse(requirement).map_err(|e| {
        Error::manifest(
            format!("Cannot read Expo SDK version from `{requirement}`: {e}"),
            Some(path.clone()),
        )
    })?;
    let comparator = parsed.comparators.first().ok_or_else(|| {
        Error::manifest(
            format!("Expo dependency `{requirement}` names no version"),
            Some(path.clone()),
        )
    })?;

    Ok(Version::new(
        comparator.major,
        comparator.minor.unwrap_or(0),
        comparator.patch.unwrap_or(0),
    ))
}
