//! npm packages.

use super::{Strategy, UpdateContext};
use crate::error::Result;
use crate::updaters::{PackageJson, PackageLockJson, SamplesPackageJson, Update};
use serde_json::Value;

pub(super) const PACKAGE_JSON: &str = "package.json";
const PACKAGE_LOCK: &str = "package-lock.json";
const SHRINKWRAP: &str = "npm-shrinkwrap.json";
const SAMPLES_PACKAGE_JSON: &str = "samples/package.json";

/// Strategy for npm packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Node;

impl Strategy for Node {
    fn name(&self) -> &'static str {
        "node"
    }

    fn manifest_path(&self) -> Option<&'static str> {
        Some(PACKAGE_JSON)
    }

    fn files(&self) -> Vec<&'static str> {
        vec![PACKAGE_JSON, PACKAGE_LOCK, SHRINKWRAP, SAMPLES_PACKAGE_JSON]
    }

    fn parse_package_name(&self, manifest: &str) -> Result<Option<String>> {
        let manifest: Value = serde_json::from_str(manifest)?;
        Ok(manifest
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Drops the npm scope: `@acme/widgets` becomes `widgets`.
    fn normalize_component(&self, name: &str) -> String {
        match name.strip_prefix('@').and_then(|n| n.split_once('/')) {
            Some((_, unscoped)) => unscoped.to_string(),
            None => name.to_string(),
        }
    }

    fn base_updates(&self, ctx: &UpdateContext<'_>) -> Result<Vec<Update>> {
        let version = ctx.version;
        Ok(vec![
            Update::new(ctx.path(PACKAGE_JSON), PackageJson::new(version.clone())),
            Update::optional(ctx.path(PACKAGE_LOCK), PackageLockJson::new(version.clone())),
            Update::optional(ctx.path(SHRINKWRAP), PackageLockJson::new(version.clone())),
            Update::optional(
                ctx.path(SAMPLES_PACKAGE_JSON),
                SamplesPackageJson::new(version.clone(), ctx.package_name),
            ),
        ])
    }
}
