//! Cargo crates.

use super::{Strategy, UpdateContext};
use crate::error::Result;
use crate::updaters::{CargoLock, CargoToml, Update};

const CARGO_TOML: &str = "Cargo.toml";
const CARGO_LOCK: &str = "Cargo.lock";

/// Strategy for a single Cargo crate or a workspace with a shared version.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rust;

impl Strategy for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn manifest_path(&self) -> Option<&'static str> {
        Some(CARGO_TOML)
    }

    fn files(&self) -> Vec<&'static str> {
        vec![CARGO_TOML, CARGO_LOCK]
    }

    fn parse_package_name(&self, manifest: &str) -> Result<Option<String>> {
        let doc: toml::Value = toml::from_str(manifest)?;
        Ok(doc
            .get("package")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .map(str::to_string))
    }

    fn base_updates(&self, ctx: &UpdateContext<'_>) -> Result<Vec<Update>> {
        Ok(vec![
            Update::new(ctx.path(CARGO_TOML), CargoToml::new(ctx.version.clone())),
            Update::new(
                ctx.path(CARGO_LOCK),
                CargoLock::new(ctx.version.clone(), ctx.package_name),
            ),
        ])
    }
}
