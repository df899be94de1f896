//! Repositories that only track a `version.txt`.

use super::{Strategy, UpdateContext};
use crate::error::Result;
use crate::updaters::{Update, VersionTxt};

/// Strategy with no ecosystem manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simple;

impl Strategy for Simple {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn files(&self) -> Vec<&'static str> {
        vec!["version.txt"]
    }

    fn base_updates(&self, ctx: &UpdateContext<'_>) -> Result<Vec<Update>> {
        Ok(vec![Update::new(
            ctx.path("version.txt"),
            VersionTxt::new(ctx.version.clone()),
        )])
    }
}
