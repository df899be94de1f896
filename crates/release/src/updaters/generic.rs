//! Plain-text version file.

use super::ContentUpdater;
use crate::error::Result;
use crate::version::Version;

/// Replaces `version.txt` with the bare version and a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTxt {
    version: Version,
}

impl VersionTxt {
    /// Create the updater.
    #[must_use]
    pub const fn new(version: Version) -> Self {
        Self { version }
    }
}

impl ContentUpdater for VersionTxt {
    fn update_content(&self, _content: Option<&str>) -> Result<String> {
        Ok(format!("{}\n", self.version))
    }
}
