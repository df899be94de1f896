//! Markdown changelog updater.

use super::ContentUpdater;
use crate::error::Result;
use crate::version::Version;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

const HEADER: &str = "# Changelog";

/// First release heading of an existing changelog (`## 1.2.3`, `### [1.2.3]`).
static RELEASE_HEADING: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?m)^###? v?\[?[0-9]")
        .inspect_err(|e| warn!(error = %e, "Release heading pattern failed to compile"))
        .ok()
});

/// Prepends a release entry to a changelog, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    version: Version,
    entry: String,
}

impl Changelog {
    /// Create the updater with a rendered entry.
    #[must_use]
    pub fn new(version: Version, entry: impl Into<String>) -> Self {
        Self {
            version,
            entry: entry.into(),
        }
    }

    /// Version the entry belongs to.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// The rendered entry.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }
}

impl ContentUpdater for Changelog {
    fn update_content(&self, content: Option<&str>) -> Result<String> {
        let entry = self.entry.trim();
        let existing = content.unwrap_or_default();
        if existing.trim().is_empty() {
            return Ok(format!("{HEADER}\n\n{entry}\n"));
        }

        let split = RELEASE_HEADING
            .as_ref()
            .and_then(|re| re.find(existing))
            .map(|m| m.start());

        let mut out = match split {
            Some(at) => {
                let (before, after) = existing.split_at(at);
                format!("{}\n\n{entry}\n\n{after}", before.trim_end())
            }
            None => format!("{}\n\n{entry}\n", existing.trim_end()),
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updater() -> Changelog {
        Changelog::new(Version::new(1, 1, 0), "## 1.1.0 (2024-05-01)\n\n\n### Features\n\n* new")
    }

    #[test]
    fn test_release_heading_pattern_compiles() {
        let re = RELEASE_HEADING.as_ref().unwrap();
        assert!(re.is_match("## 1.0.0 (2024-01-01)"));
        assert!(re.is_match("### [2.0.0](https://example.com)"));
        assert!(!re.is_match("# Changelog"));
        assert!(!re.is_match("### Features"));
    }

    #[test]
    fn test_creates_changelog() {
        let updated = updater().update_content(None).unwrap();
        assert_eq!(
            updated,
            "# Changelog\n\n## 1.1.0 (2024-05-01)\n\n\n### Features\n\n* new\n"
        );
    }

    #[test]
    fn test_inserts_above_previous_release() {
        let existing = "# Changelog\n\n## 1.0.0 (2024-01-01)\n\n* first\n";
        let updated = updater().update_content(Some(existing)).unwrap();
        assert_eq!(
            updated,
            "# Changelog\n\n## 1.1.0 (2024-05-01)\n\n\n### Features\n\n* new\n\n\
             ## 1.0.0 (2024-01-01)\n\n* first\n"
        );
    }

    #[test]
    fn test_inserts_above_linked_heading() {
        let existing =
            "# Changelog\n\nIntro text.\n\n### [1.0.0](https://x/compare) (2024-01-01)\n";
        let updated = updater().update_content(Some(existing)).unwrap();
        let new_at = updated.find("## 1.1.0").unwrap();
        let old_at = updated.find("### [1.0.0]").unwrap();
        assert!(updated.starts_with("# Changelog\n\nIntro text.\n\n## 1.1.0"));
        assert!(new_at < old_at);
    }

    #[test]
    fn test_appends_without_release_heading() {
        let existing = "# Changelog\n\nNotes go here.";
        let updated = updater().update_content(Some(existing)).unwrap();
        assert!(updated.starts_with("# Changelog\n\nNotes go here.\n\n## 1.1.0"));
        assert!(updated.ends_with("* new\n"));
    }

    #[test]
    fn test_entry_headings_are_not_release_headings() {
        // "### Features" must not be mistaken for a release heading
        let existing = "# Changelog\n\n### Features\n";
        let updated = updater().update_content(Some(existing)).unwrap();
        assert!(updated.starts_with("# Changelog\n\n### Features\n\n## 1.1.0"));
    }
}
