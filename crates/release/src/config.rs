//! Release configuration types.
//!
//! This module defines the Rust representations of the release configuration.
//! Reading the file is up to the caller; [`ReleaseConfig::from_toml_str`]
//! turns its contents into a config.

use crate::error::{Error, Result};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the next version is derived from the commit history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersioningStrategy {
    /// Breaking > feature > fix precedence (default).
    #[default]
    Default,
    /// Always bump the patch component.
    AlwaysBumpPatch,
    /// Always bump the minor component.
    AlwaysBumpMinor,
    /// Always bump the major component.
    AlwaysBumpMajor,
}

impl fmt::Display for VersioningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::AlwaysBumpPatch => write!(f, "always-bump-patch"),
            Self::AlwaysBumpMinor => write!(f, "always-bump-minor"),
            Self::AlwaysBumpMajor => write!(f, "always-bump-major"),
        }
    }
}

/// Treatment of breaking changes while the major version is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MajorZeroPolicy {
    /// A breaking change on 0.x bumps the minor component (default).
    ///
    /// Breaking changes before 1.0 are not treated as API breaks.
    #[default]
    BreakingBumpsMinor,

    /// A breaking change on 0.x bumps to 1.0.0, as for any other major.
    Strict,
}

impl fmt::Display for MajorZeroPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreakingBumpsMinor => write!(f, "breaking-bumps-minor"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// What to do when a file required by an update is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingFilePolicy {
    /// Fail the whole build (default).
    #[default]
    Abort,
    /// Drop that single update and continue.
    Skip,
}

/// Complete release configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReleaseConfig {
    /// Explicit component name for tags.
    pub component: Option<String>,
    /// Explicit package name.
    pub package_name: Option<String>,
    /// Directory of the package inside the repository.
    pub package_path: Option<String>,
    /// Commit types that justify a release; `None` means every commit does.
    pub releasable_types: Option<Vec<String>>,
    /// Policy for updates whose file is missing.
    pub missing_files: MissingFilePolicy,
    /// Git-related release settings.
    pub git: ReleaseGitConfig,
    /// Version computation settings.
    pub versioning: VersioningConfig,
    /// Changelog generation configuration.
    pub changelog: ChangelogConfig,
}

impl ReleaseConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or does not match the schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Prefix a repository-relative file name with the package path.
    #[must_use]
    pub fn package_file(&self, file: &str) -> String {
        match self.package_path.as_deref().map(|p| p.trim_matches('/')) {
            None | Some("" | ".") => file.to_string(),
            Some(dir) => format!("{dir}/{file}"),
        }
    }

    /// Whether a commit type is release-worthy under this configuration.
    #[must_use]
    pub fn is_releasable_type(&self, commit_type: &str) -> bool {
        self.releasable_types
            .as_ref()
            .is_none_or(|types| types.iter().any(|t| t.eq_ignore_ascii_case(commit_type)))
    }
}

/// Git-related release configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReleaseGitConfig {
    /// Branch the release pull request targets.
    pub target_branch: String,
    /// Tag naming options.
    pub tag: TagConfig,
}

impl Default for ReleaseGitConfig {
    fn default() -> Self {
        Self {
            target_branch: "main".to_string(),
            tag: TagConfig::default(),
        }
    }
}

/// Tag naming options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TagConfig {
    /// Whether the component name is part of the tag.
    pub include_component: bool,
    /// Whether the version is prefixed with `v`.
    pub include_v: bool,
    /// Separator between component and version.
    pub separator: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            include_component: true,
            include_v: true,
            separator: "-".to_string(),
        }
    }
}

/// Version computation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VersioningConfig {
    /// Bump strategy.
    pub strategy: VersioningStrategy,
    /// Breaking-change handling for 0.x versions.
    pub major_zero: MajorZeroPolicy,
    /// Whether a feature on 0.x bumps only the patch component.
    pub bump_patch_for_minor_pre_major: bool,
    /// Version used when nothing has been released yet.
    pub initial_version: Version,
    /// Forced version for the next release.
    pub release_as: Option<Version>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            strategy: VersioningStrategy::Default,
            major_zero: MajorZeroPolicy::BreakingBumpsMinor,
            bump_patch_for_minor_pre_major: false,
            initial_version: Version::new(1, 0, 0),
            release_as: None,
        }
    }
}

/// A changelog section: which commit type it collects and its heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogSection {
    /// Commit type collected by this section.
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Section heading.
    pub section: String,
    /// Hidden sections are omitted unless they hold a breaking change.
    #[serde(default)]
    pub hidden: bool,
}

impl ChangelogSection {
    pub(crate) fn new(commit_type: &str, section: &str, hidden: bool) -> Self {
        Self {
            commit_type: commit_type.to_string(),
            section: section.to_string(),
            hidden,
        }
    }
}

/// Changelog generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChangelogConfig {
    /// Path to the CHANGELOG file relative to the package root.
    pub path: String,
    /// Ordered section list.
    pub sections: Vec<ChangelogSection>,
    /// Repository web URL, used for compare and commit links.
    pub repository_url: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            path: "CHANGELOG.md".to_string(),
            sections: default_sections(),
            repository_url: None,
        }
    }
}

impl ChangelogConfig {
    /// Find the section collecting a commit type.
    #[must_use]
    pub fn section_for(&self, commit_type: &str) -> Option<&ChangelogSection> {
        self.sections
            .iter()
            .find(|s| s.commit_type.eq_ignore_ascii_case(commit_type))
    }
}

fn default_sections() -> Vec<ChangelogSection> {
    vec![
        ChangelogSection::new("feat", "Features", false),
        ChangelogSection::new("fix", "Bug Fixes", false),
        ChangelogSection::new("perf", "Performance Improvements", false),
        ChangelogSection::new("revert", "Reverts", false),
        ChangelogSection::new("docs", "Documentation", true),
        ChangelogSection::new("style", "Styles", true),
        ChangelogSection::new("chore", "Miscellaneous Chores", true),
        ChangelogSection::new("refactor", "Code Refactoring", true),
        ChangelogSection::new("test", "Tests", true),
        ChangelogSection::new("build", "Build System", true),
        ChangelogSection::new("ci", "Continuous Integration", true),
    ]
}

/// Reject configurations that cannot produce a valid release.
///
/// # Errors
///
/// Returns [`Error::Config`] naming the offending setting.
pub fn validate(config: &ReleaseConfig) -> Result<()> {
    if config.git.target_branch.trim().is_empty() {
        return Err(Error::config(
            "git.target-branch is empty",
            "Set git.target-branch to the branch releases are cut from",
        ));
    }
    if config.changelog.path.trim().is_empty() {
        return Err(Error::config(
            "changelog.path is empty",
            "Set changelog.path, e.g. \"CHANGELOG.md\"",
        ));
    }
    Ok(())
}
