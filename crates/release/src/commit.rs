//! Commit and release-tag data model.
//!
//! These types are consumed, not computed, by the release core: commits come
//! from an external conventional-commit parser and the prior release from the
//! source-control host.

use crate::config::TagConfig;
use crate::error::{Error, Result};
use crate::version::Version;
use std::fmt;
use std::str::FromStr;

/// Conventional commit type.
///
/// Only `feat` and `fix` influence the version bump directly; every other
/// type (including types nobody has heard of) is carried as [`CommitType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommitType {
    /// A new feature (`feat`).
    Feat,
    /// A bug fix (`fix`).
    Fix,
    /// Any other type (`chore`, `docs`, `perf`, unparseable subjects, ...).
    Other(String),
}

impl CommitType {
    /// The lowercase type string as it appears in a commit subject.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for CommitType {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "feat" | "feature" => Self::Feat,
            "fix" => Self::Fix,
            _ => Self::Other(normalized),
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured conventional commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The commit type.
    pub commit_type: CommitType,
    /// Whether this commit carries a breaking-change marker.
    pub breaking: bool,
    /// Optional scope from `type(scope): ...`.
    pub scope: Option<String>,
    /// The commit description.
    pub message: String,
    /// The full commit hash.
    pub sha: String,
}

impl Commit {
    /// Create a commit from its parts.
    #[must_use]
    pub fn new(
        commit_type: impl Into<CommitType>,
        message: impl Into<String>,
        sha: impl Into<String>,
    ) -> Self {
        Self {
            commit_type: commit_type.into(),
            breaking: false,
            scope: None,
            message: message.into(),
            sha: sha.into(),
        }
    }

    /// Mark the commit as breaking.
    #[must_use]
    pub const fn mark_breaking(mut self) -> Self {
        self.breaking = true;
        self
    }

    /// Set the commit scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Abbreviated hash used in changelog entries.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

/// A release tag: a version plus the component it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseTag {
    /// Released version.
    pub version: Version,
    /// Component name, disambiguating packages in a multi-package repository.
    pub component: Option<String>,
}

impl ReleaseTag {
    /// Create a tag for a component.
    #[must_use]
    pub fn new(version: Version, component: impl Into<String>) -> Self {
        Self {
            version,
            component: Some(component.into()),
        }
    }

    /// Create a tag that carries no component.
    #[must_use]
    pub const fn bare(version: Version) -> Self {
        Self {
            version,
            component: None,
        }
    }

    /// Parse a tag name such as `web-v1.2.3` or `web@1.2.3`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] if no version can be read from the tag.
    pub fn parse(tag: &str) -> Result<Self> {
        tag.parse()
    }

    /// Render the tag name using the given tag format.
    #[must_use]
    pub fn format(&self, config: &TagConfig) -> String {
        let v = if config.include_v { "v" } else { "" };
        match (&self.component, config.include_component) {
            (Some(component), true) if !component.is_empty() => {
                format!("{component}{}{v}{}", config.separator, self.version)
            }
            _ => format!("{v}{}", self.version),
        }
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&TagConfig::default()))
    }
}

impl FromStr for ReleaseTag {
    type Err = Error;

    /// Parse `v1.2.3`, `1.2.3`, `component-v1.2.3`, or `component@1.2.3`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(version) = s.parse::<Version>() {
            return Ok(Self::bare(version));
        }

        // A prerelease may itself contain `-v`, so try every split point and
        // keep the first whose remainder is a version.
        s.match_indices("-v")
            .map(|(idx, _)| (&s[..idx], &s[idx + 2..]))
            .chain(s.rsplit_once('@'))
            .chain(s.rsplit_once('-'))
            .filter(|(component, _)| !component.is_empty())
            .find_map(|(component, version)| {
                version
                    .parse::<Version>()
                    .ok()
                    .map(|version| Self::new(version, component))
            })
            .ok_or_else(|| Error::invalid_version(s))
    }
}

/// The most recent published release, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorRelease {
    /// Tag of the release.
    pub tag: ReleaseTag,
    /// Commit the release was cut from.
    pub sha: String,
    /// Release notes as published.
    pub notes: String,
}

impl PriorRelease {
    /// Create a prior release descriptor.
    #[must_use]
    pub fn new(tag: ReleaseTag, sha: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            tag,
            sha: sha.into(),
            notes: notes.into(),
        }
    }

    /// Build a prior release from a raw tag name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] if the tag does not carry a valid version.
    pub fn from_tag_name(
        tag: &str,
        sha: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(tag.parse()?, sha, notes))
    }
}
