//! Next-version computation.
//!
//! Maps a prior version (or none) and an ordered commit list to the next
//! version. Everything here is pure: no I/O, no clock, no randomness.

use crate::commit::{Commit, CommitType};
use crate::config::{MajorZeroPolicy, VersioningConfig, VersioningStrategy};
use crate::error::Result;
use crate::version::{BumpType, Version};
use tracing::debug;

/// Strongest release signal present in a commit set.
///
/// Variants are ordered by precedence: breaking > feature > fix/other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommitClass {
    /// Fixes and every commit type that is not a feature.
    Other,
    /// At least one `feat` commit.
    Feature,
    /// At least one breaking commit.
    Breaking,
}

impl CommitClass {
    /// Classify a single commit.
    #[must_use]
    pub fn of(commit: &Commit) -> Self {
        if commit.breaking {
            return Self::Breaking;
        }
        match commit.commit_type {
            CommitType::Feat => Self::Feature,
            // Unknown types land here rather than failing
            CommitType::Fix | CommitType::Other(_) => Self::Other,
        }
    }

    /// Classify a commit set by its highest-priority signal.
    #[must_use]
    pub fn of_all(commits: &[Commit]) -> Self {
        commits.iter().map(Self::of).max().unwrap_or(Self::Other)
    }
}

/// Pure version-bump policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersioningPolicy {
    strategy: VersioningStrategy,
    major_zero: MajorZeroPolicy,
    bump_patch_for_minor_pre_major: bool,
}

impl VersioningPolicy {
    /// Create a policy with the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from versioning configuration.
    #[must_use]
    pub const fn from_config(config: &VersioningConfig) -> Self {
        Self {
            strategy: config.strategy,
            major_zero: config.major_zero,
            bump_patch_for_minor_pre_major: config.bump_patch_for_minor_pre_major,
        }
    }

    /// Set the bump strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: VersioningStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the 0.x breaking-change policy.
    #[must_use]
    pub const fn with_major_zero(mut self, major_zero: MajorZeroPolicy) -> Self {
        self.major_zero = major_zero;
        self
    }

    /// Make features on 0.x bump only the patch component.
    #[must_use]
    pub const fn with_patch_for_minor_pre_major(mut self, enabled: bool) -> Self {
        self.bump_patch_for_minor_pre_major = enabled;
        self
    }

    /// Decide which component to bump from `prior` for this commit set.
    #[must_use]
    pub fn bump_type(&self, prior: &Version, commits: &[Commit]) -> BumpType {
        match self.strategy {
            VersioningStrategy::AlwaysBumpPatch => return BumpType::Patch,
            VersioningStrategy::AlwaysBumpMinor => return BumpType::Minor,
            VersioningStrategy::AlwaysBumpMajor => return BumpType::Major,
            VersioningStrategy::Default => {}
        }

        let pre_major = prior.is_initial_development();
        let breaking_bumps_minor = self.major_zero == MajorZeroPolicy::BreakingBumpsMinor;
        match CommitClass::of_all(commits) {
            CommitClass::Breaking if pre_major && breaking_bumps_minor => BumpType::Minor,
            CommitClass::Breaking => BumpType::Major,
            CommitClass::Feature if pre_major && self.bump_patch_for_minor_pre_major => {
                BumpType::Patch
            }
            CommitClass::Feature => BumpType::Minor,
            CommitClass::Other => BumpType::Patch,
        }
    }

    /// Compute the next version.
    ///
    /// With no prior release, `default_initial` is returned unchanged and the
    /// commits are not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`](crate::Error::InvalidVersion) when
    /// the bumped component of `prior` would overflow.
    pub fn compute_next_version(
        &self,
        prior: Option<&Version>,
        commits: &[Commit],
        default_initial: &Version,
    ) -> Result<Version> {
        let Some(prior) = prior else {
            debug!(initial = %default_initial, "No prior release, using initial version");
            return Ok(default_initial.clone());
        };

        let bump = self.bump_type(prior, commits);
        let next = prior.bump(bump)?;
        debug!(
            prior = %prior,
            bump = %bump,
            next = %next,
            commits = commits.len(),
            "Computed next version"
        );
        Ok(next)
    }
}

/// Compute the next version with the default policy.
///
/// # Errors
///
/// See [`VersioningPolicy::compute_next_version`].
pub fn compute_next_version(
    prior: Option<&Version>,
    commits: &[Commit],
    default_initial: &Version,
) -> Result<Version> {
    VersioningPolicy::new().compute_next_version(prior, commits, default_initial)
}
