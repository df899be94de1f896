//! Release pull request builder.
//!
//! Coordinates version computation, changelog rendering and update
//! composition into a single [`ReleasePullRequest`]. The builder reads file
//! contents only from its [`RepositorySnapshot`]; it never touches the
//! network or the filesystem.

use crate::changelog::ChangelogGenerator;
use crate::commit::{Commit, PriorRelease, ReleaseTag};
use crate::config::{self, MissingFilePolicy, ReleaseConfig};
use crate::error::{Error, Result};
use crate::registry::UpdaterRegistry;
use crate::resolve::{ResolvedNames, resolve_names};
use crate::snapshot::RepositorySnapshot;
use crate::strategy::{Strategy, UpdateContext};
use crate::updaters::Update;
use crate::version::Version;
use crate::versioning::VersioningPolicy;
use chrono::NaiveDate;
use std::fmt;
use tracing::{debug, info, warn};

/// New content for one file of the release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Repository-relative path.
    pub path: String,
    /// Full new content.
    pub content: String,
    /// Whether the file did not exist before.
    pub created: bool,
}

/// Everything needed to open a release pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePullRequest {
    /// Version being released.
    pub version: Version,
    /// Tag the release will carry.
    pub tag: ReleaseTag,
    /// Rendered tag name.
    pub tag_name: String,
    /// Pull request title.
    pub title: String,
    /// Branch the pull request is opened from.
    pub head_branch: String,
    /// Changelog entry for this release.
    pub notes: String,
    /// Intended file edits, one per path.
    pub updates: Vec<Update>,
    /// Rendered content of each update, in the same order.
    pub changes: Vec<FileChange>,
}

/// Why no release was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No commits since the prior release.
    NoCommits,
    /// None of the commits has a releasable type.
    NoReleasableCommits,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCommits => write!(f, "no commits since the last release"),
            Self::NoReleasableCommits => write!(f, "no releasable commits"),
        }
    }
}

/// Result of [`ReleasePullRequestBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A release is due.
    Release(Box<ReleasePullRequest>),
    /// Nothing to release; not an error.
    Skip(SkipReason),
}

impl BuildOutcome {
    /// The built pull request, if any.
    #[must_use]
    pub fn release(&self) -> Option<&ReleasePullRequest> {
        match self {
            Self::Release(pr) => Some(pr),
            Self::Skip(_) => None,
        }
    }

    /// Take the built pull request, if any.
    #[must_use]
    pub fn into_release(self) -> Option<ReleasePullRequest> {
        match self {
            Self::Release(pr) => Some(*pr),
            Self::Skip(_) => None,
        }
    }

    /// Whether the build was skipped.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }
}

/// Builds release pull requests for one package.
#[derive(Debug)]
pub struct ReleasePullRequestBuilder {
    strategy: Box<dyn Strategy>,
    config: ReleaseConfig,
    snapshot: RepositorySnapshot,
    release_date: NaiveDate,
}

impl ReleasePullRequestBuilder {
    /// Create a builder with the default configuration.
    #[must_use]
    pub fn new(
        strategy: Box<dyn Strategy>,
        snapshot: RepositorySnapshot,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            strategy,
            config: ReleaseConfig::default(),
            snapshot,
            release_date,
        }
    }

    /// Use a specific release configuration.
    #[must_use]
    pub fn with_config(mut self, config: ReleaseConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    /// Returns the strategy in use.
    #[must_use]
    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    /// Build the release pull request for `commits` since `prior`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - A forced version is lower than the prior version
    /// - A required file is missing and `missing-files` is `abort`
    /// - A manifest cannot be parsed or lacks a field an updater rewrites
    pub fn build(&self, commits: &[Commit], prior: Option<&PriorRelease>) -> Result<BuildOutcome> {
        config::validate(&self.config)?;

        if let Some(reason) = self.skip_reason(commits) {
            info!(strategy = self.strategy.name(), %reason, "Skipping release");
            return Ok(BuildOutcome::Skip(reason));
        }

        let names = resolve_names(self.strategy.as_ref(), &self.config, &self.snapshot)?;
        let version = self.next_version(commits, prior)?;
        let tag_config = &self.config.git.tag;
        let tag = ReleaseTag::new(version.clone(), names.component.value.clone());
        let tag_name = tag.format(tag_config);
        let previous_tag = prior.map(|p| p.tag.format(tag_config));

        let notes = ChangelogGenerator::new(self.config.changelog.clone())
            .entry(&version, &tag_name, previous_tag, self.release_date, commits)
            .to_markdown();

        let ctx = UpdateContext {
            version: &version,
            commits,
            component: &names.component.value,
            package_name: &names.package_name.value,
            notes: &notes,
            config: &self.config,
            snapshot: &self.snapshot,
        };
        let updates = UpdaterRegistry::build_updates(self.strategy.as_ref(), &ctx)?;
        let (updates, changes) = self.render(updates)?;

        info!(
            strategy = self.strategy.name(),
            version = %version,
            tag = %tag_name,
            files = changes.len(),
            "Built release pull request"
        );

        Ok(BuildOutcome::Release(Box::new(ReleasePullRequest {
            title: self.title(&names, &version),
            head_branch: self.head_branch(&names),
            version,
            tag,
            tag_name,
            notes,
            updates,
            changes,
        })))
    }

    fn skip_reason(&self, commits: &[Commit]) -> Option<SkipReason> {
        if commits.is_empty() {
            return Some(SkipReason::NoCommits);
        }
        if self.config.releasable_types.is_some()
            && !commits
                .iter()
                .any(|c| c.breaking || self.config.is_releasable_type(c.commit_type.as_str()))
        {
            return Some(SkipReason::NoReleasableCommits);
        }
        None
    }

    fn next_version(&self, commits: &[Commit], prior: Option<&PriorRelease>) -> Result<Version> {
        let prior_version = prior.map(|p| &p.tag.version);
        let versioning = &self.config.versioning;

        if let Some(forced) = &versioning.release_as {
            if let Some(prior) = prior_version
                && forced < prior
            {
                return Err(Error::config(
                    format!("release-as {forced} is lower than the prior release {prior}"),
                    "Raise versioning.release-as or remove it",
                ));
            }
            debug!(version = %forced, "Using forced release version");
            return Ok(forced.clone());
        }

        VersioningPolicy::from_config(versioning).compute_next_version(
            prior_version,
            commits,
            &versioning.initial_version,
        )
    }

    /// Apply every update to the snapshot, honouring the missing-file policy.
    fn render(&self, updates: Vec<Update>) -> Result<(Vec<Update>, Vec<FileChange>)> {
        let mut kept = Vec::with_capacity(updates.len());
        let mut changes = Vec::with_capacity(updates.len());

        for update in updates {
            let existing = self.snapshot.get(&update.path);
            match update.apply(existing) {
                Ok(Some(content)) => {
                    changes.push(FileChange {
                        path: update.path.clone(),
                        content,
                        created: existing.is_none(),
                    });
                    kept.push(update);
                }
                Ok(None) => {
                    debug!(path = %update.path, "Optional file absent");
                }
                Err(e)
                    if e.is_not_found()
                        && self.config.missing_files == MissingFilePolicy::Skip =>
                {
                    warn!(path = %update.path, "Skipping update of missing file");
                }
                Err(e) => return Err(e),
            }
        }

        Ok((kept, changes))
    }

    fn title(&self, names: &ResolvedNames, version: &Version) -> String {
        let branch = &self.config.git.target_branch;
        if self.config.git.tag.include_component {
            format!("chore({branch}): release {} {version}", names.component.value)
        } else {
            format!("chore({branch}): release {version}")
        }
    }

    fn head_branch(&self, names: &ResolvedNames) -> String {
        let branch = &self.config.git.target_branch;
        if self.config.git.tag.include_component {
            format!("release--{branch}--{}", names.component.value)
        } else {
            format!("release--{branch}")
        }
    }
}
