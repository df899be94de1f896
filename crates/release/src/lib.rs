//! Release pull request engine.
//!
//! This crate turns a list of conventional commits and the last published
//! release into a release pull request: the next semantic version, a
//! changelog entry, and the new content of every file the release touches.
//!
//! # Features
//!
//! - **Versioning**: breaking > feature > fix precedence, with a configurable
//!   policy for breaking changes before 1.0
//! - **Strategies**: per-ecosystem file sets (`simple`, `node`, `expo`, `rust`)
//!   composed from a shared base and an ecosystem overlay
//! - **Pure core**: the builder works on an in-memory snapshot; all I/O
//!   happens up front through a [`ContentSource`]
//!
//! # Architecture
//!
//! - [`versioning`] - Next-version computation
//! - [`changelog`] - Changelog entry grouping and formatting
//! - [`updaters`] - Pure per-file content transforms
//! - [`strategy`] - Ecosystem strategies
//! - [`registry`] - Base + overlay composition of updates
//! - [`builder`] - Release pull request assembly
//! - [`source`] - Content prefetching
//!
//! # Example
//!
//! ```rust,ignore
//! use bumpr_release::{BuildOutcome, Commit, PriorRelease, ReleasePullRequestBuilder};
//! use bumpr_release::source::{prefetch, FsSource};
//! use bumpr_release::strategy::{managed_paths, strategy_for};
//!
//! let strategy = strategy_for("expo")?;
//! let paths = managed_paths(strategy.as_ref(), &config);
//! let snapshot = prefetch(&FsSource::new("."), "acme/app", &paths, "main").await?;
//!
//! let commits = vec![Commit::parse("fix(deps): bump expo", "abc1234")];
//! let prior = PriorRelease::from_tag_name("app-v0.123.4", "def5678", "")?;
//!
//! let outcome = ReleasePullRequestBuilder::new(strategy, snapshot, today)
//!     .with_config(config)
//!     .build(&commits, Some(&prior))?;
//! if let BuildOutcome::Release(pr) = outcome {
//!     println!("{}", pr.title);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod changelog;
pub mod commit;
pub mod config;
pub mod conventional;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod snapshot;
pub mod source;
pub mod strategy;
pub mod updaters;
pub mod version;
pub mod versioning;

// Re-export main types
pub use builder::{
    BuildOutcome, FileChange, ReleasePullRequest, ReleasePullRequestBuilder, SkipReason,
};
pub use changelog::{ChangelogEntry, ChangelogGenerator, ChangelogGroup};
pub use commit::{Commit, CommitType, PriorRelease, ReleaseTag};
pub use config::{
    ChangelogConfig, ChangelogSection, MajorZeroPolicy, MissingFilePolicy, ReleaseConfig,
    ReleaseGitConfig, TagConfig, VersioningConfig, VersioningStrategy,
};
pub use conventional::{parse_commit, parse_commits};
pub use error::{Error, Result};
pub use registry::UpdaterRegistry;
pub use resolve::{NameSource, Resolved, ResolvedNames, resolve_names};
pub use snapshot::RepositorySnapshot;
pub use source::{ContentSource, FsSource, MemorySource, prefetch};
pub use strategy::{Strategy, UpdateContext, managed_paths, strategy_for};
pub use updaters::{ContentUpdater, Update, Updater, WhenMissing};
pub use version::{BumpType, Version};
pub use versioning::{CommitClass, VersioningPolicy, compute_next_version};
