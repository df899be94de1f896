//! Repository content sources.
//!
//! This module defines the [`ContentSource`] trait that hosting clients
//! implement to hand file contents to the release builder, and
//! [`prefetch`], which reads every managed file up front so the builder
//! itself never performs I/O.
//!
//! Two sources ship with the crate:
//! - [`MemorySource`] - contents already held by the caller
//! - [`FsSource`] - a local working tree
//!
//! # Example
//!
//! ```rust,ignore
//! use bumpr_release::source::{prefetch, FsSource};
//! use bumpr_release::strategy::{managed_paths, Expo};
//!
//! let source = FsSource::new(".");
//! let paths = managed_paths(&Expo::default(), &config);
//! let snapshot = prefetch(&source, "acme/app", &paths, "main").await?;
//! ```

use crate::error::{Error, Result};
use crate::snapshot::{RepositorySnapshot, normalize_path};
use futures::future::try_join_all;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use tracing::{debug, info};

/// Boxed future returned by [`ContentSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>>;

/// A place file contents can be read from, keyed by `(path, ref)`.
pub trait ContentSource: Send + Sync {
    /// Returns the name of this source (e.g., "memory", "fs").
    fn name(&self) -> &'static str;

    /// Fetch one file.
    ///
    /// Resolves to `Ok(None)` when the file does not exist at `git_ref`;
    /// errors are reserved for failures of the source itself.
    fn fetch<'a>(&'a self, path: &'a str, git_ref: &'a str) -> FetchFuture<'a>;
}

/// Fetch `paths` concurrently into a snapshot.
///
/// Missing files are left out of the snapshot. The result does not depend on
/// the order in which fetches complete.
///
/// # Errors
///
/// Returns the first error reported by the source.
pub async fn prefetch<S>(
    source: &S,
    repository: &str,
    paths: &[String],
    git_ref: &str,
) -> Result<RepositorySnapshot>
where
    S: ContentSource + ?Sized,
{
    let fetches = paths.iter().map(|path| async move {
        let content = source.fetch(path, git_ref).await?;
        Ok::<_, Error>((path, content))
    });
    let fetched = try_join_all(fetches).await?;

    let mut snapshot = RepositorySnapshot::new(repository);
    for (path, content) in fetched {
        match content {
            Some(content) => snapshot.insert(path, content),
            None => debug!(path = %path, git_ref, "File not present"),
        }
    }
    info!(
        source = source.name(),
        requested = paths.len(),
        found = snapshot.paths().count(),
        git_ref,
        "Prefetched repository files"
    );
    Ok(snapshot)
}

/// In-memory source keyed by `(path, ref)`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<(String, String), String>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at a ref.
    #[must_use]
    pub fn with_file(mut self, path: &str, git_ref: &str, content: impl Into<String>) -> Self {
        self.insert(path, git_ref, content);
        self
    }

    /// Store a file at a ref.
    pub fn insert(&mut self, path: &str, git_ref: &str, content: impl Into<String>) {
        self.files
            .insert((normalize_path(path), git_ref.to_string()), content.into());
    }
}

impl ContentSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch<'a>(&'a self, path: &'a str, git_ref: &'a str) -> FetchFuture<'a> {
        let content = self
            .files
            .get(&(normalize_path(path), git_ref.to_string()))
            .cloned();
        Box::pin(async move { Ok(content) })
    }
}

/// Local working tree. The ref is ignored: the tree is read as it is.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(Error::fetch_failed(path, "Path escapes the repository root"));
        }
        Ok(self.root.join(relative))
    }
}

impl ContentSource for FsSource {
    fn name(&self) -> &'static str {
        "fs"
    }

    fn fetch<'a>(&'a self, path: &'a str, _git_ref: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let full = self.resolve(path)?;
            match tokio::fs::read_to_string(&full).await {
                Ok(content) => Ok(Some(content)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(Error::fetch_failed(path, e.to_string())),
            }
        })
    }
}
