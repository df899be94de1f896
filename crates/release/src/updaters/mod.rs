//! File updaters.
//!
//! An updater is a pure content transform bound to one file: it receives the
//! file's current text (or nothing, when the file does not exist yet) and
//! returns the new text. Updaters never touch the filesystem.
//!
//! [`Updater`] is the closed table of every capability the crate knows, so
//! release pull requests stay comparable and cloneable.

mod changelog;
mod expo;
mod generic;
mod json;
mod node;
mod rust;

pub use changelog::Changelog;
pub use expo::AppJson;
pub use generic::VersionTxt;
pub use node::{PackageJson, PackageLockJson, SamplesPackageJson};
pub use rust::{CargoLock, CargoToml};

use crate::error::{Error, Result};

/// A pure transform from existing file content to new file content.
pub trait ContentUpdater {
    /// Produce the new content.
    ///
    /// `content` is `None` only when the update may create the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing content cannot be parsed or lacks a
    /// field the updater must rewrite.
    fn update_content(&self, content: Option<&str>) -> Result<String>;
}

/// Every updater capability, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Updater {
    /// Markdown changelog.
    Changelog(Changelog),
    /// npm `package.json`.
    PackageJson(PackageJson),
    /// npm `package-lock.json` / `npm-shrinkwrap.json`.
    PackageLockJson(PackageLockJson),
    /// `samples/package.json` depending on the released package.
    SamplesPackageJson(SamplesPackageJson),
    /// Expo `app.json`.
    AppJson(AppJson),
    /// Cargo `Cargo.toml`.
    CargoToml(CargoToml),
    /// Cargo `Cargo.lock`.
    CargoLock(CargoLock),
    /// Plain `version.txt`.
    VersionTxt(VersionTxt),
}

impl Updater {
    /// Apply the transform.
    ///
    /// # Errors
    ///
    /// Propagates the concrete updater's error.
    pub fn update(&self, content: Option<&str>) -> Result<String> {
        match self {
            Self::Changelog(u) => u.update_content(content),
            Self::PackageJson(u) => u.update_content(content),
            Self::PackageLockJson(u) => u.update_content(content),
            Self::SamplesPackageJson(u) => u.update_content(content),
            Self::AppJson(u) => u.update_content(content),
            Self::CargoToml(u) => u.update_content(content),
            Self::CargoLock(u) => u.update_content(content),
            Self::VersionTxt(u) => u.update_content(content),
        }
    }

    /// Short name of the updater kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Changelog(_) => "changelog",
            Self::PackageJson(_) => "package-json",
            Self::PackageLockJson(_) => "package-lock-json",
            Self::SamplesPackageJson(_) => "samples-package-json",
            Self::AppJson(_) => "app-json",
            Self::CargoToml(_) => "cargo-toml",
            Self::CargoLock(_) => "cargo-lock",
            Self::VersionTxt(_) => "version-txt",
        }
    }
}

macro_rules! impl_from_updater {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Updater {
                fn from(updater: $variant) -> Self {
                    Self::$variant(updater)
                }
            }
        )*
    };
}

impl_from_updater!(
    Changelog,
    PackageJson,
    PackageLockJson,
    SamplesPackageJson,
    AppJson,
    CargoToml,
    CargoLock,
    VersionTxt,
);

/// What an [`Update`] does when its file is absent from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhenMissing {
    /// Report [`Error::NotFound`].
    #[default]
    Fail,
    /// Let the updater create the file.
    Create,
    /// Drop the update without complaint.
    Ignore,
}

/// One intended file edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Repository-relative path.
    pub path: String,
    /// Behaviour when the file does not exist.
    pub when_missing: WhenMissing,
    /// The transform to apply.
    pub updater: Updater,
}

impl Update {
    /// An update of a file that must already exist.
    #[must_use]
    pub fn new(path: impl Into<String>, updater: impl Into<Updater>) -> Self {
        Self {
            path: path.into(),
            when_missing: WhenMissing::Fail,
            updater: updater.into(),
        }
    }

    /// An update that creates the file when it is missing.
    #[must_use]
    pub fn creating(path: impl Into<String>, updater: impl Into<Updater>) -> Self {
        Self {
            when_missing: WhenMissing::Create,
            ..Self::new(path, updater)
        }
    }

    /// An update of a file the package may not have, such as a second
    /// lockfile flavour.
    #[must_use]
    pub fn optional(path: impl Into<String>, updater: impl Into<Updater>) -> Self {
        Self {
            when_missing: WhenMissing::Ignore,
            ..Self::new(path, updater)
        }
    }

    /// Run the updater against the file's current content.
    ///
    /// Returns `Ok(None)` when the file is missing and the update is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when `existing` is `None` and the update
    /// must find the file; otherwise propagates the updater's error with
    /// this update's path attached.
    pub fn apply(&self, existing: Option<&str>) -> Result<Option<String>> {
        if existing.is_none() {
            match self.when_missing {
                WhenMissing::Fail => return Err(Error::not_found(&self.path)),
                WhenMissing::Ignore => return Ok(None),
                WhenMissing::Create => {}
            }
        }
        self.updater
            .update(existing)
            .map(Some)
            .map_err(|e| e.at_path(&self.path))
    }
}

/// Content that an updater needs but was not handed.
fn require(content: Option<&str>) -> Result<&str> {
    content.ok_or_else(|| Error::manifest("Updater cannot create this file", None))
}
