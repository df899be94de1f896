//! Error types for release pull request building.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for release operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing a release.
///
/// Commits that match no known type are not errors; they fold into the
/// lowest-priority class during version computation.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Failed to parse or validate a version string.
    #[error("Invalid version: {version}")]
    #[diagnostic(
        code(bumpr::release::invalid_version),
        help("Version must follow semantic versioning (e.g., 1.0.0, 2.1.0-beta.1)")
    )]
    InvalidVersion {
        /// The invalid version string
        version: String,
    },

    /// A required file was absent from the repository snapshot.
    #[error("File not found: {path}")]
    #[diagnostic(
        code(bumpr::release::not_found),
        help("Fetch the file before building, or set `missing-files = \"skip\"`")
    )]
    NotFound {
        /// Repository-relative path of the missing file
        path: String,
    },

    /// Manifest file error (package.json, Cargo.toml, app.json, etc.).
    #[error("Manifest error: {message}")]
    #[diagnostic(
        code(bumpr::release::manifest),
        help("Check that the manifest file exists and is properly formatted")
    )]
    Manifest {
        /// The error message
        message: String,
        /// Repository-relative path of the manifest
        path: Option<String>,
    },

    /// Configuration error.
    #[error("Release configuration error: {message}")]
    #[diagnostic(code(bumpr::release::config), help("{help}"))]
    Config {
        /// The error message
        message: String,
        /// Help text for the user
        help: String,
    },

    /// The content source failed to fetch a file.
    #[error("Failed to fetch {path}: {message}")]
    #[diagnostic(code(bumpr::release::source))]
    Source {
        /// Repository-relative path being fetched
        path: String,
        /// The error message
        message: String,
    },

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(bumpr::release::io))]
    Io(#[from] std::io::Error),

    /// Wrapped JSON error.
    #[error("JSON error: {0}")]
    #[diagnostic(code(bumpr::release::json))]
    Json(#[from] serde_json::Error),

    /// Wrapped TOML parsing error.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(bumpr::release::toml_parse))]
    TomlParse(#[from] toml::de::Error),

    /// Wrapped TOML document error.
    #[error("TOML document error: {0}")]
    #[diagnostic(code(bumpr::release::toml_edit))]
    TomlEdit(#[from] toml_edit::TomlError),
}

impl Error {
    /// Create a new invalid version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a new not found error.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new manifest error.
    #[must_use]
    pub fn manifest(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Manifest {
            message: message.into(),
            path,
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a new content source error.
    #[must_use]
    pub fn fetch_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attach a file path to an error raised while transforming that file.
    ///
    /// Manifest errors without a path get this one; parse errors from the
    /// JSON and TOML layers become manifest errors naming the file.
    #[must_use]
    pub fn at_path(self, path: &str) -> Self {
        match self {
            Self::Manifest {
                message,
                path: None,
            } => Self::manifest(message, Some(path.to_string())),
            Self::Json(e) => Self::manifest(format!("Invalid JSON: {e}"), Some(path.to_string())),
            Self::TomlParse(e) => {
                Self::manifest(format!("Invalid TOML: {e}"), Some(path.to_string()))
            }
            Self::TomlEdit(e) => {
                Self::manifest(format!("Invalid TOML: {e}"), Some(path.to_string()))
            }
            other => other,
        }
    }

    /// Whether this error reports a missing required file.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error reports malformed input (a version or manifest field).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidVersion { .. }
                | Self::Manifest { .. }
                | Self::Json(_)
                | Self::TomlParse(_)
                | Self::TomlEdit(_)
        )
    }
}
