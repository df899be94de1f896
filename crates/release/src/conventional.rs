//! Conventional commit parsing.
//!
//! Thin adapter over the `git-conventional` crate. Messages that do not follow
//! the convention still become a [`Commit`]; they just carry an empty
//! [`CommitType::Other`] type and bump like any other low-priority commit.

use crate::commit::{Commit, CommitType};
use tracing::debug;

/// Parse a raw commit message into a structured commit.
#[must_use]
pub fn parse_commit(message: &str, sha: impl Into<String>) -> Commit {
    let sha = sha.into();
    match git_conventional::Commit::parse(message.trim()) {
        Ok(parsed) => Commit {
            commit_type: CommitType::from(parsed.type_().to_string().as_str()),
            breaking: parsed.breaking(),
            scope: parsed.scope().map(|s| s.to_string()),
            message: parsed.description().to_string(),
            sha,
        },
        Err(e) => {
            debug!(sha = %sha, error = %e, "Commit is not conventional");
            let subject = message.lines().next().unwrap_or_default().trim();
            Commit {
                commit_type: CommitType::Other(String::new()),
                breaking: false,
                scope: None,
                message: subject.to_string(),
                sha,
            }
        }
    }
}

impl Commit {
    /// Parse a raw conventional commit message; see [`parse_commit`].
    #[must_use]
    pub fn parse(message: &str, sha: impl Into<String>) -> Self {
        parse_commit(message, sha)
    }
}

/// Parse `(message, sha)` pairs, preserving order.
#[must_use]
pub fn parse_commits<'a, I>(raw: I) -> Vec<Commit>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    raw.into_iter()
        .map(|(message, sha)| parse_commit(message, sha))
        .collect()
}
