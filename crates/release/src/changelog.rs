//! Changelog entry generation and formatting.
//!
//! Commits are grouped by type into the configured sections. Within a section
//! breaking changes come first; otherwise commit order is preserved.

use crate::commit::Commit;
use crate::config::{ChangelogConfig, ChangelogSection};
use crate::version::Version;
use chrono::NaiveDate;
use std::fmt::Write;
use std::ptr;

/// Heading for breaking commits whose type has no configured section.
const OTHER_SECTION: &str = "Other Changes";

/// Marker placed in front of breaking entries.
const BREAKING_MARKER: &str = "⚠ ";

/// One rendered section of a changelog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogGroup {
    /// Section heading.
    pub title: String,
    /// Commits in presentation order.
    pub commits: Vec<Commit>,
}

/// A single release entry in the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Version being released.
    pub version: Version,
    /// Tag of this release.
    pub tag: String,
    /// Tag of the previous release, if any.
    pub previous_tag: Option<String>,
    /// Release date.
    pub date: NaiveDate,
    /// Non-empty sections in configured order.
    pub groups: Vec<ChangelogGroup>,
    /// Repository web URL for links.
    pub repository_url: Option<String>,
}

impl ChangelogEntry {
    /// Format this entry as Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        let date = self.date.format("%Y-%m-%d");

        match (&self.repository_url, &self.previous_tag) {
            (Some(url), Some(previous)) => {
                let _ = writeln!(
                    output,
                    "## [{}]({}/compare/{}...{}) ({date})",
                    self.version,
                    url.trim_end_matches('/'),
                    previous,
                    self.tag
                );
            }
            _ => {
                let _ = writeln!(output, "## {} ({date})", self.version);
            }
        }

        for group in &self.groups {
            let _ = writeln!(output, "\n\n### {}\n", group.title);
            for commit in &group.commits {
                output.push_str(&self.format_commit(commit));
            }
        }

        output.trim_end().to_string()
    }

    /// Format a single commit as a Markdown list item.
    fn format_commit(&self, commit: &Commit) -> String {
        let mut line = String::from("* ");
        if commit.breaking {
            line.push_str(BREAKING_MARKER);
        }
        if let Some(ref scope) = commit.scope {
            let _ = write!(line, "**{scope}:** ");
        }
        line.push_str(&commit.message);

        match &self.repository_url {
            Some(url) => {
                let _ = writeln!(
                    line,
                    " ([{}]({}/commit/{}))",
                    commit.short_sha(),
                    url.trim_end_matches('/'),
                    commit.sha
                );
            }
            None => {
                let _ = writeln!(line, " ({})", commit.short_sha());
            }
        }
        line
    }
}

/// Generator for changelog entries.
#[derive(Debug, Clone, Default)]
pub struct ChangelogGenerator {
    config: ChangelogConfig,
}

impl ChangelogGenerator {
    /// Create a new changelog generator with the given configuration.
    #[must_use]
    pub const fn new(config: ChangelogConfig) -> Self {
        Self { config }
    }

    /// Group commits into sections.
    ///
    /// Hidden sections only appear when they hold a breaking change. Commits
    /// whose type has no section are dropped unless breaking.
    #[must_use]
    pub fn group(&self, commits: &[Commit]) -> Vec<ChangelogGroup> {
        let config = &self.config;
        let in_section = |commit: &Commit, section: &ChangelogSection| {
            config
                .section_for(commit.commit_type.as_str())
                .is_some_and(|found| ptr::eq(found, section))
        };

        let mut groups: Vec<ChangelogGroup> = config
            .sections
            .iter()
            .filter_map(|section| {
                let bucket: Vec<Commit> = commits
                    .iter()
                    .filter(|c| in_section(c, section))
                    .cloned()
                    .collect();
                let shown = !bucket.is_empty()
                    && (!section.hidden || bucket.iter().any(|c| c.breaking));
                shown.then(|| ChangelogGroup {
                    title: section.section.clone(),
                    commits: breaking_first(bucket),
                })
            })
            .collect();

        let other: Vec<Commit> = commits
            .iter()
            .filter(|c| c.breaking && config.section_for(c.commit_type.as_str()).is_none())
            .cloned()
            .collect();
        if !other.is_empty() {
            groups.push(ChangelogGroup {
                title: OTHER_SECTION.to_string(),
                commits: other,
            });
        }

        groups
    }

    /// Build the changelog entry for a release.
    #[must_use]
    pub fn entry(
        &self,
        version: &Version,
        tag: impl Into<String>,
        previous_tag: Option<String>,
        date: NaiveDate,
        commits: &[Commit],
    ) -> ChangelogEntry {
        ChangelogEntry {
            version: version.clone(),
            tag: tag.into(),
            previous_tag,
            date,
            groups: self.group(commits),
            repository_url: self.config.repository_url.clone(),
        }
    }
}

/// Stable partition with breaking commits in front.
fn breaking_first(commits: Vec<Commit>) -> Vec<Commit> {
    let (mut breaking, rest): (Vec<Commit>, Vec<Commit>) =
        commits.into_iter().partition(|c| c.breaking);
    breaking.extend(rest);
    breaking
}
