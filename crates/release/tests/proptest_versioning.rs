//! Property-based tests for version computation.
//!
//! These tests verify the behavioral contracts of the versioning policy:
//! - Breaking changes bump major from 1.0 on, minor before it
//! - The next version always sorts above the prior one
//! - Without a prior release the initial version is used as-is
//! - Builds are deterministic

use bumpr_release::strategy::Simple;
use bumpr_release::{
    Commit, CommitClass, MajorZeroPolicy, PriorRelease, ReleasePullRequestBuilder, ReleaseTag,
    RepositorySnapshot, Version, VersioningPolicy, compute_next_version,
};
use chrono::NaiveDate;
use proptest::prelude::*;

// =============================================================================
// Strategies for generating test data
// =============================================================================

fn version_strategy() -> impl Strategy<Value = Version> {
    (0u64..50, 0u64..200, 0u64..200)
        .prop_map(|(major, minor, patch)| Version::new(major, minor, patch))
}

fn commit_strategy() -> impl Strategy<Value = Commit> {
    (
        prop_oneof![
            Just("feat".to_string()),
            Just("fix".to_string()),
            Just("chore".to_string()),
            Just("docs".to_string()),
            "[a-z]{0,8}",
        ],
        any::<bool>(),
        "[0-9a-f]{10}",
    )
        .prop_map(|(commit_type, breaking, sha)| {
            let commit = Commit::new(commit_type.as_str(), "change", sha);
            if breaking { commit.mark_breaking() } else { commit }
        })
}

fn commits_strategy() -> impl Strategy<Value = Vec<Commit>> {
    proptest::collection::vec(commit_strategy(), 1..12)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn breaking_bumps_major_after_one_zero(
        prior in version_strategy().prop_filter("major > 0", |v| v.major > 0),
        mut commits in commits_strategy(),
    ) {
        commits.push(Commit::new("fix", "remove api", "deadbeef00").mark_breaking());
        let next = compute_next_version(Some(&prior), &commits, &Version::new(1, 0, 0)).unwrap();
        prop_assert_eq!(next, Version::new(prior.major + 1, 0, 0));
    }

    #[test]
    fn breaking_bumps_minor_before_one_zero(
        minor in 0u64..200,
        patch in 0u64..200,
        mut commits in commits_strategy(),
    ) {
        let prior = Version::new(0, minor, patch);
        commits.push(Commit::new("feat", "remove api", "deadbeef00").mark_breaking());
        let next = compute_next_version(Some(&prior), &commits, &Version::new(1, 0, 0)).unwrap();
        prop_assert_eq!(next, Version::new(0, minor + 1, 0));
    }

    #[test]
    fn strict_major_zero_reaches_one_zero(
        minor in 0u64..200,
        patch in 0u64..200,
    ) {
        let prior = Version::new(0, minor, patch);
        let commits = [Commit::new("feat", "remove api", "deadbeef00").mark_breaking()];
        let next = VersioningPolicy::new()
            .with_major_zero(MajorZeroPolicy::Strict)
            .compute_next_version(Some(&prior), &commits, &Version::new(1, 0, 0))
            .unwrap();
        prop_assert_eq!(next, Version::new(1, 0, 0));
    }

    #[test]
    fn next_version_always_increases(
        prior in version_strategy(),
        commits in commits_strategy(),
    ) {
        let next = compute_next_version(Some(&prior), &commits, &Version::new(1, 0, 0)).unwrap();
        prop_assert!(next > prior);
    }

    #[test]
    fn bump_matches_strongest_signal(
        prior in version_strategy().prop_filter("major > 0", |v| v.major > 0),
        commits in commits_strategy(),
    ) {
        let next = compute_next_version(Some(&prior), &commits, &Version::new(1, 0, 0)).unwrap();
        let expected = match CommitClass::of_all(&commits) {
            CommitClass::Breaking => Version::new(prior.major + 1, 0, 0),
            CommitClass::Feature => Version::new(prior.major, prior.minor + 1, 0),
            CommitClass::Other => Version::new(prior.major, prior.minor, prior.patch + 1),
        };
        prop_assert_eq!(next, expected);
    }

    #[test]
    fn no_prior_uses_initial_version(
        initial in version_strategy(),
        commits in commits_strategy(),
    ) {
        let next = compute_next_version(None, &commits, &initial).unwrap();
        prop_assert_eq!(next, initial);
    }

    #[test]
    fn builds_are_deterministic(
        prior in version_strategy(),
        commits in commits_strategy(),
    ) {
        let snapshot = RepositorySnapshot::new("acme/tool").with_file("version.txt", "0.0.0\n");
        let prior = PriorRelease::new(ReleaseTag::new(prior, "tool"), "0000000", "");
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let build = || {
            ReleasePullRequestBuilder::new(Box::new(Simple), snapshot.clone(), date)
                .build(&commits, Some(&prior))
                .unwrap()
        };
        prop_assert_eq!(build(), build());
    }
}

#[test]
fn fixes_on_major_zero_bump_patch() {
    let commits = [
        Commit::new("fix", "one", "1111111"),
        Commit::new("fix", "two", "2222222"),
    ];
    let prior = Version::new(0, 123, 4);
    let next = compute_next_version(Some(&prior), &commits, &Version::new(1, 0, 0)).unwrap();
    assert_eq!(next, Version::new(0, 123, 5));
}

#[test]
fn major_zero_breaking_example() {
    let commits = [Commit::new("feat", "remove api", "1111111").mark_breaking()];
    let prior = Version::new(0, 5, 0);
    let next = compute_next_version(Some(&prior), &commits, &Version::new(1, 0, 0)).unwrap();
    assert_eq!(next, Version::new(0, 6, 0));
}

#[test]
fn overflowing_prior_fails_the_build() {
    let snapshot = RepositorySnapshot::new("acme/tool").with_file("version.txt", "0.0.0\n");
    let prior =
        PriorRelease::from_tag_name("tool-v18446744073709551615.0.0", "0000000", "").unwrap();
    let commits = [Commit::new("feat", "remove api", "1111111").mark_breaking()];
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let err = ReleasePullRequestBuilder::new(Box::new(Simple), snapshot, date)
        .build(&commits, Some(&prior))
        .unwrap_err();
    assert!(err.is_validation());
}
