//! Expo strategy tests against a fixture app.

use bumpr_release::strategy::Expo;
use bumpr_release::{
    BuildOutcome, Commit, FsSource, PriorRelease, ReleaseConfig, ReleasePullRequest,
    ReleasePullRequestBuilder, RepositorySnapshot, Update, Updater, Version, managed_paths,
    prefetch,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::path::PathBuf;

const PACKAGE_JSON: &str = include_str!("fixtures/expo/package.json");
const PACKAGE_LOCK: &str = include_str!("fixtures/expo/package-lock.json");
const SHRINKWRAP: &str = include_str!("fixtures/expo/npm-shrinkwrap.json");
const SAMPLES: &str = include_str!("fixtures/expo/samples/package.json");
const APP_JSON: &str = include_str!("fixtures/expo/app.json");

fn snapshot() -> RepositorySnapshot {
    RepositorySnapshot::new("googleapis/node-test-repo")
        .with_file("package.json", PACKAGE_JSON)
        .with_file("package-lock.json", PACKAGE_LOCK)
        .with_file("npm-shrinkwrap.json", SHRINKWRAP)
        .with_file("samples/package.json", SAMPLES)
        .with_file("app.json", APP_JSON)
}

fn commits() -> Vec<Commit> {
    vec![Commit::parse(
        "fix(deps): update dependency com.google.cloud:google-cloud-storage to v1.120.0",
        "08ca01180a91c0a1ba8992b491db9212",
    )]
}

fn prior(component: &str) -> PriorRelease {
    PriorRelease::from_tag_name(&format!("{component}-v0.123.4"), "abc123", "some notes").unwrap()
}

fn build(config: ReleaseConfig, prior: Option<&PriorRelease>) -> ReleasePullRequest {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let outcome = ReleasePullRequestBuilder::new(Box::new(Expo::default()), snapshot(), date)
        .with_config(config)
        .build(&commits(), prior)
        .unwrap();
    match outcome {
        BuildOutcome::Release(pr) => *pr,
        BuildOutcome::Skip(reason) => panic!("unexpected skip: {reason}"),
    }
}

fn named(component: &str, package_name: &str) -> ReleaseConfig {
    ReleaseConfig {
        component: Some(component.to_string()),
        package_name: Some(package_name.to_string()),
        ..ReleaseConfig::default()
    }
}

fn find<'a>(pr: &'a ReleasePullRequest, path: &str) -> &'a Update {
    pr.updates
        .iter()
        .find(|u| u.path == path)
        .unwrap_or_else(|| panic!("no update for {path}"))
}

fn change(pr: &ReleasePullRequest, path: &str) -> Value {
    let change = pr.changes.iter().find(|c| c.path == path).unwrap();
    serde_json::from_str(&change.content).unwrap()
}

#[test]
fn test_default_initial_version() {
    let pr = build(named("google-cloud-automl", "google-cloud-automl"), None);
    assert_eq!(pr.version, Version::new(1, 0, 0));
}

#[test]
fn test_builds_release_pull_request() {
    let pr = build(
        named("some-node-package", "some-node-package"),
        Some(&prior("some-node-package")),
    );
    assert_eq!(pr.version, Version::new(0, 123, 5));
    assert_eq!(pr.tag_name, "some-node-package-v0.123.5");
    assert_eq!(pr.title, "chore(main): release some-node-package 0.123.5");
}

#[test]
fn test_detects_default_component() {
    let pr = build(ReleaseConfig::default(), Some(&prior("node-test-repo")));
    assert_eq!(pr.version, Version::new(0, 123, 5));
    assert_eq!(pr.tag.component.as_deref(), Some("node-test-repo"));
}

#[test]
fn test_detects_default_package_name() {
    let config = ReleaseConfig {
        component: Some("abc-123".to_string()),
        ..ReleaseConfig::default()
    };
    let pr = build(config, Some(&prior("node-test-repo")));
    assert_eq!(pr.version, Version::new(0, 123, 5));
    assert_eq!(pr.tag_name, "abc-123-v0.123.5");

    // package name came from package.json, so samples track "node-test-repo"
    let samples = change(&pr, "samples/package.json");
    assert_eq!(samples["dependencies"]["node-test-repo"], "^0.123.5");
    assert_eq!(samples["dependencies"]["google-cloud-automl-pkg"], "^0.123.4");
}

#[test]
fn test_builds_common_files() {
    let pr = build(named("google-cloud-automl", "google-cloud-automl-pkg"), None);

    let kinds: Vec<(&str, &str)> = pr
        .updates
        .iter()
        .map(|u| (u.path.as_str(), u.updater.kind()))
        .collect();
    assert_eq!(
        kinds,
        [
            ("CHANGELOG.md", "changelog"),
            ("package.json", "package-json"),
            ("package-lock.json", "package-lock-json"),
            ("npm-shrinkwrap.json", "package-lock-json"),
            ("samples/package.json", "samples-package-json"),
            ("app.json", "app-json"),
        ]
    );

    match &find(&pr, "samples/package.json").updater {
        Updater::SamplesPackageJson(u) => assert_eq!(u.package_name(), "google-cloud-automl-pkg"),
        other => panic!("unexpected updater: {other:?}"),
    }
    match &find(&pr, "app.json").updater {
        Updater::AppJson(u) => assert_eq!(u.expo_sdk_version(), &Version::new(44, 0, 0)),
        other => panic!("unexpected updater: {other:?}"),
    }
}

#[test]
fn test_rendered_file_contents() {
    let pr = build(named("node-test-repo", "node-test-repo"), Some(&prior("node-test-repo")));

    assert_eq!(change(&pr, "package.json")["version"], "0.123.5");
    assert_eq!(change(&pr, "package.json")["dependencies"]["expo"], "~44.0.0");

    let lock = change(&pr, "package-lock.json");
    assert_eq!(lock["version"], "0.123.5");
    assert_eq!(lock["packages"][""]["version"], "0.123.5");
    assert_eq!(lock["packages"]["node_modules/expo"]["version"], "44.0.6");
    assert_eq!(change(&pr, "npm-shrinkwrap.json")["version"], "0.123.5");

    let app = change(&pr, "app.json");
    assert_eq!(app["expo"]["version"], "0.123.5");
    assert_eq!(app["expo"]["sdkVersion"], "44.0.0");
    assert_eq!(app["expo"]["ios"]["buildNumber"], "0.123.5");
    assert_eq!(app["expo"]["android"]["versionCode"], 44_012_305);

    let changelog = &pr.changes[0];
    assert_eq!(changelog.path, "CHANGELOG.md");
    assert!(changelog.created);
    assert!(changelog.content.contains("### Bug Fixes"));
    assert!(changelog.content.contains(
        "* **deps:** update dependency com.google.cloud:google-cloud-storage to v1.120.0 (08ca011)"
    ));
}

#[test]
fn test_unchanged_lines_survive() {
    let pr = build(named("node-test-repo", "node-test-repo"), None);
    let package_json = pr.changes.iter().find(|c| c.path == "package.json").unwrap();
    assert_eq!(package_json.content, PACKAGE_JSON.replace("0.123.4", "1.0.0"));
}

#[test]
fn test_builds_without_alternate_npm_files() {
    let snapshot = RepositorySnapshot::new("googleapis/node-test-repo")
        .with_file("package.json", PACKAGE_JSON)
        .with_file("package-lock.json", PACKAGE_LOCK)
        .with_file("app.json", APP_JSON);
    let commits = vec![Commit::parse("fix: x", "1234567")];
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let pr = ReleasePullRequestBuilder::new(Box::new(Expo::default()), snapshot, date)
        .build(&commits, Some(&prior("node-test-repo")))
        .unwrap()
        .into_release()
        .unwrap();

    let paths: Vec<&str> = pr.changes.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(paths, ["CHANGELOG.md", "package.json", "package-lock.json", "app.json"]);
    let update_paths: Vec<&str> = pr.updates.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(update_paths, paths);
    assert_eq!(change(&pr, "app.json")["expo"]["version"], "0.123.5");
}

#[test]
fn test_missing_app_json_still_aborts() {
    let snapshot = RepositorySnapshot::new("googleapis/node-test-repo")
        .with_file("package.json", PACKAGE_JSON);
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let err = ReleasePullRequestBuilder::new(Box::new(Expo::default()), snapshot, date)
        .build(&commits(), None)
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("app.json"));
}

#[tokio::test]
async fn test_prefetch_fixture_tree() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/expo");
    let config = ReleaseConfig::default();
    let paths = managed_paths(&Expo::default(), &config);

    let snapshot = prefetch(&FsSource::new(root), "googleapis/node-test-repo", &paths, "main")
        .await
        .unwrap();

    assert!(!snapshot.contains("CHANGELOG.md"));
    assert_eq!(snapshot.get("app.json"), Some(APP_JSON));
    assert_eq!(snapshot.paths().count(), 5);
}
