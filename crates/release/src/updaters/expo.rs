//! Expo `app.json` updater.

use super::json::{object_entry, parse_object, to_string_like};
use super::{ContentUpdater, require};
use crate::error::{Error, Result};
use crate::version::Version;
use serde_json::Value;

/// Largest `versionCode` the Play Store accepts.
const MAX_ANDROID_VERSION_CODE: u64 = 2_100_000_000;

/// Rewrites the release fields of an Expo `app.json`.
///
/// Sets `expo.version`, `expo.sdkVersion`, `expo.ios.buildNumber` and
/// `expo.android.versionCode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppJson {
    version: Version,
    expo_sdk_version: Version,
}

impl AppJson {
    /// Create the updater for an app built against `expo_sdk_version`.
    #[must_use]
    pub const fn new(version: Version, expo_sdk_version: Version) -> Self {
        Self {
            version,
            expo_sdk_version,
        }
    }

    /// The Expo SDK version written to `expo.sdkVersion`.
    #[must_use]
    pub const fn expo_sdk_version(&self) -> &Version {
        &self.expo_sdk_version
    }

    /// Android version code: `sdk.major * 10^6 + major * 10^4 + minor * 10^2 + patch`.
    ///
    /// # Errors
    ///
    /// Returns a manifest error if the code exceeds what Android accepts.
    pub fn android_version_code(&self) -> Result<u64> {
        let v = &self.version;
        self.expo_sdk_version
            .major
            .checked_mul(1_000_000)
            .and_then(|n| n.checked_add(v.major.checked_mul(10_000)?))
            .and_then(|n| n.checked_add(v.minor.checked_mul(100)?))
            .and_then(|n| n.checked_add(v.patch))
            .filter(|code| *code <= MAX_ANDROID_VERSION_CODE)
            .ok_or_else(|| {
                let (version, sdk) = (&self.version, &self.expo_sdk_version);
                Error::manifest(
                    format!(
                        "Android versionCode for {version} on Expo SDK {sdk} \
                         exceeds {MAX_ANDROID_VERSION_CODE}"
                    ),
                    None,
                )
            })
    }
}

impl ContentUpdater for AppJson {
    fn update_content(&self, content: Option<&str>) -> Result<String> {
        let content = require(content)?;
        let version_code = self.android_version_code()?;
        let version = Value::String(self.version.to_string());

        let mut root = parse_object(content)?;
        let expo = root
            .get_mut("expo")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| Error::manifest("app.json has no `expo` object", None))?;

        expo.insert("version".to_string(), version.clone());
        expo.insert(
            "sdkVersion".to_string(),
            Value::String(self.expo_sdk_version.to_string()),
        );
        object_entry(expo, "ios")?.insert("buildNumber".to_string(), version);
        object_entry(expo, "android")?
            .insert("versionCode".to_string(), Value::from(version_code));

        to_string_like(&root, content)
    }
}
