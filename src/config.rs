use std::path::Path;

use serde::Deserialize;

use crate::version::error::MapError;

// =============================================================================
// Upstream locations
// =============================================================================

/// emsdk release -> emscripten-releases hash
pub const EMSDK_TAGS_URL: &str =
    "https://raw.githubusercontent.com/emscripten-core/emsdk/main/emscripten-releases-tags.json";

/// emsdk release -> per-platform binary checksums
pub const EMSDK_REVISIONS_URL: &str =
    "https://raw.githubusercontent.com/emscripten-core/emsdk/main/bazel/revisions.bzl";

/// emscripten release notes with LLVM update anchors
pub const EMSCRIPTEN_CHANGELOG_URL: &str =
    "https://raw.githubusercontent.com/emscripten-core/emscripten/main/ChangeLog.md";

pub const USER_AGENT: &str = "flang-releases-emsdk-map-generator";

// =============================================================================
// Defaults
// =============================================================================

/// Oldest emsdk release kept in the `releases` table
pub const DEFAULT_MIN_EMSDK_VERSION: &str = "3.1.0";

/// Oldest LLVM major kept in `llvm_major_latest_emsdk`
pub const DEFAULT_MIN_LLVM_MAJOR: u64 = 16;

/// Flang majors covered by the previous-major policy map
pub const DEFAULT_FLANG_MAJOR_RANGE: &str = "19-23";

pub const DEFAULT_OUTPUT: &str = "emsdk-llvm-map.json";

/// Timeout for fetch operations in milliseconds (60 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 60_000;

/// Generator configuration
///
/// Every field is optional in the JSON config file; command line flags are
/// applied on top of whatever the file provides.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub min_emsdk_version: String,
    pub min_llvm_major: u64,
    pub flang_major_range: String,
    pub sources: SourceUrls,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_emsdk_version: DEFAULT_MIN_EMSDK_VERSION.to_string(),
            min_llvm_major: DEFAULT_MIN_LLVM_MAJOR,
            flang_major_range: DEFAULT_FLANG_MAJOR_RANGE.to_string(),
            sources: SourceUrls::default(),
        }
    }
}

impl MapConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Where each upstream document is fetched from
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceUrls {
    pub release_tags: String,
    pub revisions: String,
    pub changelog: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            release_tags: EMSDK_TAGS_URL.to_string(),
            revisions: EMSDK_REVISIONS_URL.to_string(),
            changelog: EMSCRIPTEN_CHANGELOG_URL.to_string(),
        }
    }
}
