//! Resolve the emsdk release to build a given LLVM/flang version with
//!
//! Reads a previously generated mapping document and follows the
//! previous-major policy map into the releases table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::version::error::ResolveError;
use crate::version::semver::SemanticVersion;

/// The parts of a mapping document needed for resolution.
///
/// Every field is optional so that a hand-edited or partial map reports the
/// specific missing piece instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
struct PolicyView {
    #[serde(default)]
    flang_major_to_prev_llvm_major_latest_emsdk: BTreeMap<String, Option<String>>,
    #[serde(default)]
    releases: BTreeMap<String, ReleaseView>,
}

#[derive(Debug, Default, Deserialize)]
struct ReleaseView {
    #[serde(default)]
    emscripten_release_hash: Option<String>,
    #[serde(default)]
    llvm_major_estimate: Option<u64>,
}

/// The emsdk release selected for an LLVM version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEmsdk {
    pub emsdk_version: String,
    pub emsdk_hash: String,
    pub expected_llvm_major: u64,
}

impl ResolvedEmsdk {
    /// `KEY=VALUE` lines for consumption by build scripts
    pub fn to_env_lines(&self) -> String {
        format!(
            "EMSDK_VERSION={}\nEMSDK_HASH={}\nEMSDK_EXPECTED_LLVM_MAJOR={}\n",
            self.emsdk_version, self.emsdk_hash, self.expected_llvm_major
        )
    }
}

/// Resolve from the JSON text of a mapping document
pub fn resolve_emsdk_for_llvm(
    mapping_json: &str,
    llvm_version: &str,
) -> Result<ResolvedEmsdk, ResolveError> {
    let llvm = SemanticVersion::parse(llvm_version.trim())
        .map_err(|_| ResolveError::InvalidLlvmVersion(llvm_version.to_string()))?;
    let major = llvm.major();

    let view: PolicyView = serde_json::from_str(mapping_json)?;

    let emsdk_release = view
        .flang_major_to_prev_llvm_major_latest_emsdk
        .get(&major.to_string())
        .cloned()
        .flatten()
        .filter(|release| !release.is_empty())
        .ok_or(ResolveError::NoPolicyMapping { major })?;
    debug!("LLVM major {} maps to emsdk {}", major, emsdk_release);

    let Some(row) = view.releases.get(&emsdk_release) else {
        return Err(ResolveError::MissingRelease(emsdk_release));
    };

    let Some(emsdk_hash) = row.emscripten_release_hash.clone().filter(|h| !h.is_empty()) else {
        return Err(ResolveError::MissingHash(emsdk_release));
    };

    let Some(expected_llvm_major) = row.llvm_major_estimate else {
        return Err(ResolveError::MissingMajorEstimate(emsdk_release));
    };

    Ok(ResolvedEmsdk {
        emsdk_version: emsdk_release,
        emsdk_hash,
        expected_llvm_major,
    })
}

/// Resolve from a mapping file on disk
pub fn resolve_from_file(
    map_file: &Path,
    llvm_version: &str,
) -> Result<ResolvedEmsdk, ResolveError> {
    // Validate the version first so a bad argument is reported before a bad path
    if !SemanticVersion::is_valid(llvm_version.trim()) {
        return Err(ResolveError::InvalidLlvmVersion(llvm_version.to_string()));
    }
    if !map_file.exists() {
        return Err(ResolveError::MapFileNotFound(map_file.display().to_string()));
    }

    let text = std::fs::read_to_string(map_file)?;
    resolve_emsdk_for_llvm(&text, llvm_version)
}
