//! Mapping document assembly and rendering

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::mapping::inference::{Inference, Provenance};
use crate::parser::types::{Platform, RevisionRow};
use crate::version::error::VersionFormatError;
use crate::version::semver::SemanticVersion;

pub const NOTES: [&str; 3] = [
    "llvm_version_estimate is inferred from emscripten ChangeLog release notes.",
    "Some releases do not explicitly mention LLVM updates; those are branch-filled.",
    "Use this map as an operational guide, not as a formal ABI guarantee.",
];

/// Where an estimate came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlvmInference {
    pub mode: Provenance,
    pub anchor_release: Option<String>,
}

/// One entry of the `releases` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRow {
    pub emscripten_release_hash: String,
    pub llvm_version_estimate: Option<SemanticVersion>,
    pub llvm_major_estimate: Option<u64>,
    pub llvm_inference: LlvmInference,
    /// Only the recognized platforms present in revisions.bzl
    pub binary_checksums: BTreeMap<String, String>,
}

impl ReleaseRow {
    fn new(hash: &str, inference: Inference, revision: Option<&RevisionRow>) -> Self {
        let binary_checksums = revision
            .map(|row| {
                Platform::ALL
                    .iter()
                    .filter_map(|platform| {
                        row.checksums
                            .get(platform)
                            .map(|sha| (platform.as_str().to_string(), sha.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            emscripten_release_hash: hash.to_string(),
            llvm_major_estimate: inference.version.as_ref().map(SemanticVersion::major),
            llvm_version_estimate: inference.version,
            llvm_inference: LlvmInference {
                mode: inference.mode,
                anchor_release: inference.anchor,
            },
            binary_checksums,
        }
    }
}

/// Join release hashes, checksums and inferred versions into release rows.
///
/// Rows are ordered by ascending release version; releases older than
/// `min_emsdk_version` are dropped. A release the changelog never mentions
/// gets an unknown inference.
pub fn assemble_releases(
    release_hashes: &IndexMap<String, String>,
    revisions: &IndexMap<String, RevisionRow>,
    inferred: &IndexMap<String, Inference>,
    min_emsdk_version: &SemanticVersion,
) -> Result<IndexMap<String, ReleaseRow>, VersionFormatError> {
    let mut ordered = release_hashes
        .iter()
        .map(|(release, hash)| Ok((SemanticVersion::parse(release)?, release, hash)))
        .collect::<Result<Vec<_>, VersionFormatError>>()?;
    ordered.sort_by(|a, b| a.0.cmp(&b.0));

    let mut rows = IndexMap::new();
    for (version, release, hash) in ordered {
        if version < *min_emsdk_version {
            continue;
        }

        let inference = inferred
            .get(release)
            .cloned()
            .unwrap_or_else(Inference::unknown);
        rows.insert(
            release.clone(),
            ReleaseRow::new(hash, inference, revisions.get(release)),
        );
    }

    Ok(rows)
}

/// release -> LLVM estimate, the input of the major aggregation
pub fn llvm_estimates(rows: &IndexMap<String, ReleaseRow>) -> IndexMap<String, Option<SemanticVersion>> {
    rows.iter()
        .map(|(release, row)| (release.clone(), row.llvm_version_estimate.clone()))
        .collect()
}

/// The generated `emsdk-llvm-map.json` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    pub generated_at_utc: String,
    pub sources: BTreeMap<String, String>,
    pub notes: Vec<String>,
    pub llvm_major_latest_emsdk: BTreeMap<String, String>,
    pub flang_major_to_prev_llvm_major_latest_emsdk: BTreeMap<String, Option<String>>,
    pub releases: IndexMap<String, ReleaseRow>,
}

impl MappingDocument {
    pub fn new(
        generated_at: DateTime<Utc>,
        sources: BTreeMap<String, String>,
        llvm_major_latest_emsdk: BTreeMap<String, String>,
        flang_major_to_prev_llvm_major_latest_emsdk: BTreeMap<String, Option<String>>,
        releases: IndexMap<String, ReleaseRow>,
    ) -> Self {
        Self {
            generated_at_utc: generated_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            sources,
            notes: NOTES.iter().map(|note| note.to_string()).collect(),
            llvm_major_latest_emsdk,
            flang_major_to_prev_llvm_major_latest_emsdk,
            releases,
        }
    }

    /// Render as two-space indented JSON with every object's keys sorted and
    /// a trailing newline.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        // serde_json::Map is a BTreeMap here, so the round trip through Value sorts keys
        let value = serde_json::to_value(self)?;
        let mut text = serde_json::to_string_pretty(&value)?;
        text.push('\n');
        Ok(text)
    }
}
