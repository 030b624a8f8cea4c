//! Fetch, compute, emit
//!
//! Each run recomputes the whole mapping from the live upstream documents;
//! nothing is cached between runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::MapConfig;
use crate::mapping::{
    MajorRange, MappingDocument, assemble_releases, flang_prev_major_policy_map,
    infer_branch_versions, latest_release_per_llvm_major, llvm_estimates,
};
use crate::parser::{ChangelogParser, DocumentParser, ReleaseTagsParser, RevisionsParser};
use crate::version::error::MapError;
use crate::version::semver::SemanticVersion;
use crate::version::source::{DocumentSource, UpstreamDocument};

/// Validated generator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub min_emsdk_version: SemanticVersion,
    pub min_llvm_major: u64,
    pub flang_major_range: MajorRange,
}

impl TryFrom<&MapConfig> for GenerateOptions {
    type Error = MapError;

    fn try_from(config: &MapConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            min_emsdk_version: SemanticVersion::parse(&config.min_emsdk_version)?,
            min_llvm_major: config.min_llvm_major,
            flang_major_range: config
                .flang_major_range
                .parse()
                .map_err(|e: crate::mapping::policy::MajorRangeError| {
                    MapError::Config(e.to_string())
                })?,
        })
    }
}

async fn fetch<S: DocumentSource + ?Sized>(
    source: &S,
    document: UpstreamDocument,
) -> Result<String, MapError> {
    source
        .fetch_text(document)
        .await
        .map_err(|source| MapError::Fetch {
            document: document.as_str(),
            source,
        })
}

/// Build the mapping document from the three upstream documents.
///
/// Documents are fetched one after another; any failure aborts the run before
/// anything is computed.
pub async fn build_mapping<S: DocumentSource + ?Sized>(
    source: &S,
    options: &GenerateOptions,
    generated_at: DateTime<Utc>,
) -> Result<MappingDocument, MapError> {
    let tags_text = fetch(source, UpstreamDocument::ReleaseTags).await?;
    let revisions_text = fetch(source, UpstreamDocument::Revisions).await?;
    let changelog_text = fetch(source, UpstreamDocument::Changelog).await?;

    let release_hashes = ReleaseTagsParser.parse(&tags_text)?;
    let revisions = RevisionsParser::new().parse(&revisions_text)?;
    let changelog = ChangelogParser::new();
    let sections = changelog.parse(&changelog_text)?;
    debug!(
        "Parsed {} release hashes, {} revision blocks, {} changelog sections",
        release_hashes.len(),
        revisions.len(),
        sections.len()
    );

    let explicit = changelog.explicit_versions(&sections);
    let inferred = infer_branch_versions(&explicit)?;

    let releases = assemble_releases(
        &release_hashes,
        &revisions,
        &inferred,
        &options.min_emsdk_version,
    )?;

    let llvm_major_map =
        latest_release_per_llvm_major(&llvm_estimates(&releases), options.min_llvm_major)?;
    let policy_map = flang_prev_major_policy_map(&llvm_major_map, options.flang_major_range);

    let sources: BTreeMap<String, String> = UpstreamDocument::ALL
        .iter()
        .map(|document| (document.as_str().to_string(), source.location(*document)))
        .collect();

    Ok(MappingDocument::new(
        generated_at,
        sources,
        llvm_major_map,
        policy_map,
        releases,
    ))
}

/// Write the document, replacing `path` only once the full text is on disk
pub fn write_mapping(document: &MappingDocument, path: &Path) -> Result<(), MapError> {
    let text = document.to_json_string()?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path: PathBuf = path.with_file_name(tmp_name);

    let written =
        std::fs::write(&tmp_path, text).and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!("Wrote {}", path.display());
    Ok(())
}

/// Number of releases per inference mode
pub fn provenance_counts(document: &MappingDocument) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for row in document.releases.values() {
        *counts.entry(row.llvm_inference.mode.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Fetch, compute and write in one go
pub async fn generate<S: DocumentSource + ?Sized>(
    source: &S,
    options: &GenerateOptions,
    output: &Path,
) -> Result<MappingDocument, MapError> {
    let document = build_mapping(source, options, Utc::now()).await?;
    write_mapping(&document, output)?;

    info!(
        "llvm_major_latest_emsdk: {}",
        serde_json::to_string(&document.llvm_major_latest_emsdk)?
    );
    info!(
        "flang_major_to_prev_llvm_major_latest_emsdk: {}",
        serde_json::to_string(&document.flang_major_to_prev_llvm_major_latest_emsdk)?
    );
    info!("llvm inference modes: {:?}", provenance_counts(&document));

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Provenance;
    use crate::version::error::FetchError;
    use crate::version::source::MockDocumentSource;
    use chrono::TimeZone;

    const TAGS: &str = r#"{"releases": {"3.1.0": "h0", "3.1.1": "h1", "3.1.2": "h2", "2.0.0": "old"}}"#;

    const REVISIONS: &str = r#"
    "3.1.2": struct(
        hash = "h2",
        sha_linux = "aa",
    ),
"#;

    const CHANGELOG: &str = "\
3.1.2
-----
- nothing about the compiler

3.1.1
-----
- Updated to LLVM 16.0.0 and LLVM 15.0.7

3.1.0
-----
- initial
";

    fn options() -> GenerateOptions {
        GenerateOptions {
            min_emsdk_version: SemanticVersion::new(3, 1, 0),
            min_llvm_major: 16,
            flang_major_range: MajorRange::new(16, 18).unwrap(),
        }
    }

    fn mock_source() -> MockDocumentSource {
        let mut source = MockDocumentSource::new();
        source.expect_fetch_text().returning(|document| {
            Ok(match document {
                UpstreamDocument::ReleaseTags => TAGS.to_string(),
                UpstreamDocument::Revisions => REVISIONS.to_string(),
                UpstreamDocument::Changelog => CHANGELOG.to_string(),
            })
        });
        source
            .expect_location()
            .returning(|document| format!("mock://{}", document.as_str()));
        source
    }

    #[tokio::test]
    async fn build_mapping_joins_all_documents() {
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let document = build_mapping(&mock_source(), &options(), generated_at)
            .await
            .unwrap();

        assert_eq!(document.generated_at_utc, "2025-06-01T00:00:00.000000+00:00");
        assert_eq!(
            document.releases.keys().collect::<Vec<_>>(),
            vec!["3.1.0", "3.1.1", "3.1.2"]
        );

        let first = &document.releases["3.1.0"];
        assert_eq!(first.llvm_inference.mode, Provenance::BackwardFill);
        assert_eq!(first.llvm_inference.anchor_release.as_deref(), Some("3.1.1"));
        assert_eq!(first.llvm_major_estimate, Some(16));

        let last = &document.releases["3.1.2"];
        assert_eq!(last.llvm_inference.mode, Provenance::ForwardFill);
        assert_eq!(last.binary_checksums.get("sha_linux").map(String::as_str), Some("aa"));

        assert_eq!(
            document.llvm_major_latest_emsdk,
            BTreeMap::from([("16".to_string(), "3.1.2".to_string())])
        );
        assert_eq!(
            document.flang_major_to_prev_llvm_major_latest_emsdk,
            BTreeMap::from([
                ("16".to_string(), None),
                ("17".to_string(), Some("3.1.2".to_string())),
                ("18".to_string(), None),
            ])
        );
        assert_eq!(
            document.sources.get("emscripten_changelog_md").map(String::as_str),
            Some("mock://emscripten_changelog_md")
        );
        assert_eq!(
            provenance_counts(&document),
            BTreeMap::from([("backward_fill", 1), ("explicit", 1), ("forward_fill", 1)])
        );
    }

    #[tokio::test]
    async fn build_mapping_aborts_on_fetch_failure() {
        let mut source = MockDocumentSource::new();
        source.expect_fetch_text().returning(|document| match document {
            UpstreamDocument::Revisions => Err(FetchError::NotFound("revisions.bzl".to_string())),
            _ => Ok("{}".to_string()),
        });

        let result = build_mapping(&source, &options(), Utc::now()).await;

        assert!(matches!(
            result,
            Err(MapError::Fetch {
                document: "emsdk_bazel_revisions_bzl",
                ..
            })
        ));
    }

    #[test]
    fn options_from_config_validates_values() {
        let config = MapConfig {
            flang_major_range: "23-19".to_string(),
            ..MapConfig::default()
        };
        assert!(matches!(
            GenerateOptions::try_from(&config),
            Err(MapError::Config(_))
        ));

        let config = MapConfig {
            min_emsdk_version: "3.1".to_string(),
            ..MapConfig::default()
        };
        assert!(matches!(
            GenerateOptions::try_from(&config),
            Err(MapError::Version(_))
        ));

        let options = GenerateOptions::try_from(&MapConfig::default()).unwrap();
        assert_eq!(options.flang_major_range, MajorRange::new(19, 23).unwrap());
    }

    #[test]
    fn write_mapping_replaces_output_and_leaves_no_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("emsdk-llvm-map.json");
        std::fs::write(&path, "stale").unwrap();

        let document = MappingDocument::new(
            Utc::now(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            Default::default(),
        );
        write_mapping(&document, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, document.to_json_string().unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_mapping_removes_temp_file_when_rename_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        // A non-empty directory in the way makes the rename fail
        let path = dir.path().join("emsdk-llvm-map.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let document = MappingDocument::new(
            Utc::now(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            Default::default(),
        );

        assert!(matches!(write_mapping(&document, &path), Err(MapError::Io(_))));
        assert!(!dir.path().join("emsdk-llvm-map.json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn write_mapping_fails_for_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("map.json");

        let document = MappingDocument::new(
            Utc::now(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            Default::default(),
        );

        assert!(matches!(write_mapping(&document, &path), Err(MapError::Io(_))));
        assert!(!path.exists());
    }
}
