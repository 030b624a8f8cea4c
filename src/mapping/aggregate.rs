//! Latest emsdk release per LLVM major

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::version::error::VersionFormatError;
use crate::version::semver::SemanticVersion;

/// For each LLVM major at or above `min_llvm_major`, the newest emsdk release
/// whose inferred LLVM version has that major.
///
/// Releases with no inferred version are skipped. Keys are the major rendered
/// as a string, matching the output document.
pub fn latest_release_per_llvm_major(
    release_to_llvm: &IndexMap<String, Option<SemanticVersion>>,
    min_llvm_major: u64,
) -> Result<BTreeMap<String, String>, VersionFormatError> {
    let mut latest: BTreeMap<u64, SemanticVersion> = BTreeMap::new();

    for (release, llvm) in release_to_llvm {
        let Some(llvm) = llvm else {
            continue;
        };
        if llvm.major() < min_llvm_major {
            continue;
        }

        let release = SemanticVersion::parse(release)?;
        match latest.get_mut(&llvm.major()) {
            Some(best) if *best >= release => {}
            Some(best) => *best = release,
            None => {
                latest.insert(llvm.major(), release);
            }
        }
    }

    debug!("Latest emsdk release found for {} LLVM majors", latest.len());

    Ok(latest
        .into_iter()
        .map(|(major, release)| (major.to_string(), release.to_string()))
        .collect())
}
