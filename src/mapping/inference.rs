//! Branch inference of the LLVM version embedded in each emsdk release
//!
//! Releases are grouped by their own `major.minor` branch. Inside a branch the
//! releases are walked in ascending patch order: an explicit changelog mention
//! is taken as is, a release after a mention inherits the most recent one
//! (forward fill), and releases before the first mention inherit that first
//! mention (backward fill). A branch without any mention stays unknown.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::version::error::VersionFormatError;
use crate::version::semver::{Branch, SemanticVersion};

/// How an inferred version was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The release's own changelog section names the version
    Explicit,
    /// Copied from the nearest earlier explicit release in the branch
    ForwardFill,
    /// Copied from the first explicit release in the branch
    BackwardFill,
    /// No explicit mention anywhere in the branch
    Unknown,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Explicit => "explicit",
            Provenance::ForwardFill => "forward_fill",
            Provenance::BackwardFill => "backward_fill",
            Provenance::Unknown => "unknown",
        }
    }
}

/// Inferred LLVM version of one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub version: Option<SemanticVersion>,
    /// Release whose explicit mention was used (itself when explicit)
    pub anchor: Option<String>,
    pub mode: Provenance,
}

impl Inference {
    pub fn unknown() -> Self {
        Self {
            version: None,
            anchor: None,
            mode: Provenance::Unknown,
        }
    }

    fn from_anchor(version: &SemanticVersion, anchor: &str, mode: Provenance) -> Self {
        Self {
            version: Some(version.clone()),
            anchor: Some(anchor.to_string()),
            mode,
        }
    }
}

/// Infer the LLVM version of every release in `explicit`.
///
/// `explicit` maps each release to the version its changelog section states,
/// or `None`. Fails only when a release key is not a semantic version.
///
/// The output holds every input release, grouped by branch (in order of
/// first appearance) and sorted by ascending patch within a branch.
pub fn infer_branch_versions(
    explicit: &IndexMap<String, Option<SemanticVersion>>,
) -> Result<IndexMap<String, Inference>, VersionFormatError> {
    let mut by_branch: IndexMap<Branch, Vec<(SemanticVersion, Option<&SemanticVersion>)>> =
        IndexMap::new();
    for (release, version) in explicit {
        let parsed = SemanticVersion::parse(release)?;
        by_branch
            .entry(parsed.branch())
            .or_default()
            .push((parsed, version.as_ref()));
    }

    let mut out = IndexMap::with_capacity(explicit.len());
    for (_, mut members) in by_branch {
        members.sort_by_key(|(release, _)| release.patch());
        for (release, inference) in infer_branch(&members) {
            out.insert(release, inference);
        }
    }

    Ok(out)
}

/// Two-pass fill over one branch sorted by ascending patch
fn infer_branch(members: &[(SemanticVersion, Option<&SemanticVersion>)]) -> Vec<(String, Inference)> {
    let keys: Vec<String> = members.iter().map(|(release, _)| release.to_string()).collect();
    let mut assigned: Vec<Inference> = Vec::with_capacity(members.len());

    let mut current: Option<(&SemanticVersion, &str)> = None;
    let mut first_known: Option<usize> = None;

    // Ascending pass: explicit values and forward fill
    for (idx, ((_, explicit), key)) in members.iter().zip(&keys).enumerate() {
        if let Some(version) = explicit {
            current = Some((*version, key.as_str()));
            if first_known.is_none() {
                first_known = Some(idx);
            }
            assigned.push(Inference::from_anchor(version, key, Provenance::Explicit));
            continue;
        }

        assigned.push(match current {
            Some((version, anchor)) => {
                Inference::from_anchor(version, anchor, Provenance::ForwardFill)
            }
            None => Inference::unknown(),
        });
    }

    // Prefix pass: everything before the first mention takes that mention
    if let Some(first) = first_known {
        let (before, rest) = assigned.split_at_mut(first);
        let anchor = &rest[0];
        for slot in before {
            *slot = Inference {
                version: anchor.version.clone(),
                anchor: anchor.anchor.clone(),
                mode: Provenance::BackwardFill,
            };
        }
    }

    keys.into_iter().zip(assigned).collect()
}
