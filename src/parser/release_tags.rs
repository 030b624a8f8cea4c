//! emscripten-releases-tags.json parser
//!
//! Format example:
//! ```json
//! {
//!   "aliases": { "latest": "4.0.1" },
//!   "releases": {
//!     "4.0.1": "a3d8d2ef46fc64a0e4a4d9ca3d8d0f31f36e3a56",
//!     "4.0.0": "b7b6ae1a5c3a4e79c0a4e1dbd1f2f3de1f64c7a2"
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::parser::traits::{DocumentParser, ParseError};
use crate::version::semver::SemanticVersion;

/// Shape of emscripten-releases-tags.json (only the fields we read)
#[derive(Debug, Deserialize)]
struct ReleaseTagsDocument {
    #[serde(default)]
    releases: IndexMap<String, Value>,
}

/// Parser for the emsdk release -> hash document
pub struct ReleaseTagsParser;

impl DocumentParser for ReleaseTagsParser {
    /// release version -> emscripten-releases hash, in document order
    type Output = IndexMap<String, String>;

    fn parse(&self, content: &str) -> Result<Self::Output, ParseError> {
        let document: ReleaseTagsDocument = serde_json::from_str(content)?;

        let mut hashes = IndexMap::new();
        for (release, hash) in document.releases {
            if !SemanticVersion::is_valid(&release) {
                debug!("Skipping non-semver release tag '{}'", release);
                continue;
            }
            let Some(hash) = hash.as_str() else {
                debug!("Skipping release '{}' with non-string hash", release);
                continue;
            };
            hashes.insert(release, hash.to_string());
        }

        Ok(hashes)
    }
}
