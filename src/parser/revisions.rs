//! bazel revisions.bzl parser
//!
//! Extracts per-release checksums from emsdk's bazel revision table.
//!
//! Format example:
//! ```text
//! EMSCRIPTEN_TAGS = {
//!     "4.0.1": struct(
//!         hash = "a3d8d2ef46fc64a0e4a4d9ca3d8d0f31f36e3a56",
//!         sha_linux = "0f1d...",
//!         sha_mac = "9e2c...",
//!     ),
//! }
//! ```

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::parser::traits::{DocumentParser, ParseError};
use crate::parser::types::RevisionRow;

/// Parser for revisions.bzl
pub struct RevisionsParser {
    /// Regex for block start: `"X.Y.Z": struct(`
    block_start_re: Regex,
    /// Regex for a recognized field line: `sha_linux = "hex",`
    field_re: Regex,
}

impl RevisionsParser {
    pub fn new() -> Self {
        Self {
            block_start_re: Regex::new(r#"^\s*"([0-9]+\.[0-9]+\.[0-9]+)": struct\(\s*$"#).unwrap(),
            field_re: Regex::new(
                r#"^\s*(sha_linux|sha_linux_arm64|sha_mac|sha_mac_arm64|sha_win)\s*=\s*"([0-9a-f]+)",\s*$"#,
            )
            .unwrap(),
        }
    }
}

impl Default for RevisionsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for RevisionsParser {
    /// release version -> revision block, in document order
    type Output = IndexMap<String, RevisionRow>;

    fn parse(&self, content: &str) -> Result<Self::Output, ParseError> {
        let mut rows = IndexMap::new();
        let mut current: Option<(String, RevisionRow)> = None;

        for line in content.lines() {
            let Some((_, row)) = current.as_mut() else {
                if let Some(caps) = self.block_start_re.captures(line) {
                    current = Some((caps[1].to_string(), RevisionRow::default()));
                }
                continue;
            };

            if let Some(caps) = self.field_re.captures(line) {
                row.set_field(&caps[1], &caps[2]);
                continue;
            }

            if line.trim() == ")," {
                if let Some((release, row)) = current.take() {
                    rows.insert(release, row);
                }
            }
        }

        if let Some((release, _)) = current {
            debug!("Dropping unterminated revision block for '{}'", release);
        }

        Ok(rows)
    }
}
