//! emscripten ChangeLog.md section extractor
//!
//! A release section starts at a header line naming the release, which must be
//! followed immediately by a dash underline:
//!
//! ```text
//! 4.0.1 - 01/23/25
//! ----------------
//! - Updated to LLVM 20.0.0
//!
//! 4.0.0 - 01/14/25
//! ----------------
//! ```
//!
//! A header without the underline is ordinary text of the preceding section.

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::parser::traits::{DocumentParser, ParseError};
use crate::version::semver::SemanticVersion;

/// release version -> body lines (between the underline and the next header)
pub type ChangelogSections = IndexMap<String, Vec<String>>;

/// Parser for ChangeLog.md
pub struct ChangelogParser {
    /// Regex for a release header: `X.Y.Z [(text)] [- MM/DD/YY]`
    header_re: Regex,
    /// Regex for an embedded compiler mention: `LLVM X.Y.Z`
    llvm_version_re: Regex,
}

impl ChangelogParser {
    pub fn new() -> Self {
        Self {
            header_re: Regex::new(
                r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:\s*\(.*\))?(?:\s*-\s*[0-9]{2}/[0-9]{2}/[0-9]{2})?\s*$",
            )
            .unwrap(),
            llvm_version_re: Regex::new(r"LLVM\s+([0-9]+)\.([0-9]+)\.([0-9]+)").unwrap(),
        }
    }

    /// Returns the release named by `line` if it is a header candidate
    fn header_release(&self, line: &str) -> Option<String> {
        let caps = self.header_re.captures(line.trim())?;
        Some(format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]))
    }

    /// Highest `LLVM X.Y.Z` mentioned anywhere in the section
    ///
    /// Mentions are compared as versions, not by position, so a note listing
    /// several LLVM points resolves to the newest one. A mention that is not a
    /// usable version (a component overflowing `u64`) is skipped.
    pub fn highest_llvm_version<S: AsRef<str>>(&self, lines: &[S]) -> Option<SemanticVersion> {
        let mut highest: Option<SemanticVersion> = None;

        for line in lines {
            for caps in self.llvm_version_re.captures_iter(line.as_ref()) {
                let text = format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]);
                let found = match SemanticVersion::parse(&text) {
                    Ok(found) => found,
                    Err(e) => {
                        debug!("Skipping LLVM mention: {}", e);
                        continue;
                    }
                };
                if highest.as_ref().is_none_or(|current| found > *current) {
                    highest = Some(found);
                }
            }
        }

        highest
    }

    /// Explicit LLVM version of every section (`None` when the section has no mention)
    pub fn explicit_versions(
        &self,
        sections: &ChangelogSections,
    ) -> IndexMap<String, Option<SemanticVersion>> {
        sections
            .iter()
            .map(|(release, lines)| (release.clone(), self.highest_llvm_version(lines)))
            .collect()
    }
}

impl Default for ChangelogParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_section_underline(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}

impl DocumentParser for ChangelogParser {
    type Output = ChangelogSections;

    fn parse(&self, content: &str) -> Result<Self::Output, ParseError> {
        let lines: Vec<&str> = content.lines().collect();

        // (header line index, release)
        let mut headers: Vec<(usize, String)> = Vec::new();
        let mut i = 0;
        while i + 1 < lines.len() {
            match self.header_release(lines[i]) {
                Some(release) if is_section_underline(lines[i + 1]) => {
                    headers.push((i, release));
                    i += 2;
                }
                _ => i += 1,
            }
        }

        let mut sections = ChangelogSections::new();
        for (idx, (line_no, release)) in headers.iter().enumerate() {
            let body_start = line_no + 2;
            let body_end = headers
                .get(idx + 1)
                .map(|(next, _)| *next)
                .unwrap_or(lines.len());
            let body = lines[body_start..body_end]
                .iter()
                .map(|line| line.to_string())
                .collect();

            // A repeated header replaces the earlier body but keeps its position
            if sections.insert(release.clone(), body).is_some() {
                debug!("Duplicate changelog header for '{}'; keeping the later section", release);
            }
        }

        debug!("Found {} changelog sections", sections.len());
        Ok(sections)
    }
}
