//! Source trait for fetching upstream documents

#[cfg(test)]
use mockall::automock;

use crate::version::error::FetchError;

/// The three upstream documents the mapping is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamDocument {
    /// emsdk `emscripten-releases-tags.json`
    ReleaseTags,
    /// emsdk `bazel/revisions.bzl`
    Revisions,
    /// emscripten `ChangeLog.md`
    Changelog,
}

impl UpstreamDocument {
    pub const ALL: [UpstreamDocument; 3] = [
        UpstreamDocument::ReleaseTags,
        UpstreamDocument::Revisions,
        UpstreamDocument::Changelog,
    ];

    /// Returns the string representation of the document
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamDocument::ReleaseTags => "emsdk_releases_tags_json",
            UpstreamDocument::Revisions => "emsdk_bazel_revisions_bzl",
            UpstreamDocument::Changelog => "emscripten_changelog_md",
        }
    }
}

/// Trait for fetching upstream documents as text
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns where the document is fetched from (echoed in the output)
    fn location(&self, document: UpstreamDocument) -> String;

    /// Fetches the full text of a document
    ///
    /// # Returns
    /// * `Ok(String)` - The document body
    /// * `Err(FetchError)` - If the fetch fails; callers treat this as fatal
    async fn fetch_text(&self, document: UpstreamDocument) -> Result<String, FetchError>;
}
