//! Upstream document fixtures and sources

use std::collections::HashMap;

use async_trait::async_trait;
use mockito::{Mock, ServerGuard};

use emsdk_llvm_map::config::SourceUrls;
use emsdk_llvm_map::version::error::FetchError;
use emsdk_llvm_map::version::source::{DocumentSource, UpstreamDocument};
use emsdk_llvm_map::version::sources::GitHubRawSource;

/// Four releases: 3.1.4, 3.1.5 and 3.1.6 share a branch, 4.0.0 is alone
pub const RELEASE_TAGS: &str = r#"{
  "aliases": {
    "latest": "4.0.0"
  },
  "releases": {
    "4.0.0": "hash-400",
    "3.1.6": "hash-316",
    "3.1.5": "hash-315",
    "3.1.4": "hash-314",
    "1.38.0-upstream": "ignored"
  }
}
"#;

/// Checksums for only two of the four releases
pub const REVISIONS: &str = r#"# This file is automatically updated by emsdk/scripts/update_bazel_workspace.py
# DO NOT MODIFY

EMSCRIPTEN_TAGS = {
    "4.0.0": struct(
        hash = "hash400",
        sha_linux = "aaa0",
        sha_linux_arm64 = "aaa1",
        sha_mac = "aaa2",
        sha_mac_arm64 = "aaa3",
        sha_win = "aaa4",
    ),
    "3.1.4": struct(
        hash = "hash314",
        sha_linux = "bbb0",
        sha_win = "bbb4",
    ),
}
"#;

/// Only 3.1.5 names its LLVM version; 3.1.6 has a section without one
pub const CHANGELOG: &str = "\
Change Log
==========

4.0.0 - 01/14/25
----------------
- The minimum supported node version was bumped.

3.1.6 - 12/10/24
----------------
- Fixed a regression in the file packager.

3.1.5 - 12/01/24
----------------
- Updated to LLVM 19.1.0 (#23000)

3.1.4 - 11/20/24
----------------
- Bug fixes.
";

/// In-memory source returning fixed documents
pub struct StaticSource {
    documents: HashMap<UpstreamDocument, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    pub fn with_document(mut self, document: UpstreamDocument, text: &str) -> Self {
        self.documents.insert(document, text.to_string());
        self
    }

    pub fn with_fixtures() -> Self {
        Self::new()
            .with_document(UpstreamDocument::ReleaseTags, RELEASE_TAGS)
            .with_document(UpstreamDocument::Revisions, REVISIONS)
            .with_document(UpstreamDocument::Changelog, CHANGELOG)
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn location(&self, document: UpstreamDocument) -> String {
        format!("static://{}", document.as_str())
    }

    async fn fetch_text(&self, document: UpstreamDocument) -> Result<String, FetchError> {
        match self.documents.get(&document) {
            Some(text) => Ok(text.clone()),
            None => Err(FetchError::NotFound(document.as_str().to_string())),
        }
    }
}

/// Start a server serving the given documents under emsdk-like paths
pub async fn create_upstream_server(
    release_tags: &str,
    revisions: &str,
    changelog: &str,
) -> (ServerGuard, Vec<Mock>) {
    let mut server = mockito::Server::new_async().await;

    let mut mocks = Vec::new();
    for (path, body) in [
        ("/emsdk/emscripten-releases-tags.json", release_tags),
        ("/emsdk/bazel/revisions.bzl", revisions),
        ("/emscripten/ChangeLog.md", changelog),
    ] {
        let mock = server
            .mock("GET", path)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        mocks.push(mock);
    }

    (server, mocks)
}

/// GitHubRawSource pointed at a test server
pub fn source_for(server: &ServerGuard) -> GitHubRawSource {
    let base = server.url();
    GitHubRawSource::new(SourceUrls {
        release_tags: format!("{}/emsdk/emscripten-releases-tags.json", base),
        revisions: format!("{}/emsdk/bazel/revisions.bzl", base),
        changelog: format!("{}/emscripten/ChangeLog.md", base),
    })
    .unwrap()
}
