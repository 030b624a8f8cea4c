//! Parser layer
//! - traits.rs: DocumentParser trait definition
//! - types.rs: Common types (Platform, RevisionRow)
//! - release_tags.rs: emscripten-releases-tags.json parser
//! - revisions.rs: bazel revisions.bzl parser
//! - changelog.rs: emscripten ChangeLog.md section extractor

pub mod changelog;
pub mod release_tags;
pub mod revisions;
pub mod traits;
pub mod types;

pub use changelog::{ChangelogParser, ChangelogSections};
pub use release_tags::ReleaseTagsParser;
pub use revisions::RevisionsParser;
pub use traits::{DocumentParser, ParseError};
pub use types::{Platform, RevisionRow};
