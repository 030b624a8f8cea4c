//! Parser trait definition

use crate::version::error::VersionFormatError;

/// Trait for parsing a fetched upstream document
pub trait DocumentParser {
    /// What the document parses into
    type Output;

    /// Parse the content of the document
    fn parse(&self, content: &str) -> Result<Self::Output, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A version inside the document is malformed
    #[error(transparent)]
    Version(#[from] VersionFormatError),
}
