use thiserror::Error;

/// A version string that is not exactly `MAJOR.MINOR.PATCH`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Not a semantic version: '{input}'")]
pub struct VersionFormatError {
    pub input: String,
}

impl VersionFormatError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Failed to fetch {document}: {source}")]
    Fetch {
        document: &'static str,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Parse(#[from] crate::parser::ParseError),

    #[error(transparent)]
    Version(#[from] VersionFormatError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid LLVM version '{0}'. Expected X.Y.Z.")]
    InvalidLlvmVersion(String),

    #[error("Mapping file not found: {0}")]
    MapFileNotFound(String),

    #[error("No emsdk policy mapping for LLVM major {major}. Update the mapping file.")]
    NoPolicyMapping { major: u64 },

    #[error("Mapped emsdk release '{0}' is missing from releases table.")]
    MissingRelease(String),

    #[error("Mapped emsdk release '{0}' has no emscripten_release_hash.")]
    MissingHash(String),

    #[error("Mapped emsdk release '{0}' has no llvm_major_estimate.")]
    MissingMajorEstimate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid mapping file: {0}")]
    Json(#[from] serde_json::Error),
}
