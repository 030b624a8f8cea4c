use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::version::error::VersionFormatError;

/// Exact `MAJOR.MINOR.PATCH`, nothing before or after.
static SEMVER_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").unwrap());

/// A plain `major.minor.patch` version.
///
/// Wraps `semver::Version` but never carries pre-release or build metadata,
/// so ordering is exactly the (major, minor, patch) tuple ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion(Version);

/// Grouping key for releases sharing the same major.minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Branch {
    pub major: u64,
    pub minor: u64,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse a version string that must be exactly `[0-9]+.[0-9]+.[0-9]+`.
    ///
    /// Leading zeros are accepted and dropped: "01.2.3" parses as 1.2.3.
    /// Components must fit in a `u64`.
    pub fn parse(text: &str) -> Result<Self, VersionFormatError> {
        let caps = SEMVER_ONLY_RE
            .captures(text)
            .ok_or_else(|| VersionFormatError::new(text))?;

        let component = |idx: usize| -> Result<u64, VersionFormatError> {
            caps[idx]
                .parse::<u64>()
                .map_err(|_| VersionFormatError::new(text))
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }

    /// Returns true when `text` would be accepted by [`SemanticVersion::parse`]
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn branch(&self) -> Branch {
        Branch {
            major: self.0.major,
            minor: self.0.minor,
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0.major, self.0.minor, self.0.patch)
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
