//! Common types for parsers

use std::collections::BTreeMap;

/// Binary platforms emsdk publishes checksums for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Linux,
    LinuxArm64,
    Mac,
    MacArm64,
    Win,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Linux,
        Platform::LinuxArm64,
        Platform::Mac,
        Platform::MacArm64,
        Platform::Win,
    ];

    /// Returns the field name used in revisions.bzl and in the output
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "sha_linux",
            Platform::LinuxArm64 => "sha_linux_arm64",
            Platform::Mac => "sha_mac",
            Platform::MacArm64 => "sha_mac_arm64",
            Platform::Win => "sha_win",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha_linux" => Ok(Platform::Linux),
            "sha_linux_arm64" => Ok(Platform::LinuxArm64),
            "sha_mac" => Ok(Platform::Mac),
            "sha_mac_arm64" => Ok(Platform::MacArm64),
            "sha_win" => Ok(Platform::Win),
            _ => Err(()),
        }
    }
}

/// One `"X.Y.Z": struct(...)` block of revisions.bzl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionRow {
    /// Checksums for the recognized platforms present in the block
    pub checksums: BTreeMap<Platform, String>,
}

impl RevisionRow {
    /// Records a `key = "value"` field; unrecognized keys are dropped
    pub fn set_field(&mut self, key: &str, value: &str) {
        if let Ok(platform) = key.parse::<Platform>() {
            self.checksums.insert(platform, value.to_string());
        }
    }
}
