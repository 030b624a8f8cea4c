//! Document source implementations

pub mod github_raw;

pub use github_raw::GitHubRawSource;
