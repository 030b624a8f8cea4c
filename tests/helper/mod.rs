//! Shared test utilities

#![allow(dead_code, unused_imports)]

pub mod upstream;

pub use upstream::{
    CHANGELOG, RELEASE_TAGS, REVISIONS, StaticSource, create_upstream_server, source_for,
};
