//! Version layer: version values, errors, and upstream document retrieval
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Parser    │────▶│   Mapping   │
//! │  (fetch)    │     │ (documents) │     │ (inference) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │   Sources   │                         │   Semver    │
//! │ (github raw)│                         │(version cmp)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Source trait for fetching upstream documents
//! - [`sources`]: Concrete source implementations
//! - [`error`]: Error types for every stage
//! - [`semver`]: Plain `major.minor.patch` version values

pub mod error;
pub mod semver;
pub mod source;
pub mod sources;
