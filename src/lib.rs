//! Infers the LLVM version embedded in each emsdk release and derives the
//! emsdk policy map used to build flang for wasm.
//!
//! - [`version`]: version values, errors, upstream sources
//! - [`parser`]: upstream document parsers
//! - [`mapping`]: inference, aggregation, policy, output document
//! - [`pipeline`]: fetch-compute-emit

pub mod cli;
pub mod config;
pub mod logging;
pub mod mapping;
pub mod parser;
pub mod pipeline;
pub mod version;
