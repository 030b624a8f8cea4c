//! Mapping layer: from parsed upstream documents to the emsdk/LLVM map
//!
//! # Modules
//!
//! - [`inference`]: Branch forward/backward fill of LLVM versions per release
//! - [`aggregate`]: Latest emsdk release per LLVM major
//! - [`policy`]: Flang major -> previous LLVM major emsdk policy map
//! - [`assemble`]: Per-release join and the output document
//! - [`resolve`]: Reading the policy back for a concrete LLVM version

pub mod aggregate;
pub mod assemble;
pub mod inference;
pub mod policy;
pub mod resolve;

pub use aggregate::latest_release_per_llvm_major;
pub use assemble::{MappingDocument, ReleaseRow, assemble_releases, llvm_estimates};
pub use inference::{Inference, Provenance, infer_branch_versions};
pub use policy::{MajorRange, flang_prev_major_policy_map};
pub use resolve::{ResolvedEmsdk, resolve_emsdk_for_llvm, resolve_from_file};
