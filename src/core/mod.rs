//! Core plumbing for bundle-bump
//!
//! - **config**: bump.toml parsing and validation
//! - **context**: repository context shared by the pipeline
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: git operations (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
