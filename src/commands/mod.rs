//! CLI commands for bundle-bump
//!
//! - **bump**: bump the bundle version, update the changelog, commit and tag
//!
//! Commands accept `&RepoContext` so the repository and config are located once.

pub mod bump;

pub use bump::run_bump;
