//! Release building blocks
//!
//! A bump is a single pass over these pieces:
//!
//! 1. **metadata**: read the current version from the bundle's property list
//! 2. **version**: compute the next version and build number
//! 3. **changelog**: turn `## [Unreleased]` into a release entry
//! 4. **metadata**: write the new version back
//!
//! Committing and tagging live in `core::vcs`; the ordering lives in
//! `commands::bump`.
//!
//! # Example bump.toml
//!
//! ```toml
//! [project]
//! product_name = "Widget"
//! metadata = "Resources/Info.plist"
//! changelog = "CHANGELOG.md"
//!
//! [changelog]
//! dated = true
//! ```

pub mod changelog;
pub mod metadata;
pub mod version;

pub use metadata::BundleMetadata;
pub use version::{Part, Version};
