//! Repository context - build once, pass to the command
//!
//! ```text
//! main.rs:
//!   RepoContext::build(cwd) -> &RepoContext
//!   |
//!   v
//! commands/bump.rs:
//!   fn run_bump(ctx: &RepoContext, part)
//! ```

use crate::core::config::BumpConfig;
use crate::core::error::BumpResult;
use crate::core::vcs::SystemGit;
use std::path::{Path, PathBuf};

/// Repository-level state shared by the bump pipeline
pub struct RepoContext {
  /// Git backend rooted at the work tree
  pub git: SystemGit,

  /// bump.toml, or defaults when absent
  pub config: BumpConfig,
}

impl RepoContext {
  /// Locate the enclosing git repository and load its config
  pub fn build(start: &Path) -> BumpResult<Self> {
    let git = SystemGit::open(start)?;
    let config = BumpConfig::load(git.work_tree())?;

    Ok(Self { git, config })
  }

  /// Repository root (absolute path)
  pub fn root(&self) -> &Path {
    self.git.work_tree()
  }

  /// Metadata plist, relative to the root (as staged)
  pub fn metadata_rel(&self) -> &Path {
    &self.config.project.metadata
  }

  /// Changelog, relative to the root (as staged)
  pub fn changelog_rel(&self) -> &Path {
    &self.config.project.changelog
  }

  pub fn metadata_path(&self) -> PathBuf {
    self.root().join(self.metadata_rel())
  }

  pub fn changelog_path(&self) -> PathBuf {
    self.root().join(self.changelog_rel())
  }
}
