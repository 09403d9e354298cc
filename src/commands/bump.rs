//! `bundle-bump <major|minor|patch>`
//!
//! Reads the version, rewrites the changelog and plist, commits both files and
//! tags the commit twice (`1.5` and `v1.5`). Steps run in order and the first
//! failure aborts the run; nothing already written is rolled back.

use crate::core::context::RepoContext;
use crate::core::error::{BumpError, BumpResult, ConfigError, ResultExt};
use crate::release::changelog;
use crate::release::{BundleMetadata, Part, Version};
use std::fs;

/// Run the bump command
pub fn run_bump(ctx: &RepoContext, part: Part) -> BumpResult<()> {
  let metadata_path = ctx.metadata_path();
  let changelog_path = ctx.changelog_path();

  let mut metadata = BundleMetadata::load(&metadata_path)?;
  let current = metadata.version()?;
  let next = current.increment(part)?;
  let product = product_name(ctx, &metadata)?;

  let changelog_text = fs::read_to_string(&changelog_path)
    .with_context(|| format!("Failed to read {}", changelog_path.display()))?;

  println!("{} -> {}", current, next);

  // 1. Changelog
  let date = ctx.config.changelog.dated.then(|| chrono::Local::now().date_naive());
  let update = changelog::rewrite(&changelog_text, &current, &next, date)?;

  if !update.heading_inserted {
    eprintln!(
      "⚠️  No `## [Unreleased]` heading in {}, release heading not added",
      ctx.changelog_rel().display()
    );
  }
  if !update.links_updated {
    eprintln!(
      "⚠️  No `[Unreleased]: <url>/v{}...HEAD` link in {}, comparison links not updated",
      current,
      ctx.changelog_rel().display()
    );
  }
  if !update.is_unchanged() {
    fs::write(&changelog_path, &update.content)
      .with_context(|| format!("Failed to write {}", changelog_path.display()))?;
    eprintln!("📝 Updated {}", ctx.changelog_rel().display());
  }

  // 2. Plist
  metadata.set_version(&next);
  metadata.save()?;
  eprintln!("📝 Updated {}", ctx.metadata_rel().display());

  // 3. Commit
  ctx.git.stage(&[ctx.changelog_rel(), ctx.metadata_rel()])?;
  ctx.git.commit(&commit_message(&next))?;
  let head = ctx.git.head_commit()?;
  eprintln!("📦 Committed {}", head.get(..7).unwrap_or(head.as_str()));

  // 4. Tags
  let message = tag_message(&product, &next);
  for tag in tag_names(&next) {
    ctx.git.create_annotated_tag(&tag, &message)?;
    eprintln!("🏷️  Created tag {}", tag);
  }

  Ok(())
}

/// Product name for tag messages: config first, then `CFBundleName`
fn product_name(ctx: &RepoContext, metadata: &BundleMetadata) -> BumpResult<String> {
  if let Some(name) = &ctx.config.project.product_name {
    return Ok(name.trim().to_string());
  }

  metadata.bundle_name().map(str::to_string).ok_or_else(|| {
    BumpError::Config(ConfigError::MissingProductName {
      metadata: ctx.metadata_rel().to_path_buf(),
    })
  })
}

fn commit_message(version: &Version) -> String {
  format!("Bump version to {} ({}).", version, version.bundle)
}

/// Bare and `v`-prefixed tag names
fn tag_names(version: &Version) -> [String; 2] {
  [version.to_string(), format!("v{}", version)]
}

fn tag_message(product: &str, version: &Version) -> String {
  format!("{} {}", product, version)
}
