//! Integration tests for the happy path of `bundle-bump <part>`

use crate::helpers::{TestRepo, run_bump, run_bump_with_env};
use anyhow::Result;

#[test]
fn test_minor_bump_end_to_end() -> Result<()> {
  let repo = TestRepo::new("1.4", "10")?;
  let before = repo.head()?;

  let output = run_bump(&repo.path, &["minor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert_eq!(stdout, "1.4 -> 1.5\n");

  // Plist
  let plist = repo.read_file("Info.plist")?;
  assert!(plist.contains("<string>1.5</string>"), "plist: {}", plist);
  assert!(plist.contains("<string>11</string>"), "plist: {}", plist);
  assert!(plist.contains("com.example.Widget"));

  // Commit
  assert_eq!(repo.head_message()?, "Bump version to 1.5 (11).");
  assert_eq!(repo.head_files()?, vec!["CHANGELOG.md".to_string(), "Info.plist".to_string()]);
  assert_ne!(repo.head()?, before);
  assert_eq!(repo.status()?, "");

  // Tags
  assert_eq!(repo.tags()?, vec!["1.5".to_string(), "v1.5".to_string()]);
  let head = repo.head()?;
  for tag in ["1.5", "v1.5"] {
    assert_eq!(repo.tag_type(tag)?, "tag", "{} should be annotated", tag);
    assert_eq!(repo.tag_message(tag)?, "Widget 1.5");
    assert_eq!(repo.tag_target(tag)?, head);
  }

  Ok(())
}

#[test]
fn test_changelog_rewritten() -> Result<()> {
  let repo = TestRepo::new("1.0", "3")?;

  run_bump(&repo.path, &["minor"])?;

  let changelog = repo.read_file("CHANGELOG.md")?;
  let lines: Vec<&str> = changelog.lines().collect();

  let unreleased = lines.iter().position(|l| *l == "## [Unreleased]").unwrap();
  assert_eq!(lines[unreleased + 2], "## [1.1][]");
  assert_eq!(lines[unreleased + 4], "### Fixed");

  let link = lines.iter().position(|l| l.starts_with("[Unreleased]:")).unwrap();
  assert_eq!(lines[link], "[Unreleased]: https://example.com/repo/v1.1...HEAD");
  assert_eq!(lines[link + 1], "[1.1]: https://example.com/repo/v1.0...v1.1");
  assert_eq!(lines[link + 2], "[1.0]: https://example.com/repo/v0.9...v1.0");

  Ok(())
}

#[test]
fn test_patch_bump() -> Result<()> {
  let repo = TestRepo::new("2.0.3", "7")?;

  let output = run_bump(&repo.path, &["patch"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout), "2.0.3 -> 2.0.4\n");

  assert_eq!(repo.head_message()?, "Bump version to 2.0.4 (8).");
  assert_eq!(repo.tags()?, vec!["2.0.4".to_string(), "v2.0.4".to_string()]);

  let plist = repo.read_file("Info.plist")?;
  assert!(plist.contains("<string>2.0.4</string>"));
  assert!(plist.contains("<string>8</string>"));

  Ok(())
}

#[test]
fn test_major_bump_drops_zero_patch() -> Result<()> {
  let repo = TestRepo::new("1.9", "3")?;

  let output = run_bump(&repo.path, &["major"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout), "1.9 -> 2.0\n");

  assert_eq!(repo.head_message()?, "Bump version to 2.0 (4).");
  assert_eq!(repo.tags()?, vec!["2.0".to_string(), "v2.0".to_string()]);

  Ok(())
}

#[test]
fn test_consecutive_bumps() -> Result<()> {
  let repo = TestRepo::new("1.0", "1")?;

  run_bump(&repo.path, &["patch"])?;
  run_bump(&repo.path, &["minor"])?;

  assert_eq!(repo.head_message()?, "Bump version to 1.1 (3).");
  assert_eq!(
    repo.tags()?,
    vec![
      "1.0.1".to_string(),
      "1.1".to_string(),
      "v1.0.1".to_string(),
      "v1.1".to_string()
    ]
  );

  let changelog = repo.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("## [Unreleased]\n\n## [1.1][]\n\n## [1.0.1][]\n"));
  assert!(changelog.contains(
    "[Unreleased]: https://example.com/repo/v1.1...HEAD\n\
     [1.1]: https://example.com/repo/v1.0.1...v1.1\n\
     [1.0.1]: https://example.com/repo/v1.0...v1.0.1\n"
  ));

  Ok(())
}

#[test]
fn test_runs_from_subdirectory() -> Result<()> {
  let repo = TestRepo::new("1.4", "10")?;
  repo.write_file("Sources/main.swift", "print(\"hi\")\n")?;
  repo.commit("Add sources")?;

  run_bump(&repo.path.join("Sources"), &["minor"])?;

  assert_eq!(repo.head_message()?, "Bump version to 1.5 (11).");
  assert!(repo.read_file("Info.plist")?.contains("<string>1.5</string>"));

  Ok(())
}

#[test]
fn test_inherited_git_dir_is_ignored() -> Result<()> {
  let repo = TestRepo::new("1.4", "10")?;
  repo.write_file("Sources/main.swift", "print(\"hi\")\n")?;
  repo.commit("Add sources")?;
  let other = TestRepo::empty()?;
  let other_git_dir = other.path.join(".git");

  let output = run_bump_with_env(
    &repo.path.join("Sources"),
    &["minor"],
    &[
      ("GIT_DIR", other_git_dir.as_path()),
      ("GIT_WORK_TREE", other.path.as_path()),
    ],
  )?;
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  assert_eq!(repo.head_message()?, "Bump version to 1.5 (11).");
  assert_eq!(repo.tags()?, vec!["1.5".to_string(), "v1.5".to_string()]);
  assert!(other.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_reference_style_unreleased_heading() -> Result<()> {
  let repo = TestRepo::empty()?;
  repo.write_file("Info.plist", &crate::helpers::info_plist("1.0", "1", Some("Widget")))?;
  repo.write_file(
    "CHANGELOG.md",
    "## [Unreleased][]\n\n- Fix\n\n[Unreleased]: https://example.com/repo/v1.0...HEAD\n",
  )?;
  repo.commit("Initial commit")?;

  run_bump(&repo.path, &["minor"])?;

  assert_eq!(
    repo.read_file("CHANGELOG.md")?,
    "## [Unreleased][]\n\n## [1.1][]\n\n- Fix\n\n\
     [Unreleased]: https://example.com/repo/v1.1...HEAD\n\
     [1.1]: https://example.com/repo/v1.0...v1.1\n"
  );

  Ok(())
}

#[test]
fn test_changelog_without_markers_still_commits() -> Result<()> {
  let repo = TestRepo::empty()?;
  repo.write_file("Info.plist", &crate::helpers::info_plist("1.0", "1", Some("Widget")))?;
  repo.write_file("CHANGELOG.md", "# Changelog\n\nNothing here.\n")?;
  repo.commit("Initial commit")?;

  let output = run_bump(&repo.path, &["minor"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Unreleased"), "stderr: {}", stderr);

  assert_eq!(repo.read_file("CHANGELOG.md")?, "# Changelog\n\nNothing here.\n");
  assert_eq!(repo.head_files()?, vec!["Info.plist".to_string()]);
  assert_eq!(repo.tags()?, vec!["1.1".to_string(), "v1.1".to_string()]);

  Ok(())
}

#[test]
fn test_other_files_stay_unstaged() -> Result<()> {
  let repo = TestRepo::new("1.4", "10")?;
  repo.write_file("notes.txt", "scratch\n")?;

  run_bump(&repo.path, &["patch"])?;

  assert_eq!(repo.head_files()?, vec!["CHANGELOG.md".to_string(), "Info.plist".to_string()]);
  assert_eq!(repo.status()?, "?? notes.txt\n");

  Ok(())
}
