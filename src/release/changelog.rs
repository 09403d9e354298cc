//! Keep-a-changelog release rewriting
//!
//! Turns the `## [Unreleased]` section into a release heading and rewires the
//! comparison links at the bottom of the file:
//!
//! ```text
//! ## [Unreleased]                         ## [Unreleased]
//!                                   =>
//! ...                                     ## [1.1][]
//!                                         ...
//! [Unreleased]: <url>/v1.0...HEAD         [Unreleased]: <url>/v1.1...HEAD
//!                                         [1.1]: <url>/v1.0...v1.1
//! ```
//!
//! A missing heading or link line leaves that part of the file unchanged.

use crate::core::error::BumpResult;
use crate::release::version::Version;
use chrono::NaiveDate;
use regex::{NoExpand, Regex};

/// Result of rewriting a changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogUpdate {
  /// Full rewritten text
  pub content: String,
  /// Whether an `## [Unreleased]` heading was found
  pub heading_inserted: bool,
  /// Whether an `[Unreleased]: <url>/v<old>...HEAD` link was found
  pub links_updated: bool,
}

impl ChangelogUpdate {
  pub fn is_unchanged(&self) -> bool {
    !self.heading_inserted && !self.links_updated
  }
}

/// Rewrite changelog text for a release from `current` to `next`
///
/// `date` is appended to the new heading when given.
pub fn rewrite(content: &str, current: &Version, next: &Version, date: Option<NaiveDate>) -> BumpResult<ChangelogUpdate> {
  // Anything may follow the marker on its line (`## [Unreleased][]`, `- TBD`)
  let heading = Regex::new(r"(?miR)^## \[Unreleased\].*$")?;
  let link = Regex::new(&format!(
    r"(?miR)^\[Unreleased\]:[ \t]*(?P<base>\S+)/v{}\.\.\.HEAD(?P<rest>.*)$",
    regex::escape(&current.to_string())
  ))?;

  let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };

  let mut text = content.to_string();

  let heading_inserted = match heading.find(&text).map(|m| m.end()) {
    Some(at) => {
      let release_heading = match date {
        Some(date) => format!("## [{}][] - {}", next, date.format("%Y-%m-%d")),
        None => format!("## [{}][]", next),
      };
      text.insert_str(at, &format!("{le}{le}{}", release_heading, le = line_ending));
      true
    }
    None => false,
  };

  let links_updated = match link
    .captures(&text)
    .map(|caps| (caps["base"].to_string(), caps["rest"].to_string()))
  {
    Some((base, rest)) => {
      let replacement = format!(
        "[Unreleased]: {base}/v{next}...HEAD{rest}{le}[{next}]: {base}/v{current}...v{next}",
        base = base,
        rest = rest,
        next = next,
        current = current,
        le = line_ending
      );
      text = link.replacen(&text, 1, NoExpand(&replacement)).into_owned();
      true
    }
    None => false,
  };

  Ok(ChangelogUpdate {
    content: text,
    heading_inserted,
    links_updated,
  })
}
