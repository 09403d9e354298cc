//! Bundle version model: `major.minor[.patch]` plus a build counter

use crate::core::error::{BumpError, BumpResult};
use std::fmt;
use std::str::FromStr;

/// Which part of the version to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
  Major,
  Minor,
  Patch,
}

impl FromStr for Part {
  type Err = BumpError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "major" => Ok(Part::Major),
      "minor" => Ok(Part::Minor),
      "patch" => Ok(Part::Patch),
      other => Err(BumpError::Usage { part: other.to_string() }),
    }
  }
}

impl fmt::Display for Part {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Part::Major => "major",
      Part::Minor => "minor",
      Part::Patch => "patch",
    };
    f.write_str(name)
  }
}

/// A released version of the bundle
///
/// `bundle` is the build counter stored in `CFBundleVersion`. It moves forward
/// by one on every bump, whichever part changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
  pub major: u64,
  pub minor: u64,
  pub patch: u64,
  pub bundle: u64,
}

impl Version {
  pub fn new(major: u64, minor: u64, patch: u64, bundle: u64) -> Self {
    Self {
      major,
      minor,
      patch,
      bundle,
    }
  }

  /// Parse a dotted version (`"1.2"`, `"1.2.3"`) and a build number
  ///
  /// Missing trailing components are zero. Empty, non-numeric, or a fourth
  /// segment is an error.
  pub fn parse(version: &str, bundle: &str) -> BumpResult<Self> {
    let mut parts = [0u64; 3];
    let segments: Vec<&str> = version.trim().split('.').collect();

    if segments.len() > parts.len() {
      return Err(BumpError::Parse {
        input: version.to_string(),
        reason: "more than three components".to_string(),
      });
    }

    for (slot, segment) in parts.iter_mut().zip(&segments) {
      *slot = parse_number(segment)?;
    }

    Ok(Self::new(parts[0], parts[1], parts[2], parse_number(bundle.trim())?))
  }

  /// Next version for the given part; lower parts reset to zero
  ///
  /// Fails when a counter is already at `u64::MAX`.
  pub fn increment(&self, part: Part) -> BumpResult<Self> {
    let (major, minor, patch) = match part {
      Part::Major => (bump_counter(self.major, "major")?, 0, 0),
      Part::Minor => (self.major, bump_counter(self.minor, "minor")?, 0),
      Part::Patch => (self.major, self.minor, bump_counter(self.patch, "patch")?),
    };
    Ok(Self::new(major, minor, patch, bump_counter(self.bundle, "build number")?))
  }
}

fn bump_counter(value: u64, name: &str) -> BumpResult<u64> {
  value.checked_add(1).ok_or_else(|| BumpError::Parse {
    input: value.to_string(),
    reason: format!("{} cannot be incremented past {}", name, u64::MAX),
  })
}

fn parse_number(segment: &str) -> BumpResult<u64> {
  segment.parse().map_err(|e: std::num::ParseIntError| BumpError::Parse {
    input: segment.to_string(),
    reason: e.to_string(),
  })
}

/// Short form: patch is left out when zero
impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.patch == 0 {
      write!(f, "{}.{}", self.major, self.minor)
    } else {
      write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
  }
}
