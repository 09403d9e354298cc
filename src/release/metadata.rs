//! Bundle metadata stored in a property list (Info.plist)
//!
//! Reads and writes `CFBundleShortVersionString` / `CFBundleVersion`, keeping
//! every other key and the file's on-disk format (XML or binary).

use crate::core::error::{BumpError, BumpResult, MetadataError};
use crate::release::version::Version;
use plist::{Dictionary, Value};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
pub const BUNDLE_VERSION_KEY: &str = "CFBundleVersion";
pub const BUNDLE_NAME_KEY: &str = "CFBundleName";

const BINARY_MAGIC: &[u8] = b"bplist00";

/// On-disk encoding of a property list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistFormat {
  Xml,
  Binary,
}

/// A loaded property list
#[derive(Debug, Clone)]
pub struct BundleMetadata {
  path: PathBuf,
  format: PlistFormat,
  dict: Dictionary,
}

impl BundleMetadata {
  /// Load a property list from disk
  pub fn load(path: &Path) -> BumpResult<Self> {
    let bytes = fs::read(path).map_err(|e| BumpError::message(format!("Failed to read {}: {}", path.display(), e)))?;

    let format = if bytes.starts_with(BINARY_MAGIC) {
      PlistFormat::Binary
    } else {
      PlistFormat::Xml
    };

    let value = Value::from_reader(Cursor::new(bytes)).map_err(|e| malformed(path, e))?;
    let dict = value.into_dictionary().ok_or_else(|| {
      BumpError::Metadata(MetadataError::NotADictionary {
        path: path.to_path_buf(),
      })
    })?;

    Ok(Self {
      path: path.to_path_buf(),
      format,
      dict,
    })
  }

  /// Current version from the short version string and build number
  pub fn version(&self) -> BumpResult<Version> {
    let short = self
      .dict
      .get(SHORT_VERSION_KEY)
      .and_then(Value::as_string)
      .ok_or_else(|| self.missing(SHORT_VERSION_KEY))?;

    let bundle = match self.dict.get(BUNDLE_VERSION_KEY) {
      Some(Value::String(s)) => s.clone(),
      Some(Value::Integer(i)) => i.to_string(),
      _ => return Err(self.missing(BUNDLE_VERSION_KEY)),
    };

    Version::parse(short, &bundle)
  }

  /// `CFBundleName`, if present and non-empty
  pub fn bundle_name(&self) -> Option<&str> {
    self
      .dict
      .get(BUNDLE_NAME_KEY)
      .and_then(Value::as_string)
      .map(str::trim)
      .filter(|s| !s.is_empty())
  }

  /// Store a version; both keys are written as strings
  pub fn set_version(&mut self, version: &Version) {
    self
      .dict
      .insert(SHORT_VERSION_KEY.to_string(), Value::String(version.to_string()));
    self
      .dict
      .insert(BUNDLE_VERSION_KEY.to_string(), Value::String(version.bundle.to_string()));
  }

  /// Overwrite the file in its original format
  pub fn save(&self) -> BumpResult<()> {
    let mut buf = Vec::new();
    let value = Value::Dictionary(self.dict.clone());

    let encoded = match self.format {
      PlistFormat::Xml => value.to_writer_xml(&mut buf),
      PlistFormat::Binary => value.to_writer_binary(&mut buf),
    };
    encoded.map_err(|e| malformed(&self.path, e))?;

    // Xcode-written plists end with a newline; the encoder does not add one
    if self.format == PlistFormat::Xml && !buf.ends_with(b"\n") {
      buf.push(b'\n');
    }

    fs::write(&self.path, buf)
      .map_err(|e| BumpError::message(format!("Failed to write {}: {}", self.path.display(), e)))?;

    Ok(())
  }

  fn missing(&self, key: &str) -> BumpError {
    BumpError::Metadata(MetadataError::MissingKey {
      path: self.path.clone(),
      key: key.to_string(),
    })
  }
}

fn malformed(path: &Path, err: plist::Error) -> BumpError {
  BumpError::Metadata(MetadataError::Malformed {
    path: path.to_path_buf(),
    reason: err.to_string(),
  })
}
