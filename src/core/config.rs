use crate::core::error::{BumpError, BumpResult, ConfigError, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration for bundle-bump
/// Searched in order: bump.toml, .bump.toml, .config/bump.toml
///
/// Every key is optional; a repository without a config file gets the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BumpConfig {
  #[serde(default)]
  pub project: ProjectConfig,
  #[serde(default)]
  pub changelog: ChangelogConfig,
}

/// Files and naming for the released product
///
/// # Example
///
/// ```toml
/// [project]
/// product_name = "MyLib"
/// metadata = "Resources/Info.plist"
/// changelog = "CHANGELOG.md"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
  /// Name used in tag messages (default: CFBundleName from the plist)
  #[serde(default)]
  pub product_name: Option<String>,

  /// Property list holding the version, relative to the repository root
  #[serde(default = "default_metadata_path")]
  pub metadata: PathBuf,

  /// Keep-a-changelog style Markdown file, relative to the repository root
  #[serde(default = "default_changelog_path")]
  pub changelog: PathBuf,
}

fn default_metadata_path() -> PathBuf {
  PathBuf::from("Info.plist")
}

fn default_changelog_path() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      product_name: None,
      metadata: default_metadata_path(),
      changelog: default_changelog_path(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangelogConfig {
  /// Append ` - YYYY-MM-DD` to the new release heading
  #[serde(default)]
  pub dated: bool,
}

impl ProjectConfig {
  /// Paths must stay inside the repository, both get staged by name
  pub fn validate(&self) -> BumpResult<()> {
    for (key, path) in [("metadata", &self.metadata), ("changelog", &self.changelog)] {
      if path.as_os_str().is_empty() {
        return Err(invalid(format!("`project.{}` must not be empty", key)));
      }
      if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid(format!(
          "`project.{}` must be relative to the repository root (got {})",
          key,
          path.display()
        )));
      }
    }

    if let Some(name) = &self.product_name
      && name.trim().is_empty()
    {
      return Err(invalid("`project.product_name` must not be blank"));
    }

    Ok(())
  }
}

fn invalid(reason: impl Into<String>) -> BumpError {
  BumpError::Config(ConfigError::Invalid { reason: reason.into() })
}

impl BumpConfig {
  /// Find config file in search order: bump.toml, .bump.toml, .config/bump.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("bump.toml"),
      path.join(".bump.toml"),
      path.join(".config").join("bump.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the repository root, falling back to defaults when absent
  pub fn load(path: &Path) -> BumpResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content)?;
    config.project.validate()?;

    Ok(config)
  }

  /// Parse config from TOML text
  pub fn parse(content: &str) -> BumpResult<Self> {
    Ok(toml_edit::de::from_str(content)?)
  }
}
