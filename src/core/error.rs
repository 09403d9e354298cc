//! Error types for bundle-bump with contextual messages and exit codes
//!
//! Every failure aborts the whole run. The error type only decides what the
//! user sees and which exit status the process ends with.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for bundle-bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad part, bad version string, config, malformed plist)
  User,
  /// System error (I/O, git could not be spawned)
  System,
  /// Status propagated from a failing git command
  Propagated(i32),
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    match self {
      ExitCode::User => 1,
      ExitCode::System => 2,
      ExitCode::Propagated(code) => code,
    }
  }
}

/// Main error type for bundle-bump
#[derive(Debug)]
pub enum BumpError {
  /// Unsupported increment part
  Usage { part: String },

  /// Malformed version or build number
  Parse { input: String, reason: String },

  /// Configuration errors
  Config(ConfigError),

  /// Metadata (property list) errors
  Metadata(MetadataError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl BumpError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    BumpError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      BumpError::Message { message, context, help } => BumpError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      BumpError::Io(e) => BumpError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      BumpError::Usage { .. } => ExitCode::User,
      BumpError::Parse { .. } => ExitCode::User,
      BumpError::Config(_) => ExitCode::User,
      BumpError::Metadata(_) => ExitCode::User,
      BumpError::Git(GitError::CommandFailed { status: Some(code), .. }) => ExitCode::Propagated(*code),
      BumpError::Git(_) => ExitCode::System,
      BumpError::Io(_) => ExitCode::System,
      BumpError::Message { .. } => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      BumpError::Usage { .. } => Some("Valid parts are: major, minor, patch.".to_string()),
      BumpError::Parse { .. } => {
        Some("CFBundleShortVersionString must look like 1.2 or 1.2.3; CFBundleVersion must be an integer.".to_string())
      }
      BumpError::Config(e) => e.help_message(),
      BumpError::Metadata(e) => e.help_message(),
      BumpError::Git(e) => e.help_message(),
      BumpError::Message { help, .. } => help.clone(),
      BumpError::Io(_) => None,
    }
  }
}

impl fmt::Display for BumpError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BumpError::Usage { part } => write!(f, "Unsupported version part '{}'", part),
      BumpError::Parse { input, reason } => write!(f, "Invalid version number '{}': {}", input, reason),
      BumpError::Config(e) => write!(f, "{}", e),
      BumpError::Metadata(e) => write!(f, "{}", e),
      BumpError::Git(e) => write!(f, "{}", e),
      BumpError::Io(e) => write!(f, "I/O error: {}", e),
      BumpError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for BumpError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      BumpError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for BumpError {
  fn from(err: io::Error) -> Self {
    BumpError::Io(err)
  }
}

impl From<String> for BumpError {
  fn from(msg: String) -> Self {
    BumpError::message(msg)
  }
}

impl From<&str> for BumpError {
  fn from(msg: &str) -> Self {
    BumpError::message(msg)
  }
}

impl From<toml_edit::de::Error> for BumpError {
  fn from(err: toml_edit::de::Error) -> Self {
    BumpError::Config(ConfigError::Invalid {
      reason: err.to_string(),
    })
  }
}

impl From<regex::Error> for BumpError {
  fn from(err: regex::Error) -> Self {
    BumpError::message(format!("Pattern error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// bump.toml could not be parsed or failed validation
  Invalid { reason: String },

  /// No product name in config or metadata
  MissingProductName { metadata: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => Some("See `[project]` and `[changelog]` keys accepted in bump.toml.".to_string()),
      ConfigError::MissingProductName { .. } => Some(
        "Set `product_name` under `[project]` in bump.toml, or add CFBundleName to the plist.".to_string(),
      ),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { reason } => write!(f, "Invalid bump configuration: {}", reason),
      ConfigError::MissingProductName { metadata } => {
        write!(f, "No product name configured and no CFBundleName in {}", metadata.display())
      }
    }
  }
}

/// Property list errors
#[derive(Debug)]
pub enum MetadataError {
  /// File could not be decoded or encoded as a plist
  Malformed { path: PathBuf, reason: String },

  /// Root object is not a dictionary
  NotADictionary { path: PathBuf },

  /// Required key missing or of the wrong type
  MissingKey { path: PathBuf, key: String },
}

impl MetadataError {
  fn help_message(&self) -> Option<String> {
    match self {
      MetadataError::MissingKey { key, .. } => Some(format!("Add a string value for {} to the plist.", key)),
      MetadataError::Malformed { .. } | MetadataError::NotADictionary { .. } => {
        Some("Set `metadata` under `[project]` in bump.toml if the plist lives elsewhere.".to_string())
      }
    }
  }
}

impl fmt::Display for MetadataError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MetadataError::Malformed { path, reason } => {
        write!(f, "Failed to process property list {}: {}", path.display(), reason)
      }
      MetadataError::NotADictionary { path } => {
        write!(f, "Property list {} does not have a dictionary at its root", path.display())
      }
      MetadataError::MissingKey { path, key } => {
        write!(f, "Property list {} has no usable {} entry", path.display(), key)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command ran and exited unsuccessfully
  CommandFailed {
    command: String,
    status: Option<i32>,
    stderr: String,
  },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::CommandFailed { stderr, .. } => {
        if stderr.contains("already exists") {
          Some("A tag for this version already exists. Delete it or bump again.".to_string())
        } else if stderr.contains("Please tell me who you are") {
          Some("Configure git with `git config user.name` and `git config user.email`.".to_string())
        } else {
          Some("Changelog and metadata edits were left on disk; inspect `git status` before retrying.".to_string())
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run bundle-bump from inside the library's git repository (looked in {}).",
        path.display()
      )),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, status, stderr } => {
        match status {
          Some(code) => write!(f, "Git command failed ({}): {}", code, command)?,
          None => write!(f, "Git command terminated by signal: {}", command)?,
        }
        let stderr = stderr.trim();
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Result type alias for bundle-bump
pub type BumpResult<T> = Result<T, BumpError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> BumpResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> BumpResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<BumpError>,
{
  fn context(self, ctx: impl Into<String>) -> BumpResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> BumpResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &BumpError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
