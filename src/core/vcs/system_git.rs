//! System git backend
//!
//! Every operation is one `git` subprocess run against the repository work
//! tree. A non-zero exit is surfaced as `GitError::CommandFailed` carrying
//! git's own status so the caller can exit with it.

use crate::core::error::{BumpError, BumpResult, GitError, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables passed through to git besides PATH and HOME
const PASSTHROUGH_ENV: &[&str] = &[
  "GIT_AUTHOR_NAME",
  "GIT_AUTHOR_EMAIL",
  "GIT_AUTHOR_DATE",
  "GIT_COMMITTER_NAME",
  "GIT_COMMITTER_EMAIL",
  "GIT_COMMITTER_DATE",
  "GNUPGHOME",
  "SSH_AUTH_SOCK",
  "XDG_CONFIG_HOME",
];

/// Git backend using system git
pub struct SystemGit {
  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> BumpResult<Self> {
    let output = isolated_git(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(BumpError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(command_failed("git rev-parse --show-toplevel", &output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);

    Ok(Self {
      work_tree: PathBuf::from(stdout.trim()),
    })
  }

  /// Repository root; configured paths are relative to it
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Stage exactly the given paths
  pub fn stage(&self, paths: &[&Path]) -> BumpResult<()> {
    let mut cmd = self.git_cmd();
    cmd.arg("add").arg("--");
    for path in paths {
      cmd.arg(path);
    }

    let display = format!(
      "git add -- {}",
      paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
    );
    self.run(cmd, &display)
  }

  /// Commit whatever is staged
  pub fn commit(&self, message: &str) -> BumpResult<()> {
    let mut cmd = self.git_cmd();
    cmd.args(["commit", "-m", message]);
    self.run(cmd, "git commit")
  }

  /// Create an annotated tag at HEAD
  pub fn create_annotated_tag(&self, name: &str, message: &str) -> BumpResult<()> {
    let mut cmd = self.git_cmd();
    cmd.args(["tag", "-a", name, "-m", message]);
    self.run(cmd, &format!("git tag -a {}", name))
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> BumpResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "HEAD"])
      .output()
      .context("Failed to get HEAD commit")?;

    if !output.status.success() {
      return Err(command_failed("git rev-parse HEAD", &output));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  fn run(&self, mut cmd: Command, display: &str) -> BumpResult<()> {
    let output = cmd.output().with_context(|| format!("Failed to execute {}", display))?;

    if !output.status.success() {
      return Err(command_failed(display, &output));
    }

    Ok(())
  }

  /// Create a git command with an isolated environment
  ///
  /// - Sets working directory to the work tree
  /// - Clears environment variables
  /// - Whitelists PATH, HOME and identity/signing variables
  pub(crate) fn git_cmd(&self) -> Command {
    isolated_git(&self.work_tree)
  }
}

/// `git -C <dir>` with only PATH, HOME and `PASSTHROUGH_ENV` inherited
///
/// `GIT_DIR`, `GIT_WORK_TREE` and friends never reach git, so discovery in
/// `open` and every later call resolve the same repository.
fn isolated_git(dir: &Path) -> Command {
  let mut cmd = Command::new("git");

  cmd.arg("-C").arg(dir);

  cmd.env_clear();
  for key in ["PATH", "HOME"].iter().chain(PASSTHROUGH_ENV) {
    if let Ok(value) = std::env::var(key) {
      cmd.env(key, value);
    }
  }

  cmd.arg("-c").arg("core.quotePath=false");

  cmd
}

fn command_failed(command: &str, output: &Output) -> BumpError {
  BumpError::Git(GitError::CommandFailed {
    command: command.to_string(),
    status: output.status.code(),
    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
  })
}
