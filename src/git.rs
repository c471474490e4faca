//! Git client helpers
//!
//! Blocking `git clone` into an explicit destination path. Cloning is
//! synchronous; a failure surfaces to the caller with git's stderr
//! attached, and no partial-clone cleanup is attempted.

use crate::output;
use anyhow::{Result, bail};
use indicatif::ProgressBar;
use std::path::Path;
use std::process::Command;

/// RAII guard for progress bars, ensures cleanup on any exit path
struct ProgressGuard(ProgressBar);

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}

/// Validate that a URL uses an allowed scheme for git operations.
/// Only https://, http://, ssh://, and git@ (SSH) URLs are supported.
fn validate_git_url(url: &str) -> Result<()> {
    if url.starts_with("https://")
        || url.starts_with("http://")
        || url.starts_with("git@")
        || url.starts_with("ssh://")
    {
        Ok(())
    } else {
        bail!(
            "Unsupported git URL scheme: {}\n\
             Only https://, http://, ssh://, and git@ URLs are supported",
            url
        )
    }
}

/// Clone a git repository to the given destination path.
///
/// If `dest` already holds a valid clone the call is a no-op. A directory
/// that exists but is not a working repository is removed and re-cloned.
pub fn clone(url: &str, dest: &Path) -> Result<()> {
    validate_git_url(url)?;

    // Skip if already cloned AND valid
    if dest.join(".git").exists() {
        let verify = Command::new("git")
            .args(["-C", &dest.to_string_lossy(), "rev-parse", "HEAD"])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
        if verify.map(|s| s.success()).unwrap_or(false) {
            output::detail(&format!("git: {} already cloned", dest.display()));
            return Ok(());
        }
        output::warning(&format!(
            "git: {} exists but is invalid, re-cloning",
            dest.display()
        ));
        let _ = std::fs::remove_dir_all(dest);
    }

    output::detail(&format!("git clone {}", url));

    let pb = output::spinner(&format!("cloning {}", url));
    let _guard = ProgressGuard(pb);

    let dest_str = dest
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("destination path contains invalid UTF-8"))?;

    // Capture stderr for better error messages
    let cmd_output = Command::new("git")
        .args(["clone", "--progress", url, dest_str])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .output()
        .map_err(|e| anyhow::anyhow!("failed to run git: {}", e))?;

    if !cmd_output.status.success() {
        let stderr = String::from_utf8_lossy(&cmd_output.stderr);
        bail!("git clone failed for {}\nDetails: {}", url, stderr.trim());
    }

    output::detail(&format!("cloned {} to {}", url, dest.display()));
    Ok(())
}
