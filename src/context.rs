//! Conda execution context
//!
//! [`build_conda_context`] assembles a [`CondaContext`] from a workspace
//! directory and optional overrides, mirroring the common command-line
//! and global config options of the surrounding tooling. Construction is
//! pure: no filesystem or process I/O happens until a context method that
//! needs it is called.

use crate::condarc::Condarc;
use crate::output;
use crate::shell::{self, ShellExec};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Optional overrides for [`build_conda_context`].
///
/// Every field has a sensible default, so callers fill in only what their
/// command line supplied.
#[derive(Debug, Clone)]
pub struct CondaContextOptions {
    /// Explicit conda installation prefix. None means the external conda
    /// machinery locates (or installs) conda itself.
    pub conda_prefix: Option<PathBuf>,
    /// Bind command execution to this crate's own shell runner. When
    /// false, no hook is set and the conda machinery uses its default.
    pub use_planemo_shell_exec: bool,
    /// Channels that must be configured before resolution.
    pub conda_ensure_channels: Vec<String>,
    /// Override path for the condarc file. Defaults to
    /// `<workspace>/condarc`.
    pub condarc: Option<PathBuf>,
}

impl Default for CondaContextOptions {
    fn default() -> Self {
        CondaContextOptions {
            conda_prefix: None,
            use_planemo_shell_exec: true,
            conda_ensure_channels: Vec::new(),
            condarc: None,
        }
    }
}

/// Configured conda execution environment. Immutable once built; created
/// fresh per invocation of whatever command needs one.
pub struct CondaContext {
    conda_prefix: Option<PathBuf>,
    ensure_channels: Vec<String>,
    condarc_override: PathBuf,
    shell_exec: Option<ShellExec>,
}

/// Build a conda context for the given workspace.
pub fn build_conda_context(workspace: &Path, options: CondaContextOptions) -> CondaContext {
    let condarc_override = options
        .condarc
        .unwrap_or_else(|| workspace.join("condarc"));
    let shell_exec: Option<ShellExec> = if options.use_planemo_shell_exec {
        Some(shell::shell)
    } else {
        None
    };
    CondaContext {
        conda_prefix: options.conda_prefix,
        ensure_channels: options.conda_ensure_channels,
        condarc_override,
        shell_exec,
    }
}

impl CondaContext {
    pub fn conda_prefix(&self) -> Option<&Path> {
        self.conda_prefix.as_deref()
    }

    pub fn ensure_channels(&self) -> &[String] {
        &self.ensure_channels
    }

    pub fn condarc_override(&self) -> &Path {
        &self.condarc_override
    }

    pub fn shell_exec(&self) -> Option<ShellExec> {
        self.shell_exec
    }

    /// Path to the conda executable under the configured prefix, if an
    /// explicit prefix was given.
    pub fn conda_exe(&self) -> Option<PathBuf> {
        self.conda_prefix
            .as_ref()
            .map(|prefix| prefix.join("bin").join("conda"))
    }

    /// Whether a conda executable exists under the configured prefix.
    pub fn is_conda_installed(&self) -> bool {
        self.conda_exe().map(|exe| exe.exists()).unwrap_or(false)
    }

    /// Run a command through the configured shell hook, or the default
    /// runner when no hook is set.
    pub fn exec(&self, cmd: &str) -> Result<()> {
        match self.shell_exec {
            Some(hook) => hook(cmd),
            None => shell::shell(cmd),
        }
    }

    /// Merge the context's ensure-channels into the condarc override file.
    ///
    /// Channels already configured keep their position; missing ones are
    /// appended. Returns whether the file was rewritten.
    pub fn ensure_channels_configured(&self) -> Result<bool> {
        if self.ensure_channels.is_empty() {
            return Ok(false);
        }
        let mut condarc = Condarc::load(&self.condarc_override)?;
        if condarc.ensure_channels(&self.ensure_channels) {
            condarc.save(&self.condarc_override)?;
            output::info(&format!(
                "configured channels [{}] in {}",
                self.ensure_channels.join(", "),
                self.condarc_override.display()
            ));
            return Ok(true);
        }
        Ok(false)
    }
}
