//! Shell execution helpers
//!
//! Commands run through `sh -c` with inherited stdio so output from
//! external tools (conda, git, bioconda-utils) streams to the terminal.
//! A `CondaContext` built with `use_planemo_shell_exec` carries [`shell`]
//! as its execution hook.

use anyhow::{Result, bail};
use std::process::{Command, Stdio};

/// Shell-execution hook type carried by a conda context.
///
/// When unset, the conda machinery falls back to its own default runner.
pub type ShellExec = fn(&str) -> Result<()>;

/// Run a shell command in the current directory.
///
/// Errors if the command fails, including the exit code and the command
/// text in the message. Child stdout and stderr are inherited so command
/// output streams to the terminal.
pub fn shell(cmd: &str) -> Result<()> {
    let status = Command::new("sh")
        .args(["-c", cmd])
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .stdin(Stdio::null())
        .status()
        .map_err(|e| anyhow::anyhow!("command failed to start: {}", e))?;

    if !status.success() {
        bail!(
            "command failed with exit code: {:?}\n  command: {}",
            status.code(),
            cmd
        );
    }

    Ok(())
}

/// Run a shell command and return its stdout output.
///
/// Errors if the command fails. Captures stdout for the caller.
pub fn shell_output(cmd: &str) -> Result<String> {
    let output = Command::new("sh")
        .args(["-c", cmd])
        .output()
        .map_err(|e| anyhow::anyhow!("command failed to start: {}", e))?;

    if !output.status.success() {
        bail!(
            "command failed with exit code: {:?}\n  command: {}",
            output.status.code(),
            cmd
        );
    }

    String::from_utf8(output.stdout).map_err(|e| anyhow::anyhow!("invalid utf8 output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_success() {
        assert!(shell("true").is_ok());
    }

    #[test]
    fn test_shell_failure_includes_command() {
        let err = shell("false").unwrap_err();
        assert!(err.to_string().contains("command: false"));
    }

    #[test]
    fn test_shell_output_captures_stdout() {
        let out = shell_output("echo hello").unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn test_shell_output_failure() {
        assert!(shell_output("exit 3").is_err());
    }
}
