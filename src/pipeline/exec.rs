//! Checked execution of external collaborator tools.
//!
//! Aligners, assemblers, and classifiers are driven as shell command lines
//! (several stages are pipelines). Every invocation goes through
//! [`run_shell`], which blocks until completion, captures diagnostics, and
//! turns a non-zero exit status into a typed [`CommandError`]. Proceeding
//! with the missing or partial output of a failed tool is unsafe, so status
//! is never ignored.

use std::process::{Command, Output};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Run a shell command line to completion, discarding stdout.
///
/// # Errors
///
/// Returns `CommandError::Launch` if the shell cannot be spawned, or
/// `CommandError::Failed` with captured stderr on a non-zero exit status.
pub fn run_shell(command: &str) -> Result<(), CommandError> {
    let output = spawn(command)?;
    check(command, &output)?;
    Ok(())
}

/// Run a shell command line to completion and return its captured stdout.
///
/// # Errors
///
/// Same as [`run_shell`].
pub fn run_shell_capture(command: &str) -> Result<String, CommandError> {
    let output = spawn(command)?;
    check(command, &output)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn spawn(command: &str) -> Result<Output, CommandError> {
    info!("Running: {command}");
    Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|source| CommandError::Launch {
            command: command.to_string(),
            source,
        })
}

fn check(command: &str, output: &Output) -> Result<(), CommandError> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        if !stderr.trim().is_empty() {
            debug!("stderr of `{command}`: {}", stderr.trim());
        }
        Ok(())
    } else {
        Err(CommandError::Failed {
            command: command.to_string(),
            status: output.status,
            stderr: stderr.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_shell_success() {
        run_shell("true").unwrap();
    }

    #[test]
    fn test_run_shell_failure_carries_stderr() {
        let err = run_shell("echo boom >&2; exit 3").unwrap_err();
        match err {
            CommandError::Failed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_run_shell_capture() {
        let stdout = run_shell_capture("printf 'num_seqs'").unwrap();
        assert_eq!(stdout, "num_seqs");
    }

    #[test]
    fn test_run_shell_pipeline_status() {
        // The status of the last pipeline element is what counts
        assert!(run_shell("true | false").is_err());
        run_shell("echo x | grep -q x").unwrap();
    }
}
