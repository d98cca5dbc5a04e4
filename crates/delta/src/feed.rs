//! Subprocess capture for the scheduling loop
//!
//! Runs the target command once per tick and hands its standard output to
//! the differ as a raw text blob.

use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Output of one run of the target command
pub struct Capture {
    /// Decoded standard output
    pub stdout: String,

    /// Exit status of the run
    pub status: ExitStatus,
}

/// Runs the target command, one capture per scheduling tick
pub struct CommandRunner {
    argv: Vec<String>,
}

impl CommandRunner {
    /// Build a runner from the trailing CLI arguments. A single argument is
    /// run through `$SHELL -c` so pipelines work without quoting each word.
    pub fn new(command: &[String]) -> Self {
        let argv = if command.len() == 1 {
            let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
            vec![shell, "-c".to_string(), command[0].clone()]
        } else {
            command.to_vec()
        };
        Self { argv }
    }

    /// Run the command once and capture its standard output. The child's
    /// standard error stays attached to ours.
    pub fn capture(&self) -> Result<Capture> {
        let output = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("failed to run {}", self.argv[0]))?;

        Ok(Capture {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            status: output.status,
        })
    }
}
