//! Validator descriptors and the subprocess seam used to invoke them.
//!
//! A [`ToolDescriptor`] is the resolved form of a configured validator: a
//! display name plus the argument vector the file under test is appended to.
//! Invocation goes through the [`ToolRunner`] trait so that the runner can be
//! driven by scripted output in tests.

use anyhow::{Context, Result};
use serde::Serialize;
use std::process::{Command, Stdio};

/// A validator ready to be invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    /// Label printed above the validator's output
    pub name: String,
    /// Program followed by its fixed arguments
    pub template: Vec<String>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, template: Vec<String>) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }

    /// Full argument vector for validating `file`: the template with the path appended.
    pub fn command_for(&self, file: &str) -> Vec<String> {
        let mut argv = self.template.clone();
        argv.push(file.to_string());
        argv
    }
}

/// Bytes captured from one finished validator process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl RawOutput {
    /// Output with only stdout populated and a zero exit code
    pub fn from_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
            exit_code: Some(0),
        }
    }
}

/// Runs one validator command to completion.
///
/// Implementations must not return before the child process has exited.
pub trait ToolRunner: Send + Sync {
    fn run(&self, argv: &[String]) -> Result<RawOutput>;
}

/// Spawns real subprocesses with piped stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, argv: &[String]) -> Result<RawOutput> {
        let (program, args) = argv
            .split_first()
            .context("Validator command is empty")?;

        tracing::debug!(program = %program, ?args, "spawning validator");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run validator '{}'. Is it installed?", program))?;

        Ok(RawOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}
