use anyhow::{anyhow, Result};
use spdx_verify::tool::{RawOutput, ToolRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// ToolRunner that replies with canned output keyed by program, and records
/// every command it was asked to run.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: HashMap<String, RawOutput>,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `program` with the given stdout lines joined by newlines
    pub fn stdout_lines(mut self, program: &str, lines: &[&str]) -> Self {
        self.replies
            .insert(program.to_string(), RawOutput::from_stdout(lines.join("\n")));
        self
    }

    /// Reply to `program` with raw stdout/stderr bytes and an exit code
    pub fn reply(mut self, program: &str, stdout: &[u8], stderr: &[u8], code: i32) -> Self {
        self.replies.insert(
            program.to_string(),
            RawOutput {
                stdout: stdout.to_vec(),
                stderr: stderr.to_vec(),
                exit_code: Some(code),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, argv: &[String]) -> Result<RawOutput> {
        self.calls.lock().unwrap().push(argv.to_vec());
        let program = argv.first().ok_or_else(|| anyhow!("empty command"))?;
        self.replies
            .get(program)
            .cloned()
            .ok_or_else(|| anyhow!("No such file or directory: {}", program))
    }
}
