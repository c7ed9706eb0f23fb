//! Report types produced by the runner.

use serde::Serialize;

/// Filtered output of one validator for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSection {
    pub tool: String,
    pub lines: Vec<String>,
    /// Informational only; a failing exit code does not fail the run
    pub exit_code: Option<i32>,
    /// Whether the JVM warning was present and removed
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub noise_removed: bool,
}

/// Everything the configured validators said about one file, in tool order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub sections: Vec<ToolSection>,
}

impl FileReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            sections: Vec::new(),
        }
    }

    /// Number of sections whose validator exited non-zero or by signal
    pub fn failed_tools(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.exit_code != Some(0))
            .count()
    }
}

/// Progress of a run, delivered in output order.
///
/// A file produces `FileStarted`, one `Section` per validator as each one
/// finishes, then `FileFinished`. A file whose validators could not all be
/// run stops after the sections that did complete.
#[derive(Debug)]
pub enum RunEvent<'a> {
    FileStarted(&'a str),
    Section(&'a ToolSection),
    FileFinished(FileReport),
}

/// Top-level document for `--format json`
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: String,
    pub files: &'a [FileReport],
}
