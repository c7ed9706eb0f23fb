//! Rendering validation reports
//!
//! Text output mirrors the layout validator users are used to: a heading per
//! file followed by one `### <tool>:` block per validator, each written as soon
//! as it is known. JSON output collects every finished file and writes a
//! single document when the run finishes.

use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::report::{FileReport, RunEvent, RunReport, ToolSection};
use crate::ui;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections per file and validator
    #[default]
    Text,
    /// One JSON document for the whole run
    Json,
}

/// Writes run events in the selected format.
///
/// Text is written and flushed as each event arrives, so a validator's
/// section is visible before the next validator starts. JSON reports are
/// buffered until [`Renderer::finish`].
pub struct Renderer<W: Write> {
    format: OutputFormat,
    writer: W,
    color: bool,
    collected: Vec<FileReport>,
}

impl Renderer<io::Stdout> {
    /// Renderer writing to stdout, colored when stdout is a terminal
    pub fn stdout(format: OutputFormat) -> Self {
        Self {
            format,
            writer: io::stdout(),
            color: ui::stdout_is_tty(),
            collected: Vec::new(),
        }
    }
}

impl<W: Write> Renderer<W> {
    /// Renderer with a custom writer and no color (for testing)
    pub fn with_writer(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            writer,
            color: false,
            collected: Vec::new(),
        }
    }

    pub fn handle(&mut self, event: RunEvent<'_>) -> Result<()> {
        match (self.format, event) {
            (OutputFormat::Text, RunEvent::FileStarted(file)) => {
                write_file_header(&mut self.writer, file, self.color)
                    .context("Failed to write report")?;
            }
            (OutputFormat::Text, RunEvent::Section(section)) => {
                write_section(&mut self.writer, section, self.color)
                    .context("Failed to write report")?;
            }
            (OutputFormat::Text, RunEvent::FileFinished(_)) => {}
            (OutputFormat::Json, RunEvent::FileFinished(report)) => self.collected.push(report),
            (OutputFormat::Json, _) => return Ok(()),
        }
        self.writer.flush().context("Failed to flush report")
    }

    /// Write anything still buffered and hand back the writer
    pub fn finish(mut self) -> Result<W> {
        if self.format == OutputFormat::Json {
            let document = RunReport {
                generated_at: crate::utc_now_iso(),
                files: &self.collected,
            };
            serde_json::to_writer_pretty(&mut self.writer, &document)
                .context("Failed to serialize report")?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Blank line, then the per-file heading
pub fn write_file_header(writer: &mut impl Write, file: &str, color: bool) -> io::Result<()> {
    let heading = format!("Starting validation for file {}", file);
    writeln!(writer)?;
    if color {
        writeln!(writer, "{}", ui::colors::heading(&heading))?;
    } else {
        writeln!(writer, "{}", heading)?;
    }
    Ok(())
}

/// `### <tool>:` between blank lines, then the validator's lines
pub fn write_section(writer: &mut impl Write, section: &ToolSection, color: bool) -> io::Result<()> {
    let header = format!("### {}:", section.tool);
    writeln!(writer)?;
    if color {
        writeln!(writer, "{}", ui::colors::tool(&header))?;
    } else {
        writeln!(writer, "{}", header)?;
    }
    writeln!(writer)?;

    for line in &section.lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
