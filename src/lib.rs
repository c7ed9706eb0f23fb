//! # spdx-verify
//!
//! Runs a set of external SPDX validators over SPDX documents and reports
//! what each validator printed, one section per validator.
//!
//! ## Overview
//!
//! Each validator is an external command-line tool. The file under test is
//! appended to the validator's invocation template and the tool's combined
//! stdout/stderr is captured. A known JVM warning that the Java-based tools
//! print on every run is filtered out before the output is reported.
//!
//! ## Modules
//!
//! - [`config`] - Validator configuration, defaults and tools directory lookup
//! - [`tool`] - Tool descriptors and the subprocess seam ([`tool::ToolRunner`])
//! - [`output`] - Splitting, decoding and noise filtering of captured output
//! - [`runner`] - Sequential and parallel validation of input files
//! - [`report`] - Per-file and per-tool report types
//! - [`render`] - Text and JSON rendering of reports
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use spdx_verify::config::ValidatorConfig;
//! use spdx_verify::runner::validate_file;
//! use spdx_verify::tool::ProcessRunner;
//!
//! let tools = ValidatorConfig::default().resolve(Path::new("./tools"));
//! let report = validate_file("doc.spdx", &tools, &ProcessRunner).expect("validation failed");
//! for section in &report.sections {
//!     println!("{}: {} lines", section.tool, section.lines.len());
//! }
//! ```

pub mod config;
pub mod logging;
pub mod output;
pub mod render;
pub mod report;
pub mod runner;
pub mod tool;
pub mod ui;

/// Environment variables read by spdx-verify.
pub mod env {
    /// Overrides the directory validator executables are looked up in
    pub const TOOLS_DIR: &str = "SPDX_VERIFY_TOOLS_DIR";
    /// Points at a validator configuration file
    pub const CONFIG: &str = "SPDX_VERIFY_CONFIG";
}

/// Generate a UTC timestamp in ISO 8601 format: `YYYY-MM-DDTHH:MM:SSZ`
pub fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
