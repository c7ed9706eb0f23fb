//! Centralized terminal formatting for spdx-verify
//!
//! Colors, TTY detection and the progress bar shown while files are
//! validated in parallel.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Whether stdout is attached to a terminal
pub fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Whether stderr is attached to a terminal
pub fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

/// Color scheme for report and diagnostic text
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Bold for the per-file heading
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }

    /// Cyan for validator names
    pub fn tool(text: &str) -> ColoredString {
        text.bold().cyan()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }
}

/// Progress bar counting validated files, drawn on stderr.
///
/// Hidden when stderr is not a terminal so piped output stays clean.
pub fn file_progress(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if !stderr_is_tty() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
        return pb;
    }
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files validated")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Common text formatting patterns
pub mod format {
    /// "1 file" / "3 files"
    pub fn plural(count: usize, noun: &str) -> String {
        if count == 1 {
            format!("{} {}", count, noun)
        } else {
            format!("{} {}s", count, noun)
        }
    }
}
