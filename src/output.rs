//! Turning captured validator bytes into reportable lines.

use anyhow::{Context, Result};

use crate::tool::RawOutput;

/// Warning printed by the Java validators on newer JVMs. Carries no information
/// about the document being validated.
pub const NOISE_LINE: &str =
    "WARNING: sun.reflect.Reflection.getCallerClass is not supported. This will impact performance.";

/// Split stdout then stderr on `\n`, drop empty fragments and decode each as UTF-8.
pub fn split_output(raw: &RawOutput) -> Result<Vec<String>> {
    raw.stdout
        .split(|b| *b == b'\n')
        .chain(raw.stderr.split(|b| *b == b'\n'))
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            std::str::from_utf8(fragment)
                .map(str::to_string)
                .context("Validator output is not valid UTF-8")
        })
        .collect()
}

/// Remove every occurrence of [`NOISE_LINE`]. Returns whether anything was removed.
///
/// Output without the warning is left untouched.
pub fn filter_noise(lines: &mut Vec<String>) -> bool {
    let before = lines.len();
    lines.retain(|line| line != NOISE_LINE);
    lines.len() != before
}
