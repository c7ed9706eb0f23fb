//! Validator configuration for spdx-verify.
//!
//! The validator set is either the built-in pair of SPDX Java tools or a YAML
//! file of the form:
//!
//! ```yaml
//! tools:
//!   - name: new java-tools
//!     program: spdx-tools-java.sh
//!     args: [Verify]
//!   - name: pyspdxtools
//!     program: pyspdxtools
//!     args: [-i]
//!     in_tools_dir: false
//! ```
//!
//! Relative programs are looked up in the tools directory unless
//! `in_tools_dir` is false, in which case the program is resolved via `PATH`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::tool::ToolDescriptor;

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    pub tools: Vec<ToolConfig>,
}

/// One configured validator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Label printed above the validator's output
    pub name: String,
    /// Executable to run
    pub program: String,
    /// Fixed arguments placed between the program and the file path
    #[serde(default)]
    pub args: Vec<String>,
    /// Resolve a relative `program` against the tools directory (default: true)
    #[serde(default = "default_true")]
    pub in_tools_dir: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            tools: BUILTIN_TOOLS
                .iter()
                .map(|(name, program, args)| ToolConfig {
                    name: name.to_string(),
                    program: program.to_string(),
                    args: args.iter().map(|a| a.to_string()).collect(),
                    in_tools_dir: true,
                })
                .collect(),
        }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line
    Flag(PathBuf),
    /// `SPDX_VERIFY_CONFIG`
    Environment(PathBuf),
    /// `validators.yaml` in the tools directory
    ToolsDir(PathBuf),
    Builtin,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Flag(path) => write!(f, "{} (--config)", path.display()),
            ConfigSource::Environment(path) => {
                write!(f, "{} (${})", path.display(), crate::env::CONFIG)
            }
            ConfigSource::ToolsDir(path) => write!(f, "{}", path.display()),
            ConfigSource::Builtin => write!(f, "built-in defaults"),
        }
    }
}

impl ValidatorConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let config: ValidatorConfig =
            serde_yaml::from_str(content).context("Failed to parse validator config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Find and load the active configuration.
    ///
    /// Lookup order (first match wins):
    /// 1. `explicit` (from `--config`)
    /// 2. `$SPDX_VERIFY_CONFIG`
    /// 3. `validators.yaml` in `tools_dir`
    /// 4. Built-in defaults
    pub fn discover(explicit: Option<&Path>, tools_dir: &Path) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            return Ok((Self::load_from(path)?, ConfigSource::Flag(path.to_path_buf())));
        }

        if let Some(path) = env_path(crate::env::CONFIG) {
            return Ok((Self::load_from(&path)?, ConfigSource::Environment(path)));
        }

        let candidate = tools_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok((Self::load_from(&candidate)?, ConfigSource::ToolsDir(candidate)));
        }

        Ok((Self::default(), ConfigSource::Builtin))
    }

    /// Turn the configuration into invocation templates, preserving tool order
    pub fn resolve(&self, tools_dir: &Path) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| {
                let mut template = Vec::with_capacity(tool.args.len() + 1);
                template.push(tool.program_path(tools_dir));
                template.extend(tool.args.iter().cloned());
                ToolDescriptor::new(tool.name.clone(), template)
            })
            .collect()
    }
}

impl ToolConfig {
    /// Program as it will be passed to the OS
    pub fn program_path(&self, tools_dir: &Path) -> String {
        let program = Path::new(&self.program);
        if self.in_tools_dir && program.is_relative() {
            tools_dir.join(program).to_string_lossy().into_owned()
        } else {
            self.program.clone()
        }
    }
}

/// Resolve the directory validator executables live in.
///
/// Lookup order: `explicit` (from `--tools-dir`), `$SPDX_VERIFY_TOOLS_DIR`,
/// then the directory containing the running executable.
pub fn resolve_tools_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = env_path(crate::env::TOOLS_DIR) {
        return Ok(dir);
    }

    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable {} has no parent directory", exe.display()))
}

/// Non-empty path from an environment variable
fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
