//! CLI entry point for spdx-verify.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use spdx_verify::config::{self, ConfigSource, ValidatorConfig};
use spdx_verify::logging;
use spdx_verify::render::{OutputFormat, Renderer};
use spdx_verify::report::RunEvent;
use spdx_verify::runner::{validate_files, RunOptions};
use spdx_verify::tool::{ProcessRunner, ToolDescriptor};
use spdx_verify::ui::{self, colors};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_SHA"),
    "\nbuilt: ",
    env!("BUILD_DATE")
);

#[derive(Parser, Debug)]
#[command(name = "spdx-verify")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Run SPDX validators over documents and print what they report", long_about = None)]
#[command(
    after_help = "VALIDATORS:\n    By default the current and legacy SPDX Java tools are run from wrapper\n    scripts (spdx-tools-java.sh, spdx-tools.sh) next to this executable.\n    Put a validators.yaml in the tools directory, or pass --config, to change the set."
)]
struct Cli {
    /// SPDX documents to validate
    #[arg(
        value_name = "FILE",
        required_unless_present_any = ["list_tools", "completions"]
    )]
    files: Vec<String>,
    /// Validator configuration file (YAML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding the validator executables
    #[arg(long, value_name = "DIR")]
    tools_dir: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Number of files validated concurrently
    #[arg(short, long, value_name = "N", default_value = "1")]
    jobs: NonZeroUsize,
    /// Log spawned commands and exit codes to stderr
    #[arg(short, long)]
    verbose: bool,
    /// Print the resolved validators and exit
    #[arg(long)]
    list_tools: bool,
    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        return cmd_completions(shell);
    }

    let tools_dir = config::resolve_tools_dir(cli.tools_dir.as_deref())?;
    let (config, source) = ValidatorConfig::discover(cli.config.as_deref(), &tools_dir)?;
    tracing::debug!(%source, tools_dir = %tools_dir.display(), "validator config loaded");
    let tools = config.resolve(&tools_dir);

    if cli.list_tools {
        return cmd_list_tools(&tools, &source, &tools_dir);
    }

    cmd_validate(&cli.files, &tools, cli.format, cli.jobs.get())
}

fn cmd_validate(
    files: &[String],
    tools: &[ToolDescriptor],
    format: OutputFormat,
    jobs: usize,
) -> Result<()> {
    let mut renderer = Renderer::stdout(format);
    let progress = (jobs > 1).then(|| ui::file_progress(files.len()));

    let outcome = validate_files(
        files,
        tools,
        Arc::new(ProcessRunner),
        RunOptions { jobs },
        |event| {
            if let RunEvent::FileFinished(report) = &event {
                let failed = report.failed_tools();
                if failed > 0 {
                    tracing::debug!(file = %report.file, failed, "validators exited non-zero");
                }
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
            }
            match &progress {
                Some(pb) => pb.suspend(|| renderer.handle(event)),
                None => renderer.handle(event),
            }
        },
    );

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    // Sections written before a failure stay on stdout ahead of the error
    renderer.finish()?;
    outcome
}

fn cmd_list_tools(tools: &[ToolDescriptor], source: &ConfigSource, tools_dir: &Path) -> Result<()> {
    println!("{} {}", colors::heading("Config:"), source);
    println!("{} {}", colors::heading("Tools dir:"), tools_dir.display());
    println!("{}", colors::heading(&ui::format::plural(tools.len(), "validator")));

    for tool in tools {
        let command = tool.template.join(" ");
        let program = tool.template.first().map(String::as_str).unwrap_or_default();
        let missing = program.contains(std::path::MAIN_SEPARATOR) && !Path::new(program).exists();
        if missing {
            println!(
                "  {}  {} {}",
                colors::tool(&tool.name),
                command,
                colors::warning("(not found)")
            );
        } else {
            println!("  {}  {}", colors::tool(&tool.name), colors::secondary(&command));
        }
    }
    Ok(())
}

fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "spdx-verify", &mut io::stdout());
    Ok(())
}
