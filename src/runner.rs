//! Running every configured validator against every input file.
//!
//! Files are independent of each other. Within a file the validators run one
//! after another in configuration order, and each child process is waited on
//! before the next one starts. [`validate_files`] reports each section as soon
//! as its validator finishes; in parallel mode events are replayed in input
//! order once earlier files are done.

use anyhow::{Context, Result};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::output::{filter_noise, split_output};
use crate::report::{FileReport, RunEvent, ToolSection};
use crate::tool::{ToolDescriptor, ToolRunner};

/// Run one validator against `file` and produce its filtered section.
pub fn run_tool(file: &str, tool: &ToolDescriptor, runner: &dyn ToolRunner) -> Result<ToolSection> {
    let argv = tool.command_for(file);
    let raw = runner
        .run(&argv)
        .with_context(|| format!("Validator '{}' failed on {}", tool.name, file))?;

    let mut lines = split_output(&raw)
        .with_context(|| format!("Could not decode output of '{}' for {}", tool.name, file))?;
    let noise_removed = filter_noise(&mut lines);

    match raw.exit_code {
        Some(0) => {}
        Some(code) => tracing::info!(tool = %tool.name, file, code, "validator exited non-zero"),
        None => tracing::info!(tool = %tool.name, file, "validator terminated by signal"),
    }
    tracing::debug!(
        tool = %tool.name,
        file,
        lines = lines.len(),
        noise_removed,
        "validator finished"
    );

    Ok(ToolSection {
        tool: tool.name.clone(),
        lines,
        exit_code: raw.exit_code,
        noise_removed,
    })
}

/// Run every validator in `tools`, in order, against `file`.
pub fn validate_file(
    file: &str,
    tools: &[ToolDescriptor],
    runner: &dyn ToolRunner,
) -> Result<FileReport> {
    let mut report = FileReport::new(file);
    run_tools(tools, runner, &mut report, &mut |_: &ToolSection| Ok(()))?;
    Ok(report)
}

/// Append one section per tool to `report`, calling `on_section` after each.
///
/// On error `report` keeps the sections that completed before the failure.
fn run_tools(
    tools: &[ToolDescriptor],
    runner: &dyn ToolRunner,
    report: &mut FileReport,
    on_section: &mut dyn FnMut(&ToolSection) -> Result<()>,
) -> Result<()> {
    for tool in tools {
        let section = run_tool(&report.file, tool, runner)?;
        on_section(&section)?;
        report.sections.push(section);
    }
    Ok(())
}

/// Options controlling [`validate_files`]
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Maximum number of files validated at the same time
    pub jobs: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

/// A file's sections as run by a worker, plus the error that cut it short
type WorkerResult = (FileReport, Option<anyhow::Error>);

/// Validate all `files`, delivering [`RunEvent`]s to `on_event` in input order.
///
/// The first error stops the run. The sections of the failing file that
/// completed before the error are still delivered; later files are not.
pub fn validate_files<R, F>(
    files: &[String],
    tools: &[ToolDescriptor],
    runner: Arc<R>,
    options: RunOptions,
    mut on_event: F,
) -> Result<()>
where
    R: ToolRunner + 'static,
    F: FnMut(RunEvent<'_>) -> Result<()>,
{
    if options.jobs <= 1 || files.len() <= 1 {
        for file in files {
            on_event(RunEvent::FileStarted(file))?;
            let mut report = FileReport::new(file.as_str());
            run_tools(tools, runner.as_ref(), &mut report, &mut |section: &ToolSection| {
                on_event(RunEvent::Section(section))
            })?;
            on_event(RunEvent::FileFinished(report))?;
        }
        return Ok(());
    }

    let workers = options.jobs.min(files.len());
    tracing::debug!(workers, files = files.len(), "validating in parallel");

    let queue: Arc<Mutex<std::vec::IntoIter<(usize, String)>>> = Arc::new(Mutex::new(
        files
            .iter()
            .cloned()
            .enumerate()
            .collect::<Vec<_>>()
            .into_iter(),
    ));
    let tools: Arc<Vec<ToolDescriptor>> = Arc::new(tools.to_vec());
    let (tx, rx) = mpsc::channel::<(usize, WorkerResult)>();

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let handle = thread::spawn({
            let queue = Arc::clone(&queue);
            let tools = Arc::clone(&tools);
            let runner = Arc::clone(&runner);
            let tx = tx.clone();

            move || loop {
                let next = match queue.lock() {
                    Ok(mut queue) => queue.next(),
                    Err(_) => None,
                };
                let Some((index, file)) = next else {
                    break;
                };
                let mut report = FileReport::new(file);
                let error = run_tools(&tools, runner.as_ref(), &mut report, &mut |_: &ToolSection| {
                    Ok(())
                })
                .err();
                let failed = error.is_some();
                if tx.send((index, (report, error))).is_err() || failed {
                    break;
                }
            }
        });
        handles.push(handle);
    }
    drop(tx);

    let outcome = emit_in_order(files.len(), &rx, &mut on_event);

    // Stop handing out work once the outcome is decided
    if let Ok(mut queue) = queue.lock() {
        *queue = Vec::new().into_iter();
    }
    drop(rx);
    for handle in handles {
        if handle.join().is_err() {
            anyhow::bail!("Validator worker thread panicked");
        }
    }

    outcome
}

/// Buffer out-of-order results and replay them as events in input order.
fn emit_in_order<F>(
    total: usize,
    rx: &mpsc::Receiver<(usize, WorkerResult)>,
    on_event: &mut F,
) -> Result<()>
where
    F: FnMut(RunEvent<'_>) -> Result<()>,
{
    let mut pending: Vec<Option<WorkerResult>> = (0..total).map(|_| None).collect();
    let mut next = 0;

    for (index, result) in rx.iter() {
        pending[index] = Some(result);
        while next < total {
            let Some((report, error)) = pending[next].take() else {
                break;
            };
            replay(report, error, on_event)?;
            next += 1;
        }
        if next == total {
            break;
        }
    }

    if next < total {
        anyhow::bail!("Validation stopped after {} of {} files", next, total);
    }
    Ok(())
}

fn replay<F>(report: FileReport, error: Option<anyhow::Error>, on_event: &mut F) -> Result<()>
where
    F: FnMut(RunEvent<'_>) -> Result<()>,
{
    on_event(RunEvent::FileStarted(&report.file))?;
    for section in &report.sections {
        on_event(RunEvent::Section(section))?;
    }
    if let Some(error) = error {
        return Err(error);
    }
    on_event(RunEvent::FileFinished(report))
}
