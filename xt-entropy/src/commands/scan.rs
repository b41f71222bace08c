//! Scan command implementation: drives the engine over a directory.

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use xt_entropy_core::{
    CallerInfo, EngineConfig, FinalizeReport, InitStatus, OperationType, ProcessItemStatus,
    ScanCoordinator, VolumeHandle,
};

use crate::host::{DIRECTORY_HOST_VERSION, DirectoryHost, HostMessage};
use crate::ui::output_format::{MessageLevel, print_message};
use crate::ui::summary::print_summary;

/// Options for the scan runner.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub volume: Option<String>,
    pub config: Option<PathBuf>,
    pub json_file: Option<PathBuf>,
    pub summary: bool,
}

/// One scored file.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredFile {
    pub path: String,
    /// The annotation text exactly as attached by the engine.
    pub entropy: String,
}

/// Statistics section of the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Everything a scan produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub generated_at: String,
    pub root: String,
    pub volume: String,
    pub status: String,
    pub total: usize,
    pub zero_byte: usize,
    pub allocation_failed: usize,
    pub unreadable: usize,
    pub stats: JsonStats,
    pub files: Vec<ScoredFile>,
    pub messages: Vec<String>,
}

impl ScanOutcome {
    fn new(opts: &ScanOptions, report: &FinalizeReport, host: &DirectoryHost) -> Self {
        let files = host
            .annotations()
            .iter()
            .map(|(id, text)| ScoredFile {
                path: host
                    .file(*id)
                    .map(|f| f.relative.display().to_string())
                    .unwrap_or_default(),
                entropy: text.clone(),
            })
            .collect();

        Self {
            generated_at: Utc::now().to_rfc3339(),
            root: opts.root.display().to_string(),
            volume: report.volume.clone(),
            status: format!("{:?}", report.status).to_lowercase(),
            total: report.total,
            zero_byte: report.zero_byte,
            allocation_failed: report.allocation_failed,
            unreadable: report.unreadable,
            stats: JsonStats {
                count: report.stats.count,
                mean: report.stats.mean,
                std_dev: report.stats.std_dev,
                min: report.stats.min,
                max: report.stats.max,
            },
            files,
            messages: host.messages().iter().map(|m| m.text.clone()).collect(),
        }
    }
}

fn load_config(opts: &ScanOptions) -> Result<EngineConfig> {
    match &opts.config {
        Some(path) => EngineConfig::load_from_file(path),
        None => Ok(EngineConfig::default()),
    }
}

fn write_host_messages<W: Write>(
    writer: &mut W,
    messages: &[HostMessage],
    supports_color: bool,
) -> io::Result<()> {
    for message in messages {
        let level = if message.skipping { MessageLevel::Warn } else { MessageLevel::Error };
        print_message(writer, level, &message.text, supports_color)?;
    }
    Ok(())
}

fn print_host_messages(host: &DirectoryHost) -> Result<()> {
    let mut stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    write_host_messages(&mut stderr, host.messages(), supports_color)
        .context("Failed to write engine messages to stderr")
}

/// Runs the full host protocol over `opts.root` and prints the results.
///
/// Scores go to stdout as `path<TAB>entropy`; messages and the summary go to
/// stderr.
pub fn run_scan(opts: &ScanOptions) -> Result<ScanOutcome> {
    info!("Starting scan of {}.", opts.root.display());
    let config = load_config(opts)?;
    let host = DirectoryHost::open(&opts.root, opts.volume.as_deref())?;

    let (mut session, status) =
        ScanCoordinator::init(host, CallerInfo::forensics(DIRECTORY_HOST_VERSION), config);
    if status != InitStatus::Ready {
        print_host_messages(session.host())?;
        return Err(anyhow!("Engine refused to start ({:?})", status));
    }

    let volume = VolumeHandle(0);
    let prepared = session.prepare(volume, OperationType::RefineVolumeSnapshot);
    if prepared.requires_item_callback() {
        let ids: Vec<_> = session.host().files().iter().map(|f| f.id).collect();
        for id in ids {
            if session.process_item(id) == ProcessItemStatus::Abort {
                break;
            }
        }
    }
    let report = session.finalize(volume);
    session.done();
    debug!("Finalize report: {:?}", report);

    let aborted = session.exit_reason().cloned();
    let host = session.into_host();
    print_host_messages(&host)?;
    if let Some(reason) = aborted {
        return Err(anyhow!(reason).context("Engine stopped on a fatal condition"));
    }

    let outcome = ScanOutcome::new(opts, &report, &host);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    for file in &outcome.files {
        writeln!(writer, "{}\t{}", file.path, file.entropy)?;
    }
    drop(writer);

    if opts.summary {
        print_summary(&report, &mut io::stderr())?;
    }

    if let Some(path) = &opts.json_file {
        let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize scan report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
        info!("Wrote JSON report to {}.", path.display());
    }

    info!("Scan completed: {} files annotated.", outcome.files.len());
    Ok(outcome)
}
