// xt-entropy-core/src/coordinator.rs
//! The `ScanCoordinator`: one method per host entry point.
//!
//! The host drives the engine through `init`, then for each volume `prepare`,
//! one `process_item` per enumerated item, and `finalize`; `done` ends the
//! session. The coordinator owns the volume registry for the whole session and
//! remembers the current volume by id.
//!
//! A fatal condition is reported once and latched; every later entry point
//! short-circuits. Per-item problems during Finalize are reported and skipped.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, error, info, warn};
use xt_entropy_calc::{compute_entropy, compute_stats, EntropyScore, EntropyStats};

use crate::annotation::format_entropy;
use crate::collector::collect;
use crate::config::{EngineConfig, XT_NAME};
use crate::errors::XtEntropyError;
use crate::host::{EvidenceHost, ItemHandle, ItemId, NameForm, VolumeHandle};
use crate::registry::{Volume, VolumeId, VolumeRegistry};
use crate::status::{
    CallbackRequest, CallerInfo, FinalizeStatus, InitStatus, OperationType, PrepareStatus,
    ProcessItemStatus,
};
use crate::volume_key::derive_volume_key;

/// One-line banner shown by the host's "about" action.
pub fn about() -> String {
    format!("{} - v{}", XT_NAME, env!("CARGO_PKG_VERSION"))
}

/// What one Finalize call did.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizeReport {
    pub status: FinalizeStatus,
    /// Key of the finalized volume (empty when skipped without one).
    pub volume: String,
    /// Buffered items at the start of the pass.
    pub total: usize,
    pub annotated: usize,
    pub zero_byte: usize,
    pub allocation_failed: usize,
    pub unreadable: usize,
    /// Statistics over the annotated scores.
    pub stats: EntropyStats,
}

impl FinalizeReport {
    fn skipped(volume: &str) -> Self {
        Self::new(volume, 0, FinalizeStatus::Skipped)
    }

    fn new(volume: &str, total: usize, status: FinalizeStatus) -> Self {
        Self {
            status,
            volume: volume.to_string(),
            total,
            annotated: 0,
            zero_byte: 0,
            allocation_failed: 0,
            unreadable: 0,
            stats: EntropyStats::default(),
        }
    }

    /// Items visited before the pass ended.
    pub fn visited(&self) -> usize {
        self.annotated + self.zero_byte + self.allocation_failed + self.unreadable
    }
}

/// How a single item of the entropy pass ended.
#[derive(Debug)]
enum ItemOutcome {
    Annotated(EntropyScore),
    Unreadable,
    Warned(XtEntropyError),
}

/// Progress window that is hidden again on every exit path.
struct ProgressScope<'h, H: EvidenceHost> {
    host: &'h mut H,
}

impl<'h, H: EvidenceHost> ProgressScope<'h, H> {
    fn open(host: &'h mut H, label: &str) -> Self {
        host.show_progress(label);
        host.set_progress_percentage(0);
        Self { host }
    }

    fn host(&mut self) -> &mut H {
        self.host
    }
}

impl<H: EvidenceHost> Drop for ProgressScope<'_, H> {
    fn drop(&mut self) {
        self.host.hide_progress();
    }
}

/// An item opened for reading; the handle is closed when this is dropped.
struct OpenItem<'h, H: EvidenceHost> {
    host: &'h mut H,
    handle: ItemHandle,
}

impl<H: EvidenceHost> OpenItem<'_, H> {
    fn size(&mut self) -> u64 {
        self.host.item_size(self.handle)
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        // Never trust the host to stay within the slice.
        self.host.read_item(self.handle, buf).min(buf.len())
    }
}

impl<H: EvidenceHost> Drop for OpenItem<'_, H> {
    fn drop(&mut self) {
        self.host.close_item(self.handle);
    }
}

/// Zero-filled scratch buffer of `size` bytes, or `None` if it cannot be allocated.
fn scratch_buffer(size: u64) -> Option<Vec<u8>> {
    let len = usize::try_from(size).ok()?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).ok()?;
    buf.resize(len, 0);
    Some(buf)
}

/// Formats and sends a message to the host, mirroring it to the log.
fn report<H: EvidenceHost>(host: &mut H, condition: &XtEntropyError) {
    let tail = match condition {
        XtEntropyError::ScratchAllocation { .. } | XtEntropyError::ZeroByteItem(_) => "Skipping...",
        _ => "Exiting...",
    };
    let message = format!("{}: {}. {}", XT_NAME, condition, tail);
    if condition.is_fatal() {
        error!("{}", message);
    } else {
        warn!("{}", message);
    }
    host.output_message(&message);
}

/// Reads one item and attaches its entropy, or says why it could not.
fn score_item<H: EvidenceHost>(
    host: &mut H,
    config: &EngineConfig,
    volume: VolumeHandle,
    item: ItemId,
) -> ItemOutcome {
    let Some(handle) = host.open_item(volume, item) else {
        return ItemOutcome::Unreadable;
    };
    let name = host.item_name(item);
    host.set_progress_description(&name);

    let mut opened = OpenItem { host: &mut *host, handle };
    let expected = opened.size();
    let Some(mut scratch) = scratch_buffer(expected) else {
        return ItemOutcome::Warned(XtEntropyError::ScratchAllocation { item: name, size: expected });
    };
    let read = opened.read(&mut scratch);
    drop(opened);

    if read == 0 {
        return ItemOutcome::Warned(XtEntropyError::ZeroByteItem(name));
    }

    let entropy = compute_entropy(&scratch[..read]);
    debug!("Item {} ('{}'): {} bytes, entropy {}", item, name, read, entropy);
    host.add_comment(item, &format_entropy(entropy), config.annotation_category);
    ItemOutcome::Annotated(entropy)
}

/// Drives the host protocol for one session.
#[derive(Debug)]
pub struct ScanCoordinator<H: EvidenceHost> {
    host: H,
    config: EngineConfig,
    registry: VolumeRegistry,
    current: Option<VolumeId>,
    exit_reason: Option<XtEntropyError>,
}

impl<H: EvidenceHost> ScanCoordinator<H> {
    /// Starts a session: checks the host product, version, case and evidence.
    ///
    /// The coordinator is returned in every case so the host can still call
    /// `about` and `done`; after a fatal result every other entry point is a
    /// no-op.
    pub fn init(host: H, caller: CallerInfo, config: EngineConfig) -> (Self, InitStatus) {
        let mut coordinator = Self {
            host,
            config,
            registry: VolumeRegistry::new(),
            current: None,
            exit_reason: None,
        };

        if caller.is_unsupported_host() {
            info!("Host flags {:#x} not supported, declining to load.", caller.flags);
            return (coordinator, InitStatus::Unsupported);
        }
        if caller.is_probe_only() {
            return (coordinator, InitStatus::AboutOnly);
        }

        let required = coordinator.config.min_host_version;
        let fatal = if caller.version < required {
            warn!("Host reports v{}, below the required v{}.", caller.version, required);
            Some(XtEntropyError::UnsupportedHostVersion { required, found: caller.version })
        } else if coordinator.host.case_title().is_none() {
            Some(XtEntropyError::NoActiveCase)
        } else if !coordinator.host.has_evidence() {
            Some(XtEntropyError::NoEvidence)
        } else {
            None
        };

        if let Some(condition) = fatal {
            coordinator.fail(condition);
            return (coordinator, InitStatus::Fatal);
        }

        info!("{} initialized (host v{}).", about(), caller.version);
        (coordinator, InitStatus::Ready)
    }

    /// Phase one entry: selects the volume and allocates its item buffer.
    pub fn prepare(&mut self, volume: VolumeHandle, operation: OperationType) -> PrepareStatus {
        if self.is_exiting() {
            return PrepareStatus::Decline;
        }

        let requested = match operation {
            OperationType::Run => {
                report(&mut self.host, &XtEntropyError::LaunchedFromToolsMenu);
                return PrepareStatus::Decline;
            }
            OperationType::LogicalSearch
            | OperationType::PhysicalSearch
            | OperationType::SimultaneousSearch => {
                report(&mut self.host, &XtEntropyError::LaunchedDuringSearch);
                return PrepareStatus::DeclineDuringSearch;
            }
            OperationType::RefineVolumeSnapshot => {
                CallbackRequest { per_item: true, per_item_late: true }
            }
            OperationType::DirectoryBrowserColumn => CallbackRequest::default(),
            OperationType::Other(code) => {
                report(&mut self.host, &XtEntropyError::UnsupportedOperation(code));
                return PrepareStatus::Decline;
            }
        };

        let long_name = self.host.volume_name(volume, NameForm::Long);
        let short_name = self.host.volume_name(volume, NameForm::Short);
        let key = derive_volume_key(&long_name, &short_name);
        let (id, already_existed) = self.registry.resolve(&key);
        self.current = Some(id);

        let count = self.host.item_count(volume);
        let allocated = match (usize::try_from(count), self.registry.get_mut(id)) {
            (Ok(capacity), Some(current)) => current.allocate(capacity).is_ok(),
            _ => false,
        };
        if !allocated {
            report(&mut self.host, &XtEntropyError::ItemBufferAllocation { key, count });
            return PrepareStatus::Decline;
        }

        info!(
            "Prepared volume '{}' for {} ({} items, {}).",
            key,
            operation,
            count,
            if already_existed { "known" } else { "new" }
        );

        if already_existed {
            PrepareStatus::Proceed(requested)
        } else {
            let collect_ids = CallbackRequest { per_item: true, per_item_late: false };
            PrepareStatus::Proceed(requested.union(collect_ids))
        }
    }

    /// Phase one, per item: buffers the id in the current volume.
    pub fn process_item(&mut self, item: ItemId) -> ProcessItemStatus {
        if self.is_exiting() {
            return ProcessItemStatus::Abort;
        }

        let current = match self.current {
            Some(id) => self.registry.get_mut(id),
            None => None,
        };
        match collect(current, item) {
            Ok(()) => ProcessItemStatus::Continue,
            Err(violation) => {
                self.fail(violation);
                ProcessItemStatus::Abort
            }
        }
    }

    /// Phase two: scores every buffered item of the current volume.
    ///
    /// The item buffer is taken out of the volume up front, so it is released
    /// however the pass ends.
    pub fn finalize(&mut self, volume: VolumeHandle) -> FinalizeReport {
        if self.is_exiting() {
            return FinalizeReport::skipped("");
        }
        let Some(id) = self.current else {
            return FinalizeReport::skipped("");
        };
        let Some(current) = self.registry.get_mut(id) else {
            return FinalizeReport::skipped("");
        };
        let key = current.key().to_string();
        let Some(item_ids) = current.begin_finalize() else {
            debug!("Volume '{}' has no buffered items, nothing to finalize.", key);
            return FinalizeReport::skipped(&key);
        };

        let total = item_ids.len();
        let mut report_out = FinalizeReport::new(&key, total, FinalizeStatus::Processed);
        let mut scores = Vec::with_capacity(total);
        info!("Finalizing volume '{}': {} items.", key, total);

        {
            let mut progress = ProgressScope::open(&mut self.host, &self.config.progress_label);
            for (i, &item) in item_ids.iter().enumerate() {
                if progress.host().should_stop() {
                    info!("Stop requested after {} of {} items of '{}'.", i, total, key);
                    report_out.status = FinalizeStatus::Stopped;
                    break;
                }

                match score_item(progress.host(), &self.config, volume, item) {
                    ItemOutcome::Annotated(entropy) => {
                        report_out.annotated += 1;
                        scores.push(entropy);
                    }
                    ItemOutcome::Unreadable => {
                        debug!("Item {} could not be opened, skipped.", item);
                        report_out.unreadable += 1;
                    }
                    ItemOutcome::Warned(condition) => {
                        match condition {
                            XtEntropyError::ScratchAllocation { .. } => report_out.allocation_failed += 1,
                            _ => report_out.zero_byte += 1,
                        }
                        report(progress.host(), &condition);
                    }
                }

                let percent = (i * 100 / total) as u32;
                progress.host().set_progress_percentage(percent);
            }
        }
        drop(item_ids);

        let cancelled = report_out.status == FinalizeStatus::Stopped;
        if let Some(current) = self.registry.get_mut(id) {
            current.finish(cancelled);
        }

        report_out.stats = compute_stats(&scores);
        info!(
            "Volume '{}': {} annotated, {} zero-byte, {} unallocatable, {} unreadable (mean entropy {:.4}).",
            key,
            report_out.annotated,
            report_out.zero_byte,
            report_out.allocation_failed,
            report_out.unreadable,
            report_out.stats.mean
        );
        report_out
    }

    /// Ends the session, releasing every item buffer still held.
    pub fn done(&mut self) -> i32 {
        let released = self.registry.release_all();
        self.current = None;
        info!(
            "Session done: {} volumes seen, {} buffers released{}.",
            self.registry.len(),
            released,
            if self.is_exiting() { " after a fatal condition" } else { "" }
        );
        0
    }

    fn fail(&mut self, condition: XtEntropyError) {
        report(&mut self.host, &condition);
        self.exit_reason = Some(condition);
    }

    /// Whether a fatal condition has ended the run.
    pub fn is_exiting(&self) -> bool {
        self.exit_reason.is_some()
    }

    pub fn exit_reason(&self) -> Option<&XtEntropyError> {
        self.exit_reason.as_ref()
    }

    pub fn current_volume(&self) -> Option<&Volume> {
        self.current.and_then(|id| self.registry.get(id))
    }

    pub fn registry(&self) -> &VolumeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
