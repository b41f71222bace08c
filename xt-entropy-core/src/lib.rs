// xt-entropy-core/src/lib.rs
//! # XT Entropy Core Library
//!
//! `xt-entropy-core` is the engine of the XT Entropy extension for evidence-processing
//! hosts. While the host enumerates the items of a volume the engine remembers every item
//! id; in a second pass it reads each item, computes the Shannon entropy of its bytes and
//! attaches the value back to the item as a comment.
//!
//! The library performs no I/O of its own. Everything it needs from the host (volume
//! names, item counts, item content, progress display, messages and the annotation sink)
//! is reached through the [`EvidenceHost`] trait.
//!
//! ## Modules
//!
//! * `host`: The `EvidenceHost` trait and the opaque handle types.
//! * `status`: Operation types, init flags and the status codes returned to the host.
//! * `volume_key`: Derivation of a file-name-safe registry key from volume names.
//! * `registry`: `VolumeRegistry` and the `Volume` records owning the item-id buffers.
//! * `collector`: Phase one, appending item ids to the current volume.
//! * `coordinator`: `ScanCoordinator`, one method per host entry point.
//! * `annotation`: Fixed-point text form of the entropy value.
//! * `config`: `EngineConfig` and its YAML loader.
//! * `errors`: Every condition the engine reports.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use xt_entropy_core::{CallerInfo, EngineConfig, OperationType, ScanCoordinator, VolumeHandle};
//!
//! let (mut session, status) = ScanCoordinator::init(host, CallerInfo::forensics(2010), EngineConfig::default());
//! let volume = VolumeHandle(0);
//! if session.prepare(volume, OperationType::RefineVolumeSnapshot).requires_item_callback() {
//!     for id in item_ids {
//!         session.process_item(id);
//!     }
//! }
//! let report = session.finalize(volume);
//! session.done();
//! ```
//!
//! ## Error Handling
//!
//! Host-protocol entry points never return `Result`: they report conditions through
//! [`EvidenceHost::output_message`] and answer with the host's status codes. The
//! conditions themselves are [`XtEntropyError`] values. Configuration loading uses
//! `anyhow::Result`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod annotation;
pub mod collector;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod host;
pub mod registry;
pub mod status;
pub mod volume_key;

/// Re-exports the engine configuration.
pub use config::{EngineConfig, XT_NAME};

/// Re-exports the custom error type for clear error reporting.
pub use errors::XtEntropyError;

/// Re-exports the host collaborator interface.
pub use host::{EvidenceHost, ItemHandle, ItemId, NameForm, VolumeHandle};

/// Re-exports the session driver and its per-volume report.
pub use coordinator::{about, FinalizeReport, ScanCoordinator};

pub use registry::{Volume, VolumeId, VolumeRegistry, VolumeState};

pub use status::{
    CallbackRequest, CallerInfo, FinalizeStatus, InitStatus, OperationType, PrepareStatus,
    ProcessItemStatus,
};

pub use annotation::format_entropy;
pub use volume_key::derive_volume_key;

/// Re-exports the entropy math so hosts need only this crate.
pub use xt_entropy_calc::{compute_entropy, compute_stats, EntropyScore, EntropyStats};
