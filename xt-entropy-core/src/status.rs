// xt-entropy-core/src/status.rs
//! Operation types received from the host and the status codes returned to it
//! at each entry point.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

/// `XT_INIT_XWF`: running in X-Ways Forensics.
pub const XT_INIT_XWF: u32 = 0x0000_0001;
/// `XT_INIT_WHX`: running in WinHex.
pub const XT_INIT_WHX: u32 = 0x0000_0002;
/// `XT_INIT_XWI`: running in X-Ways Investigator.
pub const XT_INIT_XWI: u32 = 0x0000_0004;
/// `XT_INIT_BETA`: the host is a beta build.
pub const XT_INIT_BETA: u32 = 0x0000_0008;
/// `XT_INIT_QUICKCHECK`: the host only checks whether the extension loads.
pub const XT_INIT_QUICKCHECK: u32 = 0x0000_0020;
/// `XT_INIT_ABOUTONLY`: the host only wants the about text.
pub const XT_INIT_ABOUTONLY: u32 = 0x0000_0040;

/// Request per-item callbacks.
pub const XT_PREPARE_CALLPI: i32 = 0x01;
/// Request per-item callbacks after the host's own refinement steps.
pub const XT_PREPARE_CALLPILATE: i32 = 0x02;

/// What the host hands to `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerInfo {
    /// Host version, e.g. `2010` for v20.1.
    pub version: u32,
    /// Bit set of `XT_INIT_*` flags.
    pub flags: u32,
}

impl CallerInfo {
    /// Caller info for a regular X-Ways Forensics session.
    pub fn forensics(version: u32) -> Self {
        Self { version, flags: XT_INIT_XWF }
    }

    fn has(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    /// Host products and builds the engine refuses to run under.
    pub fn is_unsupported_host(&self) -> bool {
        !self.has(XT_INIT_XWF) || self.has(XT_INIT_WHX) || self.has(XT_INIT_XWI) || self.has(XT_INIT_BETA)
    }

    /// Whether the host only probes the extension.
    pub fn is_probe_only(&self) -> bool {
        self.has(XT_INIT_ABOUTONLY) || self.has(XT_INIT_QUICKCHECK)
    }
}

/// The mode of operation the host runs a volume under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Launched from the Tools menu.
    Run,
    /// Refine volume snapshot.
    RefineVolumeSnapshot,
    LogicalSearch,
    PhysicalSearch,
    /// Directory browser column computation.
    DirectoryBrowserColumn,
    SimultaneousSearch,
    Other(u32),
}

impl OperationType {
    /// Maps the host's numeric `XT_ACTION_*` code.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => OperationType::Run,
            1 => OperationType::RefineVolumeSnapshot,
            2 => OperationType::LogicalSearch,
            3 => OperationType::PhysicalSearch,
            4 => OperationType::DirectoryBrowserColumn,
            5 => OperationType::SimultaneousSearch,
            other => OperationType::Other(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            OperationType::Run => 0,
            OperationType::RefineVolumeSnapshot => 1,
            OperationType::LogicalSearch => 2,
            OperationType::PhysicalSearch => 3,
            OperationType::DirectoryBrowserColumn => 4,
            OperationType::SimultaneousSearch => 5,
            OperationType::Other(code) => *code,
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationType::Run => "run",
            OperationType::RefineVolumeSnapshot => "refine volume snapshot",
            OperationType::LogicalSearch => "logical search",
            OperationType::PhysicalSearch => "physical search",
            OperationType::DirectoryBrowserColumn => "directory browser column",
            OperationType::SimultaneousSearch => "simultaneous search",
            OperationType::Other(code) => return write!(f, "operation {}", code),
        };
        f.write_str(name)
    }
}

/// Result of `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// Host product or build not supported; the host unloads the extension.
    Unsupported,
    /// The host only probes the extension.
    AboutOnly,
    /// A fatal condition was reported; every later call short-circuits.
    Fatal,
    Ready,
}

impl InitStatus {
    pub fn code(&self) -> i32 {
        match self {
            InitStatus::Unsupported => -1,
            InitStatus::AboutOnly | InitStatus::Fatal => 1,
            InitStatus::Ready => 0,
        }
    }
}

/// Callback registration requested from the host by `prepare`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallbackRequest {
    pub per_item: bool,
    pub per_item_late: bool,
}

impl CallbackRequest {
    /// Combines two requests; a flag set in either stays set.
    pub fn union(self, other: CallbackRequest) -> CallbackRequest {
        CallbackRequest {
            per_item: self.per_item || other.per_item,
            per_item_late: self.per_item_late || other.per_item_late,
        }
    }

    pub fn bits(&self) -> i32 {
        let mut bits = 0;
        if self.per_item {
            bits |= XT_PREPARE_CALLPI;
        }
        if self.per_item_late {
            bits |= XT_PREPARE_CALLPILATE;
        }
        bits
    }
}

/// Result of `prepare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareStatus {
    /// Declined; the host stops calling for this volume.
    Decline,
    /// Declined because the host is in the middle of a search.
    DeclineDuringSearch,
    /// Proceed, with or without per-item callbacks.
    Proceed(CallbackRequest),
}

impl PrepareStatus {
    pub fn code(&self) -> i32 {
        match self {
            PrepareStatus::Decline => -1,
            PrepareStatus::DeclineDuringSearch => -3,
            PrepareStatus::Proceed(request) => request.bits(),
        }
    }

    pub fn requires_item_callback(&self) -> bool {
        matches!(self, PrepareStatus::Proceed(request) if request.per_item)
    }
}

/// Result of `process_item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessItemStatus {
    Continue,
    Abort,
}

impl ProcessItemStatus {
    pub fn code(&self) -> i32 {
        match self {
            ProcessItemStatus::Continue => 0,
            ProcessItemStatus::Abort => -1,
        }
    }
}

/// Result of `finalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeStatus {
    /// Nothing to do: no current volume, no buffered items, or the run is exiting.
    Skipped,
    /// Every buffered item was visited.
    Processed,
    /// The host asked to stop before all items were visited.
    Stopped,
}

impl FinalizeStatus {
    pub fn code(&self) -> i32 {
        match self {
            FinalizeStatus::Skipped => 0,
            FinalizeStatus::Processed | FinalizeStatus::Stopped => 1,
        }
    }
}
