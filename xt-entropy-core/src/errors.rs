//! errors.rs - Custom error types for the xt-entropy-core library.
//!
//! Every condition the engine reports to the host is a variant here; the
//! `Display` text is the one-line message body shown to the examiner.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all reportable conditions in the `xt-entropy-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum XtEntropyError {
    #[error("The Version of X-Ways Forensics must be v.{required} or Later")]
    UnsupportedHostVersion { required: u32, found: u32 },

    #[error("Active Case is Required")]
    NoActiveCase,

    #[error("No Evidence is Found")]
    NoEvidence,

    #[error("Not Supposed to be Executed from the Tools Menu")]
    LaunchedFromToolsMenu,

    #[error("Not Supposed to be Executed during Searches")]
    LaunchedDuringSearch,

    #[error("Does Not Support this Mode of Operation ({0})")]
    UnsupportedOperation(u32),

    #[error("Unable to Allocate the Item Buffer for {count} Items of Volume \"{key}\"")]
    ItemBufferAllocation { key: String, count: u64 },

    #[error("Unable to Associate the File with a Volume")]
    NoCurrentVolume,

    #[error("Volume \"{0}\" is not Accepting Items")]
    BufferNotAllocated(String),

    #[error("Volume \"{key}\" Received More Items than the {capacity} Announced")]
    BufferFull { key: String, capacity: usize },

    #[error("Unable to Allocate Memory for \"{item}\" ({size} bytes)")]
    ScratchAllocation { item: String, size: u64 },

    #[error("Unable to Calculate Entropy for 0-Byte File \"{0}\"")]
    ZeroByteItem(String),
}

impl XtEntropyError {
    /// Whether this condition ends the whole run rather than a single call or item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            XtEntropyError::UnsupportedHostVersion { .. }
                | XtEntropyError::NoActiveCase
                | XtEntropyError::NoEvidence
                | XtEntropyError::NoCurrentVolume
                | XtEntropyError::BufferNotAllocated(_)
                | XtEntropyError::BufferFull { .. }
        )
    }
}
