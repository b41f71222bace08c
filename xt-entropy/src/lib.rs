// xt-entropy/src/lib.rs
//! # XT Entropy CLI
//!
//! Runs the XT Entropy engine outside a forensic host: a directory on disk is
//! presented as one evidence volume through [`host::DirectoryHost`], and the full
//! host protocol (init, prepare, per-item collection, finalize, done) is driven
//! against it.

pub mod cli;
pub mod commands;
pub mod host;
pub mod logger;
pub mod ui;

pub use commands::scan::{run_scan, ScanOptions, ScanOutcome};
