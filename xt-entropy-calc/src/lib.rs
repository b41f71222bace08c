// xt-entropy-calc/src/lib.rs
#![no_std]

extern crate alloc; 

#[cfg(feature = "std")]
extern crate std;

pub mod entropy;
pub mod statistics;

pub use entropy::{compute_entropy, MAX_ENTROPY};
pub use statistics::{compute_stats, EntropyStats};

/// Common type definitions
pub type EntropyScore = f64;
