//! Architectural state owned by a core.

/// Register file with the R0/R1 reservations.
pub mod regfile;

pub use regfile::RegFile;
