//! Functional units owned by a core.

/// ALU and branch comparison semantics.
pub mod alu;
/// Direct-mapped write-back MESI cache.
pub mod cache;
