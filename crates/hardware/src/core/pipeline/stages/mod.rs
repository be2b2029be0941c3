//! The five pipeline stages as free functions over the core state.
//!
//! Each stage reads the start-of-cycle latches and contributes to the
//! next-cycle latch set; none observes another stage's work from the same
//! cycle.

/// Decode: hazards, operand read, branch resolution.
pub mod decode;
/// Execute: ALU and address generation.
pub mod execute;
/// Fetch: instruction memory access and redirect handling.
pub mod fetch;
/// Memory: cache access and bus request generation.
pub mod memory;
/// Writeback: register commit and retirement.
pub mod writeback;
