//! Pipeline latch payloads.
//!
//! Five latches carry an instruction through Fetch → Decode → Execute →
//! Mem → Writeback. Each latch is an `Option`: `None` is an empty stage.
//! Every stage reads the start-of-cycle latches and writes next-cycle
//! values, mirroring edge-triggered flip-flops.

use crate::isa::Instruction;

/// F latch: the instruction most recently fetched.
#[derive(Clone, Copy, Debug)]
pub struct FetchEntry {
    /// Fetched instruction.
    pub inst: Instruction,
}

/// D latch: the instruction being decoded and hazard-checked.
#[derive(Clone, Copy, Debug)]
pub struct DecodeEntry {
    /// Instruction in decode.
    pub inst: Instruction,
}

/// E latch: operand values snapshotted at the decode/execute handoff.
#[derive(Clone, Copy, Debug)]
pub struct ExecEntry {
    /// Instruction in execute.
    pub inst: Instruction,
    /// Value read from rs.
    pub rs_val: i32,
    /// Value read from rt.
    pub rt_val: i32,
    /// Value read from rd (store data or branch/jump target).
    pub rd_val: i32,
}

/// M latch: memory access parameters and replay bookkeeping.
#[derive(Clone, Copy, Debug)]
pub struct MemEntry {
    /// Instruction in the memory stage.
    pub inst: Instruction,
    /// ALU result forwarded to writeback for non-memory instructions.
    pub alu_result: u32,
    /// Computed 20-bit word address for LW/SW.
    pub mem_addr: u32,
    /// Value to store for SW.
    pub store_data: u32,
    /// Set while the core waits for its bus transaction to complete.
    pub waiting: bool,
    /// Set once the miss has been parked in the core's request slot.
    pub request_queued: bool,
    /// Set once hit/miss has been accounted for this occupancy, so the
    /// post-fill replay does not count again.
    pub miss_counted: bool,
}

/// W latch: the retiring instruction and its register write value.
#[derive(Clone, Copy, Debug)]
pub struct WbEntry {
    /// Retiring instruction.
    pub inst: Instruction,
    /// Value written to the destination register, if there is one.
    pub value: u32,
}

/// Next-cycle latch values, computed combinationally from the current
/// ones and committed at the end of the cycle.
#[derive(Clone, Copy, Debug)]
pub struct NextLatches {
    /// Next F latch.
    pub fetch: Option<FetchEntry>,
    /// Next D latch.
    pub decode: Option<DecodeEntry>,
    /// Next E latch.
    pub exec: Option<ExecEntry>,
    /// Next M latch.
    pub mem: Option<MemEntry>,
    /// Next W latch.
    pub wb: Option<WbEntry>,
}
