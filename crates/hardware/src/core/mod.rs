//! Per-core state: architectural registers, private instruction memory,
//! pipeline latches, private cache, and statistics.

/// Architectural state (register file).
pub mod arch;
/// Five-stage pipeline engine and latches.
pub mod pipeline;
/// Functional units (ALU, cache).
pub mod units;

use crate::common::constants::{IMEM_WORDS, PC_MASK};
use crate::core::arch::RegFile;
use crate::core::pipeline::latches::{DecodeEntry, ExecEntry, FetchEntry, MemEntry, WbEntry};
use crate::core::units::cache::Cache;
use crate::isa::{Instruction, Opcode};
use crate::stats::CoreStats;

/// One processor core.
///
/// The fetch latch is primed with the instruction at PC 0 at reset, so
/// the first traced cycle already shows it in F.
pub struct Core {
    /// Core id (0..3); doubles as the bus originator id.
    pub id: usize,
    /// Private instruction memory, padded to 1024 words.
    pub imem: Vec<u32>,
    /// Register file.
    pub regs: RegFile,
    /// Next sequential fetch address.
    pub pc: u32,
    /// A taken branch or JAL resolved in decode and the next fetch must
    /// come from `redirect_pc`.
    pub redirect_pending: bool,
    /// Redirect target, wrapped to instruction memory.
    pub redirect_pc: u32,
    /// Set once a HALT has been fetched; no further instructions enter F.
    pub stop_fetch: bool,
    /// Set when a HALT retires.
    pub halted: bool,
    /// Set when the core is halted and the pipeline has drained.
    pub done: bool,
    /// F latch.
    pub fetch: Option<FetchEntry>,
    /// D latch.
    pub decode: Option<DecodeEntry>,
    /// E latch.
    pub exec: Option<ExecEntry>,
    /// M latch.
    pub mem: Option<MemEntry>,
    /// W latch.
    pub wb: Option<WbEntry>,
    /// Private data cache.
    pub cache: Cache,
    /// Statistics counters.
    pub stats: CoreStats,
}

impl Core {
    /// Creates a core at reset: registers cleared, cache invalid, fetch
    /// latch primed with the pc=0 instruction and the PC advanced past it.
    pub fn new(id: usize, mut imem: Vec<u32>) -> Self {
        imem.resize(IMEM_WORDS, 0);
        let first = Instruction::decode(imem[0], 0);
        Self {
            id,
            imem,
            regs: RegFile::new(),
            pc: 1 & PC_MASK,
            redirect_pending: false,
            redirect_pc: 0,
            stop_fetch: first.op == Opcode::Halt,
            halted: false,
            done: false,
            fetch: Some(FetchEntry { inst: first }),
            decode: None,
            exec: None,
            mem: None,
            wb: None,
            cache: Cache::new(),
            stats: CoreStats::default(),
        }
    }

    /// True while any latch holds an instruction.
    pub fn pipeline_active(&self) -> bool {
        self.fetch.is_some()
            || self.decode.is_some()
            || self.exec.is_some()
            || self.mem.is_some()
            || self.wb.is_some()
    }
}
