//! Architectural register file.
//!
//! Sixteen 32-bit registers per core with two reserved entries:
//! 1. **R0** is hardwired to zero.
//! 2. **R1** mirrors the immediate of the instruction currently in decode
//!    and is refreshed every cycle that stage holds an instruction; it is
//!    not an architectural write target.

use crate::common::constants::REG_COUNT;

/// Register file with R0/R1 invariants enforced at the write ports.
#[derive(Clone, Debug)]
pub struct RegFile {
    regs: [u32; REG_COUNT],
}

impl Default for RegFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegFile {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a register. R0 always reads zero.
    pub fn read(&self, idx: usize) -> u32 {
        self.regs[idx]
    }

    /// Architectural write port; R0 and R1 ignore writes.
    pub fn write(&mut self, idx: usize, value: u32) {
        if idx >= 2 {
            self.regs[idx] = value;
        }
    }

    /// Refreshes R1 with the decode-stage immediate.
    pub fn set_imm(&mut self, imm: i32) {
        self.regs[1] = imm as u32;
    }
}
