//! Execute (EX) stage.
//!
//! Computes ALU results for register operations and the effective address
//! and store data for LW/SW, then hands the instruction to the memory
//! stage. Branch decisions are not made here; they resolve in decode.

use crate::common::constants::WORD_ADDR_MASK;
use crate::core::pipeline::latches::{MemEntry, NextLatches};
use crate::core::units::alu;
use crate::core::Core;

/// Executes the EX stage. Only called when the instruction can move into
/// a free memory stage next cycle.
pub fn execute_stage(core: &Core, next: &mut NextLatches) {
    let Some(entry) = core.exec else {
        return;
    };
    let inst = entry.inst;
    next.exec = None;

    let mut mem = MemEntry {
        inst,
        alu_result: 0,
        mem_addr: 0,
        store_data: 0,
        waiting: false,
        request_queued: false,
        miss_counted: false,
    };
    if inst.op.is_mem() {
        mem.mem_addr = entry.rs_val.wrapping_add(entry.rt_val) as u32 & WORD_ADDR_MASK;
        mem.store_data = entry.rd_val as u32;
    } else {
        mem.alu_result = alu::evaluate(&inst, entry.rs_val, entry.rt_val);
    }
    next.mem = Some(mem);
}
