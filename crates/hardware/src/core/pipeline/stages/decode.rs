//! Decode (ID) stage.
//!
//! The busiest stage: it refreshes the R1 immediate mirror, detects RAW
//! hazards against every in-flight writer (there is no forwarding),
//! snapshots operand values for execute, and resolves branches. A taken
//! branch or JAL only redirects the NEXT fetch; the instruction already
//! in the fetch latch is the delay slot and always executes.

use crate::common::constants::PC_MASK;
use crate::core::pipeline::latches::{ExecEntry, NextLatches};
use crate::core::units::alu;
use crate::core::Core;
use crate::isa::Opcode;

/// Executes the decode stage. Returns true when the instruction moves to
/// execute this cycle.
pub fn decode_stage(core: &mut Core, exec_free_next: bool, next: &mut NextLatches, cycle: u64) -> bool {
    let Some(entry) = core.decode else {
        next.decode = None;
        return false;
    };
    let inst = entry.inst;

    // R1 mirrors the decode-stage immediate even while stalled.
    core.regs.set_imm(inst.imm);

    let mut stall = false;
    let (srcs, count) = inst.source_regs();
    for &reg in &srcs[..count] {
        if reg <= 1 {
            continue;
        }
        let writes_reg = |dest: Option<usize>| dest == Some(reg);
        if core.exec.is_some_and(|e| writes_reg(e.inst.dest_reg()))
            || core.mem.is_some_and(|m| writes_reg(m.inst.dest_reg()))
            || core.wb.is_some_and(|w| writes_reg(w.inst.dest_reg()))
        {
            stall = true;
        }
    }
    if !exec_free_next {
        stall = true;
    }
    if stall {
        core.stats.decode_stall += 1;
        return false;
    }

    let rs_val = core.regs.read(inst.rs) as i32;
    let rt_val = core.regs.read(inst.rt) as i32;
    let rd_val = core.regs.read(inst.rd) as i32;
    next.exec = Some(ExecEntry {
        inst,
        rs_val,
        rt_val,
        rd_val,
    });

    if inst.op.is_branch() {
        let taken = alu::branch_taken(inst.op, rs_val, rt_val);
        if core.id == 3 {
            log::debug!(
                target: "branch",
                "cycle {} core{} branch pc {:03X} rs={:08X} rt={:08X} taken={} target={:03X}",
                cycle,
                core.id,
                inst.pc & PC_MASK,
                rs_val as u32,
                rt_val as u32,
                u8::from(taken),
                (rd_val as u32) & PC_MASK,
            );
        }
        if taken {
            core.redirect_pending = true;
            core.redirect_pc = (rd_val as u32) & PC_MASK;
        }
    } else if inst.op == Opcode::Jal {
        core.redirect_pending = true;
        core.redirect_pc = (rd_val as u32) & PC_MASK;
    }

    next.decode = None;
    true
}
