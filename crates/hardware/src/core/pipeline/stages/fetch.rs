//! Fetch (IF) stage.
//!
//! Pulls the next instruction word from the core's private instruction
//! memory whenever decode will be free next cycle. A pending redirect
//! (taken branch or JAL resolved in decode) supplies the fetch address
//! instead of the PC; the redirect never squashes the instruction already
//! latched, which is how the delay slot survives.

use crate::common::constants::PC_MASK;
use crate::core::pipeline::latches::{FetchEntry, NextLatches};
use crate::core::Core;
use crate::isa::{Instruction, Opcode};

/// Executes the fetch stage.
pub fn fetch_stage(core: &mut Core, decode_free_next: bool, fetch_moves: bool, next: &mut NextLatches) {
    if !core.stop_fetch && decode_free_next {
        let fetch_pc = if core.redirect_pending {
            core.redirect_pending = false;
            core.redirect_pc
        } else {
            core.pc
        };
        let inst = Instruction::decode(core.imem[fetch_pc as usize], fetch_pc);
        // HALT stops fetch no matter how its address was produced; a
        // branch may target it directly.
        if inst.op == Opcode::Halt {
            core.stop_fetch = true;
        }
        next.fetch = Some(FetchEntry { inst });
        core.pc = fetch_pc.wrapping_add(1) & PC_MASK;
    } else if fetch_moves {
        next.fetch = None;
    }
}
