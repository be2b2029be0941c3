//! Memory (MEM) stage.
//!
//! Probes the private cache for LW/SW, accounts hits and misses exactly
//! once per occupancy, and parks a bus request when the access cannot be
//! satisfied locally. Non-memory instructions pass their ALU result
//! straight through to writeback.

use crate::common::addr;
use crate::common::constants::WORD_ADDR_MASK;
use crate::core::pipeline::latches::{NextLatches, WbEntry};
use crate::core::units::cache::MesiState;
use crate::core::Core;
use crate::isa::Opcode;
use crate::soc::bus::{BusCmd, BusRequest};

/// Executes the MEM stage. Returns true when the latch drains this cycle.
///
/// A store that finds the line Shared is accounted as a write miss: the
/// data is present but the write needs exclusive ownership, so an RDX
/// upgrade goes on the bus like any other miss.
pub fn memory_stage(
    core: &mut Core,
    request_slot: &mut Option<BusRequest>,
    next: &mut NextLatches,
) -> bool {
    let Some(entry) = core.mem else {
        return false;
    };

    if entry.waiting {
        core.stats.mem_stall += 1;
        return false;
    }

    let inst = entry.inst;
    if !inst.op.is_mem() {
        next.wb = Some(WbEntry {
            inst,
            value: entry.alu_result,
        });
        next.mem = None;
        return true;
    }

    let is_load = inst.op == Opcode::Lw;
    let state = core.cache.lookup(entry.mem_addr);
    let needs_bus = match state {
        None => true,
        Some(MesiState::Shared) => !is_load,
        Some(_) => false,
    };

    if !entry.miss_counted {
        match (is_load, needs_bus) {
            (true, false) => core.stats.read_hit += 1,
            (true, true) => core.stats.read_miss += 1,
            (false, false) => core.stats.write_hit += 1,
            (false, true) => core.stats.write_miss += 1,
        }
    }

    if needs_bus {
        if !entry.request_queued {
            *request_slot = Some(BusRequest {
                cmd: if is_load { BusCmd::Rd } else { BusCmd::Rdx },
                addr: entry.mem_addr & WORD_ADDR_MASK,
                origin: core.id,
            });
        }
        let held = next.mem.as_mut().expect("MEM latch must hold while missing");
        held.request_queued = true;
        held.miss_counted = true;
        held.waiting = true;
        core.stats.mem_stall += 1;
        return false;
    }

    if is_load {
        let value = core.cache.read_word(entry.mem_addr);
        next.wb = Some(WbEntry { inst, value });
    } else {
        core.cache.write_word(entry.mem_addr, entry.store_data);
        if state == Some(MesiState::Exclusive) {
            core.cache
                .set_state(addr::line_index(entry.mem_addr), MesiState::Modified);
        }
        next.wb = Some(WbEntry { inst, value: 0 });
    }
    next.mem = None;
    true
}
