//! In-order five-stage pipeline engine.
//!
//! `advance_core` runs one core through one cycle: it evaluates the
//! stages back to front against the start-of-cycle latches, then commits
//! the next-cycle latch set. Back-to-front evaluation lets each stage
//! know whether its successor frees up without seeing its successor's
//! new contents.

/// Latch payload types.
pub mod latches;
/// Stage implementations.
pub mod stages;

use crate::core::pipeline::latches::{DecodeEntry, NextLatches};
use crate::core::Core;
use crate::soc::bus::BusRequest;

/// Advances one core by one cycle. The writeback commit has already run
/// for every core; this computes M, E, D, F movement and latches the
/// results. Misses park a request in `request_slot` for the bus to pick
/// up later in the same cycle.
pub fn advance_core(core: &mut Core, request_slot: &mut Option<BusRequest>, cycle: u64) {
    if !core.done {
        core.stats.cycles += 1;
    }

    let mut next = NextLatches {
        fetch: core.fetch,
        decode: core.decode,
        exec: core.exec,
        mem: core.mem,
        wb: None,
    };

    let mem_advances = stages::memory::memory_stage(core, request_slot, &mut next);
    let mem_free_next = core.mem.is_none() || mem_advances;
    let exec_can_move = core.exec.is_some() && mem_free_next;
    let exec_free_next = core.exec.is_none() || exec_can_move;
    if exec_can_move {
        stages::execute::execute_stage(core, &mut next);
    }

    let decode_moves = stages::decode::decode_stage(core, exec_free_next, &mut next, cycle);
    let decode_free_next = core.decode.is_none() || decode_moves;
    let fetch_moves = core.fetch.is_some() && decode_free_next;
    if fetch_moves {
        next.decode = core.fetch.map(|f| DecodeEntry { inst: f.inst });
    }
    stages::fetch::fetch_stage(core, decode_free_next, fetch_moves, &mut next);

    core.fetch = next.fetch;
    core.decode = next.decode;
    core.exec = next.exec;
    core.mem = next.mem;
    core.wb = next.wb;

    if core.halted && !core.pipeline_active() {
        core.done = true;
    }
}
