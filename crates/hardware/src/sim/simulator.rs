//! Top-level simulator: four cores, the shared bus, and main memory.
//!
//! One `step` is one global cycle, in this order:
//! 1. Trace the start-of-cycle pipeline latches.
//! 2. Commit every core's writeback stage.
//! 3. Advance every pipeline (misses park bus requests).
//! 4. Arbitrate and start a bus transaction if the bus is idle.
//! 5. Resolve and trace the bus output, then advance the transaction.
//! 6. Check the cycle cap and global quiescence.
//!
//! Requests parked in step 3 are visible to arbitration in step 4 of the
//! same cycle; a transaction completing in step 5 releases the stalled
//! MEM stage for the next cycle's step 3.

use std::io;

use crate::common::constants::NUM_CORES;
use crate::config::GeneralConfig;
use crate::core::pipeline::advance_core;
use crate::core::pipeline::stages::writeback::writeback_stage;
use crate::core::Core;
use crate::sim::trace::Tracer;
use crate::soc::bus::{Bus, BusRequest};
use crate::soc::memory::MainMemory;

/// The whole machine plus run control.
pub struct Simulator {
    /// The four cores.
    pub cores: [Core; NUM_CORES],
    /// Shared snooping bus.
    pub bus: Bus,
    /// Shared main memory.
    pub mem: MainMemory,
    /// Per-core single-slot request mailboxes.
    pub requests: [Option<BusRequest>; NUM_CORES],
    /// Current cycle number.
    pub cycle: u64,
    tracer: Tracer,
    max_cycles: Option<u64>,
}

impl Simulator {
    /// Builds a simulator from per-core instruction images and an initial
    /// main memory.
    pub fn new(
        imems: [Vec<u32>; NUM_CORES],
        mem: MainMemory,
        tracer: Tracer,
        general: &GeneralConfig,
    ) -> Self {
        let [imem0, imem1, imem2, imem3] = imems;
        Self {
            cores: [
                Core::new(0, imem0),
                Core::new(1, imem1),
                Core::new(2, imem2),
                Core::new(3, imem3),
            ],
            bus: Bus::new(),
            mem,
            requests: [None; NUM_CORES],
            cycle: 0,
            tracer,
            max_cycles: general.max_cycles,
        }
    }

    /// Runs one global cycle. Returns true when the simulation is over:
    /// every core done and the bus idle, or the cycle cap reached.
    pub fn step(&mut self) -> io::Result<bool> {
        self.bus.begin_cycle();

        for core in &self.cores {
            self.tracer.core_line(self.cycle, core)?;
        }
        for core in &mut self.cores {
            writeback_stage(core);
        }
        for (i, core) in self.cores.iter_mut().enumerate() {
            advance_core(core, &mut self.requests[i], self.cycle);
        }

        self.bus.arbitrate(&mut self.requests, &mut self.cores, &self.mem);
        self.bus.resolve_output();
        if let Some(out) = self.bus.output() {
            self.tracer.bus_line(self.cycle, out)?;
        }
        self.bus.advance(&mut self.cores, &mut self.mem);

        if let Some(cap) = self.max_cycles {
            if self.cycle >= cap {
                return Ok(true);
            }
        }
        if self.all_done() && self.bus.is_idle() {
            return Ok(true);
        }
        self.cycle += 1;
        Ok(false)
    }

    /// Runs to completion and flushes the trace sinks.
    pub fn run(&mut self) -> io::Result<()> {
        while !self.step()? {}
        self.tracer.flush()
    }

    /// True when every core has halted and drained.
    pub fn all_done(&self) -> bool {
        self.cores.iter().all(|core| core.done)
    }
}
