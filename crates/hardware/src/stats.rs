//! Per-core statistics collection and reporting.
//!
//! Tracks the counters dumped to the per-core stats file:
//! 1. **Progress:** cycles the core was live, instructions retired.
//! 2. **Cache:** read/write hit and miss counts (an upgrade of a shared
//!    line counts as a write miss).
//! 3. **Stalls:** decode-stage hazard stalls and MEM-stage stalls.

use std::io::{self, Write};

/// Counters collected for one core over the whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreStats {
    /// Cycles elapsed while the core was not yet done.
    pub cycles: u64,
    /// Instructions retired (HALT included).
    pub instructions: u64,
    /// Loads satisfied by the local cache.
    pub read_hit: u64,
    /// Stores satisfied by the local cache (line in E or M).
    pub write_hit: u64,
    /// Loads that required a bus read.
    pub read_miss: u64,
    /// Stores that required a bus read-exclusive, shared-line upgrades included.
    pub write_miss: u64,
    /// Cycles the decode stage held an instruction back.
    pub decode_stall: u64,
    /// Cycles the MEM stage waited on the cache or the bus.
    pub mem_stall: u64,
}

impl CoreStats {
    /// Writes the stats file body: eight `name value` lines.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "cycles {}", self.cycles)?;
        writeln!(w, "instructions {}", self.instructions)?;
        writeln!(w, "read_hit {}", self.read_hit)?;
        writeln!(w, "write_hit {}", self.write_hit)?;
        writeln!(w, "read_miss {}", self.read_miss)?;
        writeln!(w, "write_miss {}", self.write_miss)?;
        writeln!(w, "decode_stall {}", self.decode_stall)?;
        writeln!(w, "mem_stall {}", self.mem_stall)?;
        Ok(())
    }
}
