//! Cycle-by-cycle trace emission.
//!
//! Two trace products: a per-core pipeline trace (one line per cycle in
//! which any latch is occupied) and a bus trace (one line per cycle a
//! command is driven). Both are streamed during simulation; sinks are
//! boxed writers so tests can capture or discard them.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::common::constants::{NUM_CORES, PC_MASK, REG_COUNT, WORD_ADDR_MASK};
use crate::config::FilesConfig;
use crate::core::Core;
use crate::soc::bus::BusOutput;

/// Owns the trace sinks and knows both line formats.
pub struct Tracer {
    core_sinks: [Box<dyn Write>; NUM_CORES],
    bus_sink: Box<dyn Write>,
}

impl Tracer {
    /// Opens the trace files named by the configuration.
    pub fn create(files: &FilesConfig) -> io::Result<Self> {
        let open = |path: &str| -> io::Result<Box<dyn Write>> {
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        };
        Ok(Self {
            core_sinks: [
                open(&files.coretrace[0])?,
                open(&files.coretrace[1])?,
                open(&files.coretrace[2])?,
                open(&files.coretrace[3])?,
            ],
            bus_sink: open(&files.bustrace)?,
        })
    }

    /// Builds a tracer over caller-supplied sinks.
    pub fn from_writers(core_sinks: [Box<dyn Write>; NUM_CORES], bus_sink: Box<dyn Write>) -> Self {
        Self {
            core_sinks,
            bus_sink,
        }
    }

    /// Builds a tracer that discards everything.
    pub fn discard() -> Self {
        Self {
            core_sinks: [
                Box::new(io::sink()),
                Box::new(io::sink()),
                Box::new(io::sink()),
                Box::new(io::sink()),
            ],
            bus_sink: Box::new(io::sink()),
        }
    }

    /// Emits one pipeline trace line for `core`, skipping cycles where the
    /// pipeline is empty. Format: cycle, the five stage PCs (`---` when
    /// empty), then R2..R15.
    pub fn core_line(&mut self, cycle: u64, core: &Core) -> io::Result<()> {
        if !core.pipeline_active() {
            return Ok(());
        }
        let sink = &mut self.core_sinks[core.id];
        write!(sink, "{}", cycle)?;
        let stage_pcs = [
            core.fetch.map(|e| e.inst.pc),
            core.decode.map(|e| e.inst.pc),
            core.exec.map(|e| e.inst.pc),
            core.mem.map(|e| e.inst.pc),
            core.wb.map(|e| e.inst.pc),
        ];
        for pc in stage_pcs {
            match pc {
                Some(pc) => write!(sink, " {:03X}", pc & PC_MASK)?,
                None => write!(sink, " ---")?,
            }
        }
        for reg in 2..REG_COUNT {
            write!(sink, " {:08X}", core.regs.read(reg))?;
        }
        writeln!(sink)
    }

    /// Emits one bus trace line: cycle, originator id, command code,
    /// 5-digit word address, 8-digit data, shared bit.
    pub fn bus_line(&mut self, cycle: u64, out: &BusOutput) -> io::Result<()> {
        writeln!(
            self.bus_sink,
            "{} {:X} {:X} {:05X} {:08X} {:X}",
            cycle,
            out.origid,
            out.cmd.code(),
            out.addr & WORD_ADDR_MASK,
            out.data,
            u32::from(out.shared),
        )
    }

    /// Flushes every sink.
    pub fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.core_sinks {
            sink.flush()?;
        }
        self.bus_sink.flush()
    }
}
