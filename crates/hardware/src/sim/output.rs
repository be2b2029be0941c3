//! Result-file emission.
//!
//! After the run: the trimmed main-memory dump, per-core register dumps,
//! cache SRAM dumps, and statistics. All hex output is uppercase and
//! zero-padded to eight digits, one word per line.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::common::constants::{NUM_CORES, REG_COUNT};
use crate::config::FilesConfig;
use crate::core::arch::RegFile;
use crate::sim::simulator::Simulator;
use crate::stats::CoreStats;

/// Writes every result file named by the configuration.
pub fn write_outputs(sim: &Simulator, files: &FilesConfig) -> io::Result<()> {
    write_trimmed_words(&files.memout, sim.mem.words())?;
    for i in 0..NUM_CORES {
        let core = &sim.cores[i];
        write_regout(&files.regout[i], &core.regs)?;
        write_words(&files.dsram[i], core.cache.data_words())?;
        write_words(&files.tsram[i], &core.cache.tsram_words())?;
        write_stats(&files.stats[i], &core.stats)?;
    }
    Ok(())
}

/// Dumps `words` one per line.
pub fn write_words(path: &str, words: &[u32]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for word in words {
        writeln!(w, "{:08X}", word)?;
    }
    w.flush()
}

/// Dumps `words` with trailing zero words dropped.
pub fn write_trimmed_words(path: &str, words: &[u32]) -> io::Result<()> {
    let len = words
        .iter()
        .rposition(|&word| word != 0)
        .map_or(0, |last| last + 1);
    write_words(path, &words[..len])
}

/// Dumps R2..R15, one register per line.
pub fn write_regout(path: &str, regs: &RegFile) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for reg in 2..REG_COUNT {
        writeln!(w, "{:08X}", regs.read(reg))?;
    }
    w.flush()
}

/// Dumps one core's statistics counters.
pub fn write_stats(path: &str, stats: &CoreStats) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    stats.write_to(&mut w)?;
    w.flush()
}
