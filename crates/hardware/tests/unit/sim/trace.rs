//! Trace Format Tests.
//!
//! Runs a single-load program against file-backed trace sinks and checks
//! both products line by line: the RD beat, the memory latency gap, the
//! eight flush beats, and the pipeline trace fields.

use std::fs;
use tempfile::tempdir;

use mesisim_core::config::{FilesConfig, GeneralConfig};
use mesisim_core::sim::trace::Tracer;
use mesisim_core::soc::memory::MainMemory;
use mesisim_core::Simulator;

use crate::common::builder::instruction::InstructionBuilder;

fn ib() -> InstructionBuilder {
    InstructionBuilder::new()
}

/// Runs "core 0: LW R2 <- mem[0]; HALT" with real trace files and
/// returns (coretrace0 lines, coretrace1 lines, bustrace lines).
fn traced_load_run() -> (Vec<String>, Vec<String>, Vec<String>) {
    let dir = tempdir().unwrap();
    let mut files = FilesConfig::default();
    for (i, path) in files.coretrace.iter_mut().enumerate() {
        *path = dir
            .path()
            .join(format!("core{}trace.txt", i))
            .to_str()
            .unwrap()
            .to_string();
    }
    files.bustrace = dir.path().join("bustrace.txt").to_str().unwrap().to_string();

    let halt = ib().halt().build();
    let imems = [
        vec![ib().lw(2, 0, 1, 0).build(), halt],
        vec![halt],
        vec![halt],
        vec![halt],
    ];
    let mem = MainMemory::from_words(vec![0xDEAD_BEEF]);
    let tracer = Tracer::create(&files).unwrap();

    let mut sim = Simulator::new(imems, mem, tracer, &GeneralConfig::default());
    sim.run().unwrap();

    let lines = |path: &str| -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    };
    (
        lines(&files.coretrace[0]),
        lines(&files.coretrace[1]),
        lines(&files.bustrace),
    )
}

#[test]
fn bus_trace_carries_the_transaction_timeline() {
    let (_, _, bus) = traced_load_run();

    // One RD beat, a 15-cycle silent latency gap, eight flush beats.
    assert_eq!(bus.len(), 9);
    assert_eq!(bus[0], "3 0 1 00000 00000000 0");
    assert_eq!(bus[1], "19 4 3 00000 DEADBEEF 0");
    assert_eq!(bus[2], "20 4 3 00001 00000000 0");
    assert_eq!(bus[8], "26 4 3 00007 00000000 0");
}

#[test]
fn core_trace_shows_stage_pcs_and_registers() {
    let (core0, core1, _) = traced_load_run();

    // The load core stays live for 30 cycles.
    assert_eq!(core0.len(), 30);
    let zeros = " 00000000".repeat(14);
    assert_eq!(core0[0], format!("0 000 --- --- --- ---{}", zeros));
    assert_eq!(core0[1], format!("1 001 000 --- --- ---{}", zeros));

    // The loaded value is visible in R2 only after the LW left writeback.
    let last = &core0[29];
    assert!(last.starts_with("29 --- --- --- --- 001"));
    assert!(last.contains("DEADBEEF"));
    assert!(!core0[28].contains("DEADBEEF"));

    // A HALT-only core drains in five cycles and stops tracing.
    assert_eq!(core1.len(), 5);
    assert_eq!(core1[0], format!("0 000 --- --- --- ---{}", zeros));
}
