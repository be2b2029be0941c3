//! Test harness.
//!
//! `TestContext` assembles a four-core simulator from in-memory images.
//! Cores default to a lone HALT; `load_program` replaces one core's
//! instruction memory and `with_memory_word` seeds main memory. The
//! simulator is built lazily on first access so programs and memory can
//! be staged fluently.

use mesisim_core::common::constants::NUM_CORES;
use mesisim_core::config::GeneralConfig;
use mesisim_core::sim::trace::Tracer;
use mesisim_core::soc::memory::MainMemory;
use mesisim_core::stats::CoreStats;
use mesisim_core::Simulator;

use crate::common::builder::instruction::InstructionBuilder;

/// Upper bound for `run_to_completion`; a healthy test program finishes
/// well inside it.
const CYCLE_GUARD: u64 = 2_000_000;

pub struct TestContext {
    imems: [Vec<u32>; NUM_CORES],
    mem_image: Vec<u32>,
    general: GeneralConfig,
    sim: Option<Simulator>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let halt = InstructionBuilder::new().halt().build();
        Self {
            imems: std::array::from_fn(|_| vec![halt]),
            mem_image: Vec::new(),
            general: GeneralConfig::default(),
            sim: None,
        }
    }

    /// Replaces `core`'s instruction memory. Must precede the first step.
    pub fn load_program(mut self, core: usize, words: &[u32]) -> Self {
        assert!(self.sim.is_none(), "program loaded after simulation started");
        self.imems[core] = words.to_vec();
        self
    }

    /// Seeds one word of main memory.
    pub fn with_memory_word(mut self, addr: u32, value: u32) -> Self {
        assert!(self.sim.is_none(), "memory seeded after simulation started");
        let addr = addr as usize;
        if self.mem_image.len() <= addr {
            self.mem_image.resize(addr + 1, 0);
        }
        self.mem_image[addr] = value;
        self
    }

    /// The simulator, built on first access. Traces go to a sink.
    pub fn sim(&mut self) -> &mut Simulator {
        if self.sim.is_none() {
            self.sim = Some(Simulator::new(
                self.imems.clone(),
                MainMemory::from_words(self.mem_image.clone()),
                Tracer::discard(),
                &self.general,
            ));
        }
        self.sim.as_mut().unwrap()
    }

    /// Runs one cycle; true when the simulation finished.
    pub fn step(&mut self) -> bool {
        self.sim().step().expect("sink traces cannot fail")
    }

    /// Runs at most `cycles` cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            if self.step() {
                break;
            }
        }
    }

    /// Runs until global quiescence; panics if the guard trips first.
    pub fn run_to_completion(&mut self) {
        for _ in 0..CYCLE_GUARD {
            if self.step() {
                return;
            }
        }
        panic!("simulation did not finish within {} cycles", CYCLE_GUARD);
    }

    /// Reads a register of one core.
    pub fn reg(&mut self, core: usize, idx: usize) -> u32 {
        self.sim().cores[core].regs.read(idx)
    }

    /// Snapshot of one core's statistics.
    pub fn stats(&mut self, core: usize) -> CoreStats {
        self.sim().cores[core].stats.clone()
    }

    /// Reads one word of main memory.
    pub fn mem_word(&mut self, addr: u32) -> u32 {
        self.sim().mem.read(addr)
    }
}
