//! Four-core MESI simulator CLI.
//!
//! Single entry point wiring the 27 input/output files to the simulator:
//! 1. **Default run:** no arguments; the well-known filenames in the
//!    working directory are used.
//! 2. **Explicit run:** exactly 27 positional paths in the canonical
//!    order. Any other arity prints usage and exits non-zero.
//!
//! `SIM_MAX_CYCLES` caps the run; `SIM_DEBUG_BRANCH` turns on per-branch
//! diagnostic records (also reachable through `RUST_LOG=branch=debug`).

use clap::Parser;
use std::io;
use std::process;

use mesisim_core::common::constants::{IMEM_WORDS, MAIN_MEM_WORDS, NUM_CORES};
use mesisim_core::config::{Config, FilesConfig, GeneralConfig, ARG_COUNT};
use mesisim_core::sim::{loader, output, trace::Tracer};
use mesisim_core::soc::memory::MainMemory;
use mesisim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    about = "Cycle-accurate four-core MESI bus simulator",
    long_about = "Simulates four five-stage cores with private caches on a shared \
                  snooping MESI bus.\n\nRun with no arguments to use the default \
                  filenames in the working directory, or pass all 27 paths:\n  \
                  imem0..3 memin memout regout0..3 coretrace0..3 bustrace \
                  dsram0..3 tsram0..3 stats0..3"
)]
struct Cli {
    /// The 27 file paths, or nothing for the defaults.
    files: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    let general = GeneralConfig::from_env();
    init_logging(&general);

    let files = match cli.files.len() {
        0 => FilesConfig::default(),
        len if len == ARG_COUNT => FilesConfig::from_args(&cli.files),
        _ => {
            eprintln!(
                "usage: sim [imem0 imem1 imem2 imem3 memin memout \
                 regout0 regout1 regout2 regout3 \
                 coretrace0 coretrace1 coretrace2 coretrace3 bustrace \
                 dsram0 dsram1 dsram2 dsram3 tsram0 tsram1 tsram2 tsram3 \
                 stats0 stats1 stats2 stats3]"
            );
            process::exit(1);
        }
    };
    let config = Config { files, general };

    if let Err(e) = run(&config) {
        eprintln!("simulation failed: {}", e);
        process::exit(1);
    }
}

/// Loads the images, runs the machine to quiescence, and writes every
/// result file.
fn run(config: &Config) -> io::Result<()> {
    let mut imems: [Vec<u32>; NUM_CORES] = Default::default();
    for (i, image) in imems.iter_mut().enumerate() {
        *image = loader::load_hex_image(&config.files.imem[i], IMEM_WORDS);
    }
    let mem = MainMemory::from_words(loader::load_hex_image(&config.files.memin, MAIN_MEM_WORDS));
    let tracer = Tracer::create(&config.files)?;

    let mut sim = Simulator::new(imems, mem, tracer, &config.general);
    sim.run()?;
    log::info!("finished after {} cycles", sim.cycle);

    output::write_outputs(&sim, &config.files)
}

/// Initialises the logger. `SIM_DEBUG_BRANCH` forces the branch records
/// out even without `RUST_LOG`.
fn init_logging(general: &GeneralConfig) {
    let mut builder = env_logger::Builder::from_default_env();
    if general.debug_branch {
        builder.filter(Some("branch"), log::LevelFilter::Debug);
    }
    builder.init();
}
