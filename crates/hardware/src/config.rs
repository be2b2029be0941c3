//! Simulator configuration.
//!
//! Two halves, both deserializable and defaulting field-by-field:
//! 1. **Files:** the 27 input/output paths, defaulting to the well-known
//!    names in the working directory.
//! 2. **General:** the optional cycle cap and branch diagnostics switch,
//!    normally folded in from the environment.

use serde::Deserialize;
use std::env;

use crate::common::constants::NUM_CORES;

/// Number of positional file arguments the driver accepts.
pub const ARG_COUNT: usize = 27;

/// Default filenames used when no paths are given on the command line.
mod defaults {
    pub const IMEM: [&str; 4] = ["imem0.txt", "imem1.txt", "imem2.txt", "imem3.txt"];
    pub const MEMIN: &str = "memin.txt";
    pub const MEMOUT: &str = "memout.txt";
    pub const REGOUT: [&str; 4] = ["regout0.txt", "regout1.txt", "regout2.txt", "regout3.txt"];
    pub const CORETRACE: [&str; 4] = [
        "core0trace.txt",
        "core1trace.txt",
        "core2trace.txt",
        "core3trace.txt",
    ];
    pub const BUSTRACE: &str = "bustrace.txt";
    pub const DSRAM: [&str; 4] = ["dsram0.txt", "dsram1.txt", "dsram2.txt", "dsram3.txt"];
    pub const TSRAM: [&str; 4] = ["tsram0.txt", "tsram1.txt", "tsram2.txt", "tsram3.txt"];
    pub const STATS: [&str; 4] = ["stats0.txt", "stats1.txt", "stats2.txt", "stats3.txt"];
}

/// Root configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input/output file table.
    pub files: FilesConfig,
    /// Run-control options.
    pub general: GeneralConfig,
}

/// The 27 input/output paths, in driver argument order.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Per-core instruction memory images.
    pub imem: [String; NUM_CORES],
    /// Main memory input image.
    pub memin: String,
    /// Main memory output dump (trailing zeros trimmed).
    pub memout: String,
    /// Per-core register dumps (R2..R15).
    pub regout: [String; NUM_CORES],
    /// Per-core pipeline trace files.
    pub coretrace: [String; NUM_CORES],
    /// Bus trace file.
    pub bustrace: String,
    /// Per-core cache data SRAM dumps.
    pub dsram: [String; NUM_CORES],
    /// Per-core cache tag/state SRAM dumps.
    pub tsram: [String; NUM_CORES],
    /// Per-core statistics files.
    pub stats: [String; NUM_CORES],
}

impl Default for FilesConfig {
    fn default() -> Self {
        let names = |set: [&str; NUM_CORES]| set.map(String::from);
        Self {
            imem: names(defaults::IMEM),
            memin: defaults::MEMIN.into(),
            memout: defaults::MEMOUT.into(),
            regout: names(defaults::REGOUT),
            coretrace: names(defaults::CORETRACE),
            bustrace: defaults::BUSTRACE.into(),
            dsram: names(defaults::DSRAM),
            tsram: names(defaults::TSRAM),
            stats: names(defaults::STATS),
        }
    }
}

impl FilesConfig {
    /// Builds the file table from the 27 positional arguments, in order:
    /// imem0..3, memin, memout, regout0..3, coretrace0..3, bustrace,
    /// dsram0..3, tsram0..3, stats0..3.
    ///
    /// # Panics
    ///
    /// Panics if `args` does not hold exactly [`ARG_COUNT`] entries; the
    /// driver validates arity before calling.
    pub fn from_args(args: &[String]) -> Self {
        assert_eq!(args.len(), ARG_COUNT, "expected {} file paths", ARG_COUNT);
        let four = |base: usize| -> [String; NUM_CORES] {
            [
                args[base].clone(),
                args[base + 1].clone(),
                args[base + 2].clone(),
                args[base + 3].clone(),
            ]
        };
        Self {
            imem: four(0),
            memin: args[4].clone(),
            memout: args[5].clone(),
            regout: four(6),
            coretrace: four(10),
            bustrace: args[14].clone(),
            dsram: four(15),
            tsram: four(19),
            stats: four(23),
        }
    }
}

/// Run-control options.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Abort the whole simulation after this many cycles.
    pub max_cycles: Option<u64>,
    /// Emit per-branch diagnostic records.
    pub debug_branch: bool,
}

impl GeneralConfig {
    /// Reads `SIM_MAX_CYCLES` (non-negative integer) and
    /// `SIM_DEBUG_BRANCH` (presence) from the environment.
    pub fn from_env() -> Self {
        let max_cycles = env::var("SIM_MAX_CYCLES")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|n| u64::try_from(n).ok());
        Self {
            max_cycles,
            debug_branch: env::var("SIM_DEBUG_BRANCH").is_ok(),
        }
    }
}
