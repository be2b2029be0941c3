//! Shared snooping bus.
//!
//! One transaction at a time, no pipelining:
//! 1. **Arbitration:** round-robin over the four per-core request slots;
//!    the winner's slot is cleared, losers retry next cycle.
//! 2. **Snoop:** peer caches react atomically at transaction start and
//!    decide the data provider (a Modified peer or main memory).
//! 3. **Wait:** memory-sourced blocks sit out the fixed memory latency;
//!    cache-sourced blocks skip it.
//! 4. **Flush:** eight cycles streaming the block, then completion fills
//!    the originator's cache and brings memory up to date.

use crate::common::addr;
use crate::common::constants::{BLOCK_WORDS, MEMORY_LATENCY, NUM_CORES, WORD_ADDR_MASK};
use crate::core::units::cache::{MesiState, SnoopResponse};
use crate::core::Core;
use crate::soc::memory::MainMemory;

/// Originator id driven on flush beats when main memory sources the block.
pub const MEMORY_PROVIDER: usize = NUM_CORES;

/// Commands driven on the bus command lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusCmd {
    /// Read a block for sharing.
    Rd,
    /// Read a block for exclusive ownership (write intent).
    Rdx,
    /// One beat of the block stream.
    Flush,
}

impl BusCmd {
    /// Wire encoding of the command (1 = RD, 2 = RDX, 3 = FLUSH).
    pub fn code(self) -> u32 {
        match self {
            BusCmd::Rd => 1,
            BusCmd::Rdx => 2,
            BusCmd::Flush => 3,
        }
    }
}

/// A core's single-slot miss or upgrade request, parked until arbitration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusRequest {
    /// RD for a load miss, RDX for a store miss or shared-line upgrade.
    pub cmd: BusCmd,
    /// Requested word address.
    pub addr: u32,
    /// Requesting core.
    pub origin: usize,
}

/// Signals observable on the bus during one cycle.
#[derive(Clone, Copy, Debug)]
pub struct BusOutput {
    /// Command lines.
    pub cmd: BusCmd,
    /// Driving agent: the originator on RD/RDX, the provider on FLUSH.
    pub origid: usize,
    /// Word address lines.
    pub addr: u32,
    /// Data lines; zero outside the flush phase.
    pub data: u32,
    /// Shared signal, as sampled at transaction start.
    pub shared: bool,
}

/// Transaction phase after the start cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TxPhase {
    /// Counting down the memory latency (zero for cache-sourced blocks).
    Wait,
    /// Streaming the block, one word per cycle.
    Flush,
}

/// The in-flight transaction. Created by arbitration, destroyed at
/// flush completion.
struct Transaction {
    cmd: BusCmd,
    origin: usize,
    addr: u32,
    shared: bool,
    provider: usize,
    block: [u32; BLOCK_WORDS],
    delay: u32,
    index: usize,
    phase: TxPhase,
}

/// Bus arbiter and transaction engine.
pub struct Bus {
    current: Option<Transaction>,
    rr_next: usize,
    output: Option<BusOutput>,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    /// Creates an idle bus with round-robin priority at core 0.
    pub fn new() -> Self {
        Self {
            current: None,
            rr_next: 0,
            output: None,
        }
    }

    /// True when no transaction is in flight.
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Signals driven this cycle, if any.
    pub fn output(&self) -> Option<&BusOutput> {
        self.output.as_ref()
    }

    /// Clears the driven signals at the top of a cycle.
    pub fn begin_cycle(&mut self) {
        self.output = None;
    }

    /// Round-robin arbitration. At most one pending request wins per cycle
    /// and its transaction starts immediately; nothing happens while a
    /// transaction is in flight.
    pub fn arbitrate(
        &mut self,
        requests: &mut [Option<BusRequest>; NUM_CORES],
        cores: &mut [Core; NUM_CORES],
        mem: &MainMemory,
    ) {
        if self.current.is_some() {
            return;
        }
        let mut chosen = None;
        for k in 0..NUM_CORES {
            let slot = (self.rr_next + k) % NUM_CORES;
            if requests[slot].is_some() {
                chosen = Some(slot);
                break;
            }
        }
        let Some(slot) = chosen else {
            return;
        };
        self.rr_next = (slot + 1) % NUM_CORES;
        let req = requests[slot].take().expect("arbitration picked an empty slot");
        self.start(req, cores, mem);
    }

    /// Starts a transaction: snoops every peer cache, picks the provider,
    /// captures the block, and drives the RD/RDX beat.
    fn start(&mut self, req: BusRequest, cores: &mut [Core; NUM_CORES], mem: &MainMemory) {
        let mut shared = false;
        let mut provider = MEMORY_PROVIDER;
        let mut block = [0u32; BLOCK_WORDS];

        for (id, core) in cores.iter_mut().enumerate() {
            if id == req.origin {
                continue;
            }
            match core.cache.snoop(req.cmd, req.addr) {
                SnoopResponse::Miss => {}
                SnoopResponse::Present => shared = true,
                SnoopResponse::PresentDirty(data) => {
                    shared = true;
                    provider = id;
                    block = data;
                }
            }
        }

        let delay = if provider == MEMORY_PROVIDER {
            block = mem.read_block(addr::block_base(req.addr));
            MEMORY_LATENCY
        } else {
            0
        };

        self.current = Some(Transaction {
            cmd: req.cmd,
            origin: req.origin,
            addr: req.addr,
            shared,
            provider,
            block,
            delay,
            index: 0,
            phase: TxPhase::Wait,
        });
        self.output = Some(BusOutput {
            cmd: req.cmd,
            origid: req.origin,
            addr: req.addr & WORD_ADDR_MASK,
            data: 0,
            shared,
        });
    }

    /// Resolves the flush output for this cycle. A waiting transaction
    /// whose latency has elapsed starts streaming in the same cycle it
    /// would otherwise sit silent.
    pub fn resolve_output(&mut self) {
        let Some(tx) = self.current.as_mut() else {
            return;
        };
        match tx.phase {
            TxPhase::Flush => {}
            TxPhase::Wait => {
                if tx.delay > 0 || self.output.is_some() {
                    return;
                }
                tx.phase = TxPhase::Flush;
                tx.index = 0;
            }
        }
        self.output = Some(BusOutput {
            cmd: BusCmd::Flush,
            origid: tx.provider,
            addr: addr::block_base(tx.addr) + tx.index as u32,
            data: tx.block[tx.index],
            shared: tx.shared,
        });
    }

    /// Advances the transaction: latency countdown or stream index. After
    /// the eighth flush beat the transaction completes.
    pub fn advance(&mut self, cores: &mut [Core; NUM_CORES], mem: &mut MainMemory) {
        let flushing = matches!(
            self.output,
            Some(BusOutput {
                cmd: BusCmd::Flush,
                ..
            })
        );
        let Some(tx) = self.current.as_mut() else {
            return;
        };
        match tx.phase {
            TxPhase::Wait => {
                if tx.delay > 0 {
                    tx.delay -= 1;
                }
            }
            TxPhase::Flush if flushing => {
                tx.index += 1;
                if tx.index >= BLOCK_WORDS {
                    let done = self.current.take().expect("flush completed without a transaction");
                    Self::complete(done, cores, mem);
                }
            }
            TxPhase::Flush => {}
        }
    }

    /// Applies transaction completion: memory gets the streamed block, the
    /// originator's line fills (evicting any dirty victim first), and the
    /// stalled MEM stage is released to retry.
    fn complete(tx: Transaction, cores: &mut [Core; NUM_CORES], mem: &mut MainMemory) {
        let base = addr::block_base(tx.addr);
        mem.write_block(base, &tx.block);

        let core = &mut cores[tx.origin];
        let new_state = match tx.cmd {
            BusCmd::Rd if tx.shared => MesiState::Shared,
            BusCmd::Rd => MesiState::Exclusive,
            _ => MesiState::Modified,
        };
        core.cache.fill(base, &tx.block, new_state, mem);

        if let Some(entry) = core.mem.as_mut() {
            entry.waiting = false;
        }
    }
}
