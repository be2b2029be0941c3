//! Direct-mapped write-back MESI cache.
//!
//! Each core owns one. The data array holds 512 words as 64 lines of 8
//! words; a parallel tag/state array tracks the MESI state per line. The
//! owning core's MEM stage probes and updates it on hits; the bus engine
//! mutates it during snoops and fills. The per-cycle ordering keeps those
//! two writers apart.

use crate::common::addr;
use crate::common::constants::{BLOCK_WORDS, CACHE_LINES, CACHE_WORDS, TAG_MASK};
use crate::soc::bus::BusCmd;
use crate::soc::memory::MainMemory;

/// MESI coherence states. The numeric values appear in the TSRAM dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MesiState {
    /// Line holds no valid data.
    Invalid = 0,
    /// Clean copy, possibly replicated in other caches.
    Shared = 1,
    /// Clean copy, no other cache holds the line.
    Exclusive = 2,
    /// Dirty copy, no other cache holds the line; memory is stale.
    Modified = 3,
}

/// A peer cache's answer to a snoop probe.
pub enum SnoopResponse {
    /// Line not present; the shared signal is unaffected.
    Miss,
    /// Line present and clean; asserts the shared signal.
    Present,
    /// Line present and dirty; asserts shared and sources the block.
    PresentDirty([u32; BLOCK_WORDS]),
}

/// Direct-mapped cache: data SRAM plus tag/state SRAM.
#[derive(Clone)]
pub struct Cache {
    data: [u32; CACHE_WORDS],
    tags: [u16; CACHE_LINES],
    states: [MesiState; CACHE_LINES],
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    /// Creates a cache with every line invalid.
    pub fn new() -> Self {
        Self {
            data: [0; CACHE_WORDS],
            tags: [0; CACHE_LINES],
            states: [MesiState::Invalid; CACHE_LINES],
        }
    }

    /// Tag/state probe. Returns the line state on a hit, `None` otherwise.
    pub fn lookup(&self, addr: u32) -> Option<MesiState> {
        let index = addr::line_index(addr);
        let state = self.states[index];
        if state != MesiState::Invalid && u32::from(self.tags[index]) == addr::tag_of(addr) {
            Some(state)
        } else {
            None
        }
    }

    /// Reads one word from the data array. The caller has established a hit.
    pub fn read_word(&self, addr: u32) -> u32 {
        self.data[addr::line_index(addr) * BLOCK_WORDS + addr::block_offset(addr)]
    }

    /// Writes one word into the data array. The caller has established a hit.
    pub fn write_word(&mut self, addr: u32, value: u32) {
        self.data[addr::line_index(addr) * BLOCK_WORDS + addr::block_offset(addr)] = value;
    }

    /// State of the line at `index`.
    pub fn state(&self, index: usize) -> MesiState {
        self.states[index]
    }

    /// Overwrites the state of the line at `index`.
    pub fn set_state(&mut self, index: usize, state: MesiState) {
        self.states[index] = state;
    }

    /// Copies out the 8-word block stored at `index`.
    pub fn line_block(&self, index: usize) -> [u32; BLOCK_WORDS] {
        let base = index * BLOCK_WORDS;
        let mut block = [0u32; BLOCK_WORDS];
        block.copy_from_slice(&self.data[base..base + BLOCK_WORDS]);
        block
    }

    /// Writes a dirty line back to main memory; no-op unless the line is M.
    fn write_back_line(&self, index: usize, mem: &mut MainMemory) {
        if self.states[index] != MesiState::Modified {
            return;
        }
        let base = addr::line_base(u32::from(self.tags[index]), index);
        mem.write_block(base, &self.line_block(index));
    }

    /// Evicts the victim line (writing it back if dirty) and installs the
    /// block containing `addr` with the given state.
    pub fn fill(
        &mut self,
        addr: u32,
        block: &[u32; BLOCK_WORDS],
        new_state: MesiState,
        mem: &mut MainMemory,
    ) {
        let index = addr::line_index(addr);
        self.write_back_line(index, mem);
        self.data[index * BLOCK_WORDS..(index + 1) * BLOCK_WORDS].copy_from_slice(block);
        self.tags[index] = (addr::tag_of(addr) & TAG_MASK) as u16;
        self.states[index] = new_state;
    }

    /// Reacts to a peer's bus transaction.
    ///
    /// M lines source the block and demote (RD) or invalidate (RDX); E
    /// lines demote or invalidate without sourcing; S lines invalidate on
    /// RDX only. Memory is brought up to date later, at flush completion.
    pub fn snoop(&mut self, cmd: BusCmd, addr: u32) -> SnoopResponse {
        let index = addr::line_index(addr);
        let state = self.states[index];
        if state == MesiState::Invalid || u32::from(self.tags[index]) != addr::tag_of(addr) {
            return SnoopResponse::Miss;
        }
        match state {
            MesiState::Modified => {
                let block = self.line_block(index);
                self.states[index] = match cmd {
                    BusCmd::Rd => MesiState::Shared,
                    _ => MesiState::Invalid,
                };
                SnoopResponse::PresentDirty(block)
            }
            MesiState::Exclusive => {
                self.states[index] = match cmd {
                    BusCmd::Rd => MesiState::Shared,
                    _ => MesiState::Invalid,
                };
                SnoopResponse::Present
            }
            MesiState::Shared => {
                if cmd == BusCmd::Rdx {
                    self.states[index] = MesiState::Invalid;
                }
                SnoopResponse::Present
            }
            MesiState::Invalid => SnoopResponse::Miss,
        }
    }

    /// Data SRAM contents, for the dsram dump.
    pub fn data_words(&self) -> &[u32; CACHE_WORDS] {
        &self.data
    }

    /// Tag SRAM contents encoded for the tsram dump: `(state << 12) | tag`.
    pub fn tsram_words(&self) -> [u32; CACHE_LINES] {
        let mut words = [0u32; CACHE_LINES];
        for (i, word) in words.iter_mut().enumerate() {
            *word = ((self.states[i] as u32) << 12) | (u32::from(self.tags[i]) & 0xFFF);
        }
        words
    }
}
