//! Flat main memory.
//!
//! One megaword of backing store shared by all four caches. Only the bus
//! engine touches it during simulation: block reads on a miss and block
//! writes at flush completion and dirty-line eviction.

use crate::common::constants::{BLOCK_WORDS, MAIN_MEM_WORDS, WORD_ADDR_MASK};

/// Main memory as a flat word array. Addresses wrap at 2^20 words.
pub struct MainMemory {
    words: Vec<u32>,
}

impl Default for MainMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMemory {
    /// Allocates zeroed memory.
    pub fn new() -> Self {
        Self {
            words: vec![0; MAIN_MEM_WORDS],
        }
    }

    /// Builds memory from a loaded image; short images are zero-padded and
    /// long ones truncated.
    pub fn from_words(mut image: Vec<u32>) -> Self {
        image.resize(MAIN_MEM_WORDS, 0);
        Self { words: image }
    }

    /// Reads one word.
    pub fn read(&self, addr: u32) -> u32 {
        self.words[(addr & WORD_ADDR_MASK) as usize]
    }

    /// Writes one word.
    pub fn write(&mut self, addr: u32, value: u32) {
        self.words[(addr & WORD_ADDR_MASK) as usize] = value;
    }

    /// Reads the 8-word block starting at `base`.
    pub fn read_block(&self, base: u32) -> [u32; BLOCK_WORDS] {
        let mut block = [0u32; BLOCK_WORDS];
        for (i, word) in block.iter_mut().enumerate() {
            *word = self.read(base.wrapping_add(i as u32));
        }
        block
    }

    /// Writes an 8-word block starting at `base`.
    pub fn write_block(&mut self, base: u32, block: &[u32; BLOCK_WORDS]) {
        for (i, word) in block.iter().enumerate() {
            self.write(base.wrapping_add(i as u32), *word);
        }
    }

    /// Whole contents, for the memout dump.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}
