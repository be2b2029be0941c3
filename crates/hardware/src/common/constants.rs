//! Architectural constants for the quad-core system.
//!
//! These values are fixed by the hardware being modelled and are shared by
//! every component: core count, memory geometry, cache geometry, and the
//! bus timing parameters.

/// Number of cores sharing the snooping bus.
pub const NUM_CORES: usize = 4;

/// Architectural registers per core (R0..R15).
pub const REG_COUNT: usize = 16;

/// Instruction memory size in words; the PC wraps at this boundary.
pub const IMEM_WORDS: usize = 1024;

/// Main memory size in words (20-bit word address space).
pub const MAIN_MEM_WORDS: usize = 1 << 20;

/// Cache data array size in words.
pub const CACHE_WORDS: usize = 512;

/// Number of cache lines (direct mapped).
pub const CACHE_LINES: usize = 64;

/// Words per block, the unit of coherence and bus transfer.
pub const BLOCK_WORDS: usize = 8;

/// Word-address bits selecting the word within a block.
pub const OFFSET_BITS: u32 = 3;

/// Word-address bits selecting the cache line.
pub const INDEX_BITS: u32 = 6;

/// Word-address bits forming the tag.
pub const TAG_BITS: u32 = 20 - OFFSET_BITS - INDEX_BITS;

/// Mask for the block-offset field of a word address.
pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;

/// Mask for the line-index field of a word address.
pub const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Mask for the tag field of a word address.
pub const TAG_MASK: u32 = (1 << TAG_BITS) - 1;

/// Mask truncating an address to the 20-bit word address space.
pub const WORD_ADDR_MASK: u32 = (MAIN_MEM_WORDS - 1) as u32;

/// Mask truncating a program counter to instruction memory.
pub const PC_MASK: u32 = (IMEM_WORDS - 1) as u32;

/// Cycles a bus transaction waits for main memory before the flush begins.
pub const MEMORY_LATENCY: u32 = 16;
