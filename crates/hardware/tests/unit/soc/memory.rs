//! Main Memory Tests.

use mesisim_core::common::constants::MAIN_MEM_WORDS;
use mesisim_core::soc::memory::MainMemory;

#[test]
fn words_default_to_zero() {
    let mem = MainMemory::new();
    assert_eq!(mem.read(0), 0);
    assert_eq!(mem.read((MAIN_MEM_WORDS - 1) as u32), 0);
}

#[test]
fn short_images_are_zero_padded() {
    let mem = MainMemory::from_words(vec![1, 2, 3]);
    assert_eq!(mem.read(0), 1);
    assert_eq!(mem.read(2), 3);
    assert_eq!(mem.read(3), 0);
    assert_eq!(mem.words().len(), MAIN_MEM_WORDS);
}

#[test]
fn addresses_wrap_at_the_word_space() {
    let mut mem = MainMemory::new();
    mem.write(MAIN_MEM_WORDS as u32 + 5, 77);
    assert_eq!(mem.read(5), 77);
}

#[test]
fn block_round_trip() {
    let mut mem = MainMemory::new();
    let block = [1, 2, 3, 4, 5, 6, 7, 8];
    mem.write_block(0x40, &block);
    assert_eq!(mem.read_block(0x40), block);
    assert_eq!(mem.read(0x47), 8);
}
