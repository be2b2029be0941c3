//! Result-File Format Tests.
//!
//! Uppercase zero-padded hex, one word per line; the memory dump drops
//! trailing zero words; stats files carry eight `name value` lines.

use std::fs;
use tempfile::tempdir;

use mesisim_core::core::arch::RegFile;
use mesisim_core::sim::output::{write_regout, write_stats, write_trimmed_words, write_words};
use mesisim_core::stats::CoreStats;

#[test]
fn words_dump_as_uppercase_hex() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.txt");
    let path = path.to_str().unwrap();

    write_words(path, &[0xDEAD_BEEF, 0, 0x1A]).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "DEADBEEF\n00000000\n0000001A\n");
}

#[test]
fn trimmed_dump_drops_trailing_zeros_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mem.txt");
    let path = path.to_str().unwrap();

    write_trimmed_words(path, &[0, 5, 0, 0]).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "00000000\n00000005\n");
}

#[test]
fn all_zero_memory_dumps_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mem.txt");
    let path = path.to_str().unwrap();

    write_trimmed_words(path, &[0; 64]).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "");
}

#[test]
fn regout_covers_r2_through_r15() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("regout.txt");
    let path = path.to_str().unwrap();

    let mut regs = RegFile::new();
    regs.write(2, 0xAB);
    regs.write(15, 0xCD);
    write_regout(path, &regs).unwrap();

    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 14);
    assert_eq!(lines[0], "000000AB");
    assert_eq!(lines[13], "000000CD");
}

#[test]
fn stats_file_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.txt");
    let path = path.to_str().unwrap();

    let stats = CoreStats {
        cycles: 30,
        instructions: 2,
        read_hit: 0,
        write_hit: 0,
        read_miss: 1,
        write_miss: 0,
        decode_stall: 0,
        mem_stall: 24,
    };
    write_stats(path, &stats).unwrap();

    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "cycles 30\ninstructions 2\nread_hit 0\nwrite_hit 0\nread_miss 1\nwrite_miss 0\ndecode_stall 0\nmem_stall 24\n"
    );
}
