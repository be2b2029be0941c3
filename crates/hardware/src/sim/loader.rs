//! Hex image loading.
//!
//! Instruction and memory images are text files with one hex word per
//! line; missing lines read as zero. A missing or unreadable input file
//! aborts the process with a message on standard error.

use std::fs;
use std::process;

/// Loads a hex image from disk, keeping at most `limit` words.
///
/// Exits the process with an error message if the file cannot be read.
pub fn load_hex_image(path: &str, limit: usize) -> Vec<u32> {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("failed to open {}: {}", path, e);
        process::exit(1);
    });
    parse_hex_image(&text, limit)
}

/// Parses a hex image: the leading field of each line is taken as a hex
/// word, unparsable lines read as zero.
pub fn parse_hex_image(text: &str, limit: usize) -> Vec<u32> {
    text.lines().take(limit).map(parse_word).collect()
}

fn parse_word(line: &str) -> u32 {
    line.split_whitespace()
        .next()
        .map_or(0, |token| u32::from_str_radix(token, 16).unwrap_or(0))
}
