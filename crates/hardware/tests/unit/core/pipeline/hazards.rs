//! Hazard Interlock Tests.
//!
//! There is no forwarding: decode stalls while any of E, M, W holds a
//! writer of one of its sources, including the cycle the writer commits
//! from W. R0/R1 sources never stall.

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;

fn ib() -> InstructionBuilder {
    InstructionBuilder::new()
}

// ══════════════════════════════════════════════════════════
// 1. Back-to-back RAW dependency stalls three cycles
// ══════════════════════════════════════════════════════════

#[test]
fn raw_dependency_stalls_until_writeback_clears() {
    // 0: R2 = 1
    // 1: R3 = R2 + 2   (stalls while the writer is in E, M, W)
    // 2: HALT
    let mut tc = TestContext::new().load_program(
        0,
        &[
            ib().add(2, 0, 1, 1).build(),
            ib().add(3, 2, 1, 2).build(),
            ib().halt().build(),
        ],
    );
    tc.run_to_completion();

    assert_eq!(tc.reg(0, 3), 3, "R3 = R2 + 2 must read the committed R2");
    assert_eq!(tc.stats(0).decode_stall, 3, "one stall per occupied stage E, M, W");
}

// ══════════════════════════════════════════════════════════
// 2. Independent instructions do not stall
// ══════════════════════════════════════════════════════════

#[test]
fn independent_instructions_flow_freely() {
    let mut tc = TestContext::new().load_program(
        0,
        &[
            ib().add(2, 0, 1, 1).build(),
            ib().add(3, 0, 1, 2).build(),
            ib().add(4, 0, 1, 3).build(),
            ib().halt().build(),
        ],
    );
    tc.run_to_completion();

    assert_eq!(tc.reg(0, 2), 1);
    assert_eq!(tc.reg(0, 3), 2);
    assert_eq!(tc.reg(0, 4), 3);
    assert_eq!(tc.stats(0).decode_stall, 0);
    // Four instructions through a five-stage pipeline: 4 + 4 fill cycles.
    assert_eq!(tc.stats(0).cycles, 8);
}

// ══════════════════════════════════════════════════════════
// 3. R1 sources never stall (the immediate mirror is not a hazard)
// ══════════════════════════════════════════════════════════

#[test]
fn immediate_mirror_reads_do_not_stall() {
    // Every instruction reads R1; none of them can stall on it.
    let mut tc = TestContext::new().load_program(
        0,
        &[
            ib().add(2, 0, 1, 5).build(),
            ib().add(3, 0, 1, -1).build(),
            ib().halt().build(),
        ],
    );
    tc.run_to_completion();

    assert_eq!(tc.reg(0, 2), 5);
    assert_eq!(tc.reg(0, 3), 0xFFFF_FFFF, "negative immediate flows through R1");
    assert_eq!(tc.stats(0).decode_stall, 0);
}

// ══════════════════════════════════════════════════════════
// 4. Store data is a hazard source
// ══════════════════════════════════════════════════════════

#[test]
fn store_waits_for_its_data_register() {
    // 0: R2 = 0xAB
    // 1: SW R2 -> mem[4]  (reads R2 as data; must stall, not store stale 0)
    // 2: HALT
    let mut tc = TestContext::new().load_program(
        0,
        &[
            ib().add(2, 0, 1, 0xAB).build(),
            ib().sw(2, 0, 1, 4).build(),
            ib().halt().build(),
        ],
    );
    tc.run_to_completion();

    // The store completes into the cache (write-back: memory is stale
    // until the dirty line is flushed).
    let cache = &tc.sim().cores[0].cache;
    assert_eq!(cache.read_word(4), 0xAB);
    assert!(tc.stats(0).decode_stall > 0);
}

// ══════════════════════════════════════════════════════════
// 5. Undefined opcodes retire as zero-result ALU writes
// ══════════════════════════════════════════════════════════

#[test]
fn undefined_opcode_writes_zero() {
    // 0: R2 = 7
    // 1: opcode 18, rd = 2 (executes as "R2 = 0")
    // 2: HALT
    let mut tc = TestContext::new().load_program(
        0,
        &[
            ib().add(2, 0, 1, 7).build(),
            ib().opcode(18).rd(2).build(),
            ib().halt().build(),
        ],
    );
    tc.run_to_completion();

    assert_eq!(tc.reg(0, 2), 0);
    assert_eq!(tc.stats(0).instructions, 3);
}
