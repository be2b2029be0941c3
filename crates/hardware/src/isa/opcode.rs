//! Opcode definitions.
//!
//! The instruction set carries eighteen defined operations plus HALT. Any
//! other encoding is kept as a catch-all that executes as an ALU operation
//! producing zero, so the machine never traps.

/// Instruction opcodes, numbered as they appear in the encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// rd = rs + rt.
    Add,
    /// rd = rs - rt.
    Sub,
    /// rd = rs & rt.
    And,
    /// rd = rs | rt.
    Or,
    /// rd = rs ^ rt.
    Xor,
    /// rd = low 32 bits of rs * rt (signed).
    Mul,
    /// rd = rs << rt\[4:0\].
    Sll,
    /// rd = rs >> rt\[4:0\], arithmetic.
    Sra,
    /// rd = rs >> rt\[4:0\], logical.
    Srl,
    /// Branch to the register selected by rd if rs == rt.
    Beq,
    /// Branch if rs != rt.
    Bne,
    /// Branch if rs < rt (signed).
    Blt,
    /// Branch if rs > rt (signed).
    Bgt,
    /// Branch if rs <= rt (signed).
    Ble,
    /// Branch if rs >= rt (signed).
    Bge,
    /// Unconditional jump to the register selected by rd; R15 = PC + 1.
    Jal,
    /// rd = mem\[rs + rt\].
    Lw,
    /// mem\[rs + rt\] = rd.
    Sw,
    /// Stop fetching; the core drains and halts.
    Halt,
    /// Undefined encoding; behaves as a zero-result ALU operation.
    Other(u8),
}

impl Opcode {
    /// Decodes the 8-bit opcode field.
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Opcode::Add,
            1 => Opcode::Sub,
            2 => Opcode::And,
            3 => Opcode::Or,
            4 => Opcode::Xor,
            5 => Opcode::Mul,
            6 => Opcode::Sll,
            7 => Opcode::Sra,
            8 => Opcode::Srl,
            9 => Opcode::Beq,
            10 => Opcode::Bne,
            11 => Opcode::Blt,
            12 => Opcode::Bgt,
            13 => Opcode::Ble,
            14 => Opcode::Bge,
            15 => Opcode::Jal,
            16 => Opcode::Lw,
            17 => Opcode::Sw,
            20 => Opcode::Halt,
            other => Opcode::Other(other),
        }
    }

    /// True for the six conditional branches.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bgt | Opcode::Ble | Opcode::Bge
        )
    }

    /// True for LW and SW, the only operations that touch the cache.
    pub fn is_mem(self) -> bool {
        matches!(self, Opcode::Lw | Opcode::Sw)
    }
}
