//! The closed 8080 instruction table.
//!
//! Every opcode byte is described by a bit template read MSB first:
//! literal bits plus operand fields that the encoder fills in.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Zero,
    One,
    /// 3-bit register taken from the first operand.
    Dest,
    /// 3-bit register taken from the second operand.
    Src,
    /// 2-bit register pair taken from the first operand.
    Pair,
    /// 3-bit restart vector (0-7) taken from the first operand.
    Vector,
}

impl Field {
    pub const fn bits(self) -> usize {
        match self {
            Field::Zero | Field::One => 1,
            Field::Pair => 2,
            Field::Dest | Field::Src | Field::Vector => 3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    /// Opcode plus trailing operand bytes.
    pub size: u8,
    pub template: &'static [Field],
}

impl InstrDesc {
    pub fn template_bits(&self) -> usize {
        self.template.iter().map(|f| f.bits()).sum()
    }

    /// Number of bytes that follow the opcode.
    pub fn operand_bytes(&self) -> usize {
        usize::from(self.size) - 1
    }
}

macro_rules! tpl {
    (@f 0) => { Field::Zero };
    (@f 1) => { Field::One };
    (@f D) => { Field::Dest };
    (@f S) => { Field::Src };
    (@f R) => { Field::Pair };
    (@f N) => { Field::Vector };
    ($($t:tt)*) => { &[$(tpl!(@f $t)),*] };
}

const fn op(mnemonic: &'static str, size: u8, template: &'static [Field]) -> InstrDesc {
    InstrDesc { mnemonic, size, template }
}

pub const TABLE: &[InstrDesc] = &[
    // 1-byte, no operands
    op("NOP", 1, tpl![0 0 0 0 0 0 0 0]),
    op("HLT", 1, tpl![0 1 1 1 0 1 1 0]),
    op("RET", 1, tpl![1 1 0 0 1 0 0 1]),
    // register moves and ALU
    op("MOV", 1, tpl![0 1 D S]),
    op("ADD", 1, tpl![1 0 0 0 0 D]),
    op("ADC", 1, tpl![1 0 0 0 1 D]),
    op("SUB", 1, tpl![1 0 0 1 0 D]),
    op("SBB", 1, tpl![1 0 0 1 1 D]),
    op("ANA", 1, tpl![1 0 1 0 0 D]),
    op("XRA", 1, tpl![1 0 1 0 1 D]),
    op("ORA", 1, tpl![1 0 1 1 0 D]),
    op("CMP", 1, tpl![1 0 1 1 1 D]),
    op("INR", 1, tpl![0 0 D 1 0 0]),
    op("DCR", 1, tpl![0 0 D 1 0 1]),
    // register pairs
    op("INX", 1, tpl![0 0 R 0 0 1 1]),
    op("DCX", 1, tpl![0 0 R 1 0 1 1]),
    op("DAD", 1, tpl![0 0 R 1 0 0 1]),
    op("PUSH", 1, tpl![1 1 R 0 1 0 1]),
    op("POP", 1, tpl![1 1 R 0 0 0 1]),
    // rotate, accumulator and carry
    op("RLC", 1, tpl![0 0 0 0 0 1 1 1]),
    op("RRC", 1, tpl![0 0 0 0 1 1 1 1]),
    op("RAL", 1, tpl![0 0 0 1 0 1 1 1]),
    op("RAR", 1, tpl![0 0 0 1 1 1 1 1]),
    op("DAA", 1, tpl![0 0 1 0 0 1 1 1]),
    op("CMA", 1, tpl![0 0 1 0 1 1 1 1]),
    op("STC", 1, tpl![0 0 1 1 0 1 1 1]),
    op("CMC", 1, tpl![0 0 1 1 1 1 1 1]),
    // exchange
    op("XCHG", 1, tpl![1 1 1 0 1 0 1 1]),
    op("XTHL", 1, tpl![1 1 1 0 0 0 1 1]),
    op("SPHL", 1, tpl![1 1 1 1 1 0 0 1]),
    op("PCHL", 1, tpl![1 1 1 0 1 0 0 1]),
    // interrupts
    op("EI", 1, tpl![1 1 1 1 1 0 1 1]),
    op("DI", 1, tpl![1 1 1 1 0 0 1 1]),
    // conditional returns, 11ccc000
    op("RNZ", 1, tpl![1 1 0 0 0 0 0 0]),
    op("RZ", 1, tpl![1 1 0 0 1 0 0 0]),
    op("RNC", 1, tpl![1 1 0 1 0 0 0 0]),
    op("RC", 1, tpl![1 1 0 1 1 0 0 0]),
    op("RPO", 1, tpl![1 1 1 0 0 0 0 0]),
    op("RPE", 1, tpl![1 1 1 0 1 0 0 0]),
    op("RP", 1, tpl![1 1 1 1 0 0 0 0]),
    op("RM", 1, tpl![1 1 1 1 1 0 0 0]),
    op("RST", 1, tpl![1 1 N 1 1 1]),
    // 2-byte immediates and I/O
    op("MVI", 2, tpl![0 0 D 1 1 0]),
    op("ADI", 2, tpl![1 1 0 0 0 1 1 0]),
    op("ACI", 2, tpl![1 1 0 0 1 1 1 0]),
    op("SUI", 2, tpl![1 1 0 1 0 1 1 0]),
    op("SBI", 2, tpl![1 1 0 1 1 1 1 0]),
    op("ANI", 2, tpl![1 1 1 0 0 1 1 0]),
    op("XRI", 2, tpl![1 1 1 0 1 1 1 0]),
    op("ORI", 2, tpl![1 1 1 1 0 1 1 0]),
    op("CPI", 2, tpl![1 1 1 1 1 1 1 0]),
    op("IN", 2, tpl![1 1 0 1 1 0 1 1]),
    op("OUT", 2, tpl![1 1 0 1 0 0 1 1]),
    // 3-byte address and word immediates
    op("LXI", 3, tpl![0 0 R 0 0 0 1]),
    op("JMP", 3, tpl![1 1 0 0 0 0 1 1]),
    // conditional jumps, 11ccc010
    op("JNZ", 3, tpl![1 1 0 0 0 0 1 0]),
    op("JZ", 3, tpl![1 1 0 0 1 0 1 0]),
    op("JNC", 3, tpl![1 1 0 1 0 0 1 0]),
    op("JC", 3, tpl![1 1 0 1 1 0 1 0]),
    op("JPO", 3, tpl![1 1 1 0 0 0 1 0]),
    op("JPE", 3, tpl![1 1 1 0 1 0 1 0]),
    op("JP", 3, tpl![1 1 1 1 0 0 1 0]),
    op("JM", 3, tpl![1 1 1 1 1 0 1 0]),
    op("CALL", 3, tpl![1 1 0 0 1 1 0 1]),
    // conditional calls, 11ccc100
    op("CNZ", 3, tpl![1 1 0 0 0 1 0 0]),
    op("CZ", 3, tpl![1 1 0 0 1 1 0 0]),
    op("CNC", 3, tpl![1 1 0 1 0 1 0 0]),
    op("CC", 3, tpl![1 1 0 1 1 1 0 0]),
    op("CPO", 3, tpl![1 1 1 0 0 1 0 0]),
    op("CPE", 3, tpl![1 1 1 0 1 1 0 0]),
    op("CP", 3, tpl![1 1 1 1 0 1 0 0]),
    op("CM", 3, tpl![1 1 1 1 1 1 0 0]),
    // direct memory
    op("STA", 3, tpl![0 0 1 1 0 0 1 0]),
    op("LDA", 3, tpl![0 0 1 1 1 0 1 0]),
    op("SHLD", 3, tpl![0 0 1 0 0 0 1 0]),
    op("LHLD", 3, tpl![0 0 1 0 1 0 1 0]),
];

/// Looks up an already upper-cased mnemonic.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}
