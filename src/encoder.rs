//! Second pass: opcode template filling and operand byte emission.

use bitflags::bitflags;
use bitvec::prelude::*;

use crate::error::{AsmError, ErrorKind, Result, Slot};
use crate::instructions::{Field, InstrDesc};
use crate::number::{self, Width};
use crate::parser::ParsedLine;
use crate::registers::{RegPair, Register};
use crate::symbols::SymbolTable;

bitflags! {
/// Operand slots used up by template fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumed: u8 {
const FIRST = 1 << 0;
const SECOND = 1 << 1;
}
}

impl Consumed {
    fn slot(slot: Slot) -> Self {
        match slot {
            Slot::First => Consumed::FIRST,
            Slot::Second => Consumed::SECOND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub byte: u8,
    pub consumed: Consumed,
}

const MAX_VECTOR: u8 = 7;

struct Filler<'a> {
    parsed: &'a ParsedLine,
    mnemonic: &'a str,
    line: usize,
    consumed: Consumed,
}

impl<'a> Filler<'a> {
    fn err(&self, kind: ErrorKind) -> AsmError {
        AsmError::new(self.line, kind)
    }

    fn take(&mut self, slot: Slot) -> Result<&'a str> {
        let parsed: &'a ParsedLine = self.parsed;
        let text = parsed.operand(slot).ok_or_else(|| {
            self.err(ErrorKind::MissingOperand {
                mnemonic: self.mnemonic.to_string(),
                slot,
            })
        })?;
        self.consumed |= Consumed::slot(slot);
        Ok(text)
    }

    fn register(&mut self, slot: Slot) -> Result<u8> {
        let text = self.take(slot)?;
        Register::from_name(text)
            .map(Register::code)
            .ok_or_else(|| self.err(ErrorKind::UnknownRegister(text.to_string())))
    }

    fn pair(&mut self) -> Result<u8> {
        let text = self.take(Slot::First)?;
        RegPair::from_name(text)
            .map(RegPair::code)
            .ok_or_else(|| self.err(ErrorKind::UnknownRegisterPair(text.to_string())))
    }

    fn vector(&mut self) -> Result<u8> {
        let text = self.take(Slot::First)?;
        match number::parse(text, Width::Byte) {
            Ok(n) if n <= u16::from(MAX_VECTOR) => Ok(n as u8),
            _ => Err(self.err(ErrorKind::BadRestartVector(text.to_string()))),
        }
    }
}

/// Folds the instruction template into an opcode byte, MSB first.
pub fn build_opcode(parsed: &ParsedLine, desc: &InstrDesc, line: usize) -> Result<Opcode> {
    let mut f = Filler {
        parsed,
        mnemonic: desc.mnemonic,
        line,
        consumed: Consumed::empty(),
    };
    let mut bits = BitArray::<u8, Msb0>::new(0);
    let mut cursor = 0;
    for &field in desc.template {
        let value = match field {
            Field::Zero => 0,
            Field::One => 1,
            Field::Dest => f.register(Slot::First)?,
            Field::Src => f.register(Slot::Second)?,
            Field::Pair => f.pair()?,
            Field::Vector => f.vector()?,
        };
        let width = field.bits();
        bits[cursor..cursor + width].store_be(value);
        cursor += width;
    }
    debug_assert_eq!(cursor, 8, "{} template is not one byte", desc.mnemonic);
    Ok(Opcode {
        byte: bits.into_inner(),
        consumed: f.consumed,
    })
}

/// Trailing bytes for a leftover operand: a symbol always yields its full
/// 16-bit address; literals take the narrowest width they fit.
fn operand_bytes(text: &str, symbols: &SymbolTable) -> Option<Vec<u8>> {
    if let Some(addr) = symbols.get(text) {
        return Some(addr.to_le_bytes().to_vec());
    }
    if let Ok(v) = number::parse(text, Width::Byte) {
        return Some(vec![v as u8]);
    }
    number::parse(text, Width::Word)
        .ok()
        .map(|v| v.to_le_bytes().to_vec())
}

/// Encodes one instruction line into its opcode and operand bytes.
pub fn encode_line(parsed: &ParsedLine, symbols: &SymbolTable, line: usize) -> Result<Vec<u8>> {
    let desc = parsed.instr().ok_or_else(|| {
        let mnemonic = parsed.mnemonic.clone().unwrap_or_default();
        AsmError::new(line, ErrorKind::UnknownMnemonic(mnemonic))
    })?;
    let opcode = build_opcode(parsed, desc, line)?;

    let leftover: Vec<&str> = [Slot::First, Slot::Second]
        .into_iter()
        .filter(|&s| !opcode.consumed.contains(Consumed::slot(s)))
        .filter_map(|s| parsed.operand(s))
        .collect();
    let expected = usize::from(desc.size > 1);
    if leftover.len() != expected {
        return Err(AsmError::new(
            line,
            ErrorKind::OperandCount {
                mnemonic: desc.mnemonic.to_string(),
                expected,
                found: leftover.len(),
            },
        ));
    }

    let mut bytes = vec![opcode.byte];
    if let Some(&text) = leftover.first() {
        let tail = operand_bytes(text, symbols)
            .ok_or_else(|| AsmError::new(line, ErrorKind::UnresolvedOperand(text.to_string())))?;
        bytes.extend(tail);
    }

    let found = bytes.len() - 1;
    if found != desc.operand_bytes() {
        return Err(AsmError::new(
            line,
            ErrorKind::OperandWidth {
                mnemonic: desc.mnemonic.to_string(),
                expected: desc.operand_bytes(),
                found,
            },
        ));
    }
    Ok(bytes)
}
