use crate::error::{AsmError, ErrorKind, Result, Slot};
use crate::instructions::{self, InstrDesc};

/// One source line split into its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub label: Option<String>,
    /// Upper-cased.
    pub mnemonic: Option<String>,
    pub operand1: Option<String>,
    pub operand2: Option<String>,
    /// Total bytes the line assembles to; 0 for blank or label-only lines.
    pub size: u8,
}

impl ParsedLine {
    pub fn operand(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::First => self.operand1.as_deref(),
            Slot::Second => self.operand2.as_deref(),
        }
    }

    pub fn operand_count(&self) -> usize {
        usize::from(self.operand1.is_some()) + usize::from(self.operand2.is_some())
    }

    /// Table entry for the mnemonic, if the line has one.
    pub fn instr(&self) -> Option<&'static InstrDesc> {
        self.mnemonic.as_deref().and_then(instructions::lookup)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Parses `raw`; `line` is the 1-based line number used in errors.
pub fn parse_line(raw: &str, line: usize) -> Result<ParsedLine> {
    let mut rest = match raw.find(';') {
        Some(p) => &raw[..p],
        None => raw,
    };

    let mut label = None;
    if let Some((head, tail)) = rest.split_once(':') {
        label = non_empty(head);
        rest = tail;
    }

    rest = rest.trim_start();
    let (mnemonic, tail) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    let mnemonic = non_empty(mnemonic).map(|m| m.to_ascii_uppercase());

    let tail = tail.trim_start();
    let (operand1, operand2) = match tail.split_once(',') {
        Some((a, b)) => (non_empty(a), non_empty(b)),
        None => (non_empty(tail), None),
    };

    let size = match &mnemonic {
        None => 0,
        Some(m) => {
            instructions::lookup(m)
                .ok_or_else(|| AsmError::new(line, ErrorKind::UnknownMnemonic(m.clone())))?
                .size
        }
    };

    Ok(ParsedLine {
        label,
        mnemonic,
        operand1,
        operand2,
        size,
    })
}
