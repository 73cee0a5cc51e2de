use crate::number::Width;

/// Failure to read a numeric literal at a given width.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("empty numeric literal")]
    Empty,
    #[error("[{text}] is not a valid base-{radix} number")]
    InvalidDigit { text: String, radix: u32 },
    #[error("[{text}] does not fit in {width}")]
    OutOfRange { text: String, width: Width },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("label [{0}] is already present in symbol table")]
    DuplicateLabel(String),
    #[error("unrecognized mnemonic [{0}]")]
    UnknownMnemonic(String),
    #[error("mnemonic [{mnemonic}] expects a {slot} argument")]
    MissingOperand { mnemonic: String, slot: Slot },
    #[error("register [{0}] is not recognized")]
    UnknownRegister(String),
    #[error("register pair [{0}] is not recognized")]
    UnknownRegisterPair(String),
    #[error("RST expects a number 0-7, got [{0}]")]
    BadRestartVector(String),
    #[error("mnemonic [{mnemonic}] expects {expected} argument(s) but was passed {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("mnemonic [{mnemonic}] expects {expected} operand byte(s) but operand resolved to {found}")]
    OperandWidth {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("unrecognized symbol or operand [{0}]")]
    UnresolvedOperand(String),
    #[error("program does not fit in the 64 KiB address space")]
    AddressOverflow,
}

/// Which operand position a template field reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::First => f.write_str("first"),
            Slot::Second => f.write_str("second"),
        }
    }
}

/// A fatal assembly error tied to its 1-based source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("error on line {line}: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl AsmError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Self { line, kind }
    }
}

pub type Result<T> = std::result::Result<T, AsmError>;
