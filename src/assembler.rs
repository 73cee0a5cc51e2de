//! Two-pass driver: pass one binds labels to addresses, pass two
//! re-parses every line and emits bytes.

use tracing::{debug, info, warn};

use crate::encoder::encode_line;
use crate::error::{AsmError, ErrorKind, Result};
use crate::listing::ListingLine;
use crate::parser::parse_line;
use crate::symbols::SymbolTable;

/// One past the highest addressable byte.
const ADDRESS_SPACE: u32 = 0x1_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    One,
    Two,
}

/// State threaded through both passes.
#[derive(Debug, Clone)]
pub struct AssemblyContext {
    pub lines: Vec<String>,
    /// 0-based index of the line being processed.
    pub line_idx: usize,
    pub pc: u32,
    pub symbols: SymbolTable,
    pub output: Vec<u8>,
    pub listing: Vec<ListingLine>,
}

impl AssemblyContext {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            line_idx: 0,
            pc: 0,
            symbols: SymbolTable::new(),
            output: Vec::new(),
            listing: Vec::new(),
        }
    }

    /// 1-based number of the current line.
    pub fn line_no(&self) -> usize {
        self.line_idx + 1
    }

    fn rewind(&mut self) {
        self.line_idx = 0;
        self.pc = 0;
    }

    fn addr(&self) -> Result<u16> {
        u16::try_from(self.pc).map_err(|_| AsmError::new(self.line_no(), ErrorKind::AddressOverflow))
    }
}

/// Result of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub bytes: Vec<u8>,
    pub symbols: SymbolTable,
    pub listing: Vec<ListingLine>,
}

pub struct Assembler {
    ctx: AssemblyContext,
}

impl Assembler {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ctx: AssemblyContext::new(lines.into_iter().map(Into::into).collect()),
        }
    }

    pub fn run(mut self) -> Result<Program> {
        for pass in [Pass::One, Pass::Two] {
            self.ctx.rewind();
            match pass {
                Pass::One => self.pass_one()?,
                Pass::Two => self.pass_two()?,
            }
        }
        let AssemblyContext {
            symbols,
            output,
            listing,
            ..
        } = self.ctx;
        Ok(Program {
            bytes: output,
            symbols,
            listing,
        })
    }

    fn pass_one(&mut self) -> Result<()> {
        let ctx = &mut self.ctx;
        while ctx.line_idx < ctx.lines.len() {
            let line = ctx.line_no();
            let parsed = parse_line(&ctx.lines[ctx.line_idx], line)?;
            if parsed.label.is_some() {
                let addr = ctx.addr()?;
                ctx.symbols.record(&parsed, addr, line)?;
            }
            ctx.pc += u32::from(parsed.size);
            if ctx.pc > ADDRESS_SPACE {
                return Err(AsmError::new(line, ErrorKind::AddressOverflow));
            }
            debug!(line, pc = ctx.pc, size = parsed.size, "sized");
            ctx.line_idx += 1;
        }
        info!(symbols = ctx.symbols.len(), bytes = ctx.pc, "pass 1 complete");
        Ok(())
    }

    fn pass_two(&mut self) -> Result<()> {
        let ctx = &mut self.ctx;
        while ctx.line_idx < ctx.lines.len() {
            let line = ctx.line_no();
            let source = &ctx.lines[ctx.line_idx];
            let parsed = parse_line(source, line)?;
            if parsed.mnemonic.is_none() {
                warn!(line, "no mnemonic on line, skipping");
                if parsed.label.is_some() {
                    let addr = ctx.addr()?;
                    ctx.listing.push(ListingLine::new(line, addr, Vec::new(), source));
                }
                ctx.line_idx += 1;
                continue;
            }
            let addr = ctx.addr()?;
            let bytes = encode_line(&parsed, &ctx.symbols, line)?;
            debug!(line, addr, bytes = ?bytes, "encoded");
            ctx.pc += bytes.len() as u32;
            ctx.output.extend_from_slice(&bytes);
            ctx.listing.push(ListingLine::new(line, addr, bytes, source));
            ctx.line_idx += 1;
        }
        info!(bytes = ctx.output.len(), "pass 2 complete");
        Ok(())
    }
}

/// Assembles source lines into a program with symbols and listing.
pub fn assemble_program<I, S>(lines: I) -> Result<Program>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Assembler::new(lines).run()
}

/// Assembles source lines into machine code.
pub fn assemble<I, S>(lines: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    assemble_program(lines).map(|p| p.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_reference_resolves() {
        let out = assemble(["JMP TARGET", "NOP", "TARGET: HLT"]).unwrap();
        assert_eq!(out, vec![0xC3, 0x04, 0x00, 0x00, 0x76]);
    }

    #[test]
    fn label_only_lines_take_no_space() {
        let p = assemble_program(["start:", "", "  NOP ; pad", "end: JMP start"]).unwrap();
        assert_eq!(p.symbols.get("start"), Some(0));
        assert_eq!(p.symbols.get("end"), Some(1));
        assert_eq!(p.bytes, vec![0x00, 0xC3, 0x00, 0x00]);
        assert_eq!(p.listing.len(), 3);
    }

    #[test]
    fn duplicate_label_stops_before_encoding() {
        // line 3 would fail encoding; the duplicate on line 4 must win
        let err = assemble(["a: NOP", "b: NOP", "MOV Q,B", "a: HLT"]).unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.kind, ErrorKind::DuplicateLabel("a".into()));
    }

    #[test]
    fn unknown_mnemonic_fails_in_first_pass() {
        let err = assemble(["NOP", "BOGUS", "JMP later"]).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ErrorKind::UnknownMnemonic("BOGUS".into()));
    }

    #[test]
    fn program_past_address_space_is_rejected() {
        let lines = vec!["LXI SP,0FFFFh"; 0x5556];
        let err = assemble(lines).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AddressOverflow);
        assert_eq!(err.line, 0x5556);
    }

    #[test]
    fn full_address_space_tolerates_trailing_blank_lines() {
        let mut lines = vec!["LXI SP,0FFFFh"; 0x5555];
        lines.push("NOP");
        lines.extend(["", "   ; end of image"]);
        let out = assemble(lines).unwrap();
        assert_eq!(out.len(), 0x1_0000);
        assert_eq!(out.last(), Some(&0x00));
    }

    #[test]
    fn context_resets_between_passes() {
        let mut ctx = AssemblyContext::new(vec!["NOP".into()]);
        ctx.line_idx = 3;
        ctx.pc = 9;
        ctx.rewind();
        assert_eq!((ctx.line_idx, ctx.pc, ctx.line_no()), (0, 0, 1));
    }
}
