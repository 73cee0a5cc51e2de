use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt::Write as _;
use std::path::Path;

use i8080_asm::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw machine code
    Bin,
    /// Address-prefixed hex rows
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SymbolFormat {
    Text,
    Json,
}

/// Reads a source file as a list of lines.
pub fn load_source(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("{} could not be opened", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Sixteen bytes per row, each row prefixed with its address.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut buf = String::new();
    for (i, row) in bytes.chunks(16).enumerate() {
        let _ = write!(buf, "{:04X}:", i * 16);
        for b in row {
            let _ = write!(buf, " {b:02X}");
        }
        buf.push('\n');
    }
    buf
}

pub fn symbol_text(symbols: &[Symbol], format: SymbolFormat) -> Result<String> {
    match format {
        SymbolFormat::Json => Ok(serde_json::to_string_pretty(symbols)?),
        SymbolFormat::Text => {
            let mut buf = String::new();
            for s in symbols {
                let _ = writeln!(buf, "{} = {:#06x}", s.name, s.addr);
            }
            Ok(buf)
        }
    }
}
