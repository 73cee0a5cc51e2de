use std::fmt::Write as _;

use serde::Serialize;

/// An assembled source line and where its bytes landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLine {
    pub line: usize,
    pub addr: u16,
    pub bytes: Vec<u8>,
    pub source: String,
}

impl ListingLine {
    pub fn new(line: usize, addr: u16, bytes: Vec<u8>, source: &str) -> Self {
        Self {
            line,
            addr,
            bytes,
            source: source.trim_end().to_string(),
        }
    }
}

pub fn fmt_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders `AAAA: BB BB BB  source`, one row per entry.
pub fn render_listing(lines: &[ListingLine]) -> String {
    let mut buf = String::new();
    for l in lines {
        let _ = writeln!(buf, "{:04X}: {:<8}  {}", l.addr, fmt_bytes(&l.bytes), l.source);
    }
    buf
}
