pub mod model;

pub use model::{hex_dump, load_source, symbol_text, OutputFormat, SymbolFormat};
