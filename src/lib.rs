pub mod assembler;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod listing;
pub mod number;
pub mod parser;
pub mod registers;
pub mod symbols;

pub use assembler::{assemble, assemble_program, Assembler, AssemblyContext, Program};
pub use error::{AsmError, ErrorKind, NumberError};
pub use symbols::{Symbol, SymbolTable};
