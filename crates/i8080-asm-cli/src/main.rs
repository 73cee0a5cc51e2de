use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use i8080_asm::assemble_program;
use i8080_asm::listing::render_listing;
use i8080_asm_cli::{hex_dump, load_source, symbol_text, OutputFormat, SymbolFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-pass Intel 8080 assembler", long_about = None)]
struct Cli {
    /// Input assembly file (one instruction per line)
    #[arg(value_name = "SOURCE")]
    input: PathBuf,
    /// Log each pass at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble to machine code
    Build {
        /// Output file; hex output goes to stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Bin)]
        format: OutputFormat,
    },
    /// Print address, bytes and source for each line
    Listing {
        /// Write listing to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the symbol table
    Symbols {
        #[arg(long, value_enum, default_value_t = SymbolFormat::Text)]
        format: SymbolFormat,
        /// Write symbols to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn emit(text: String, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => std::fs::write(&path, text)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn check_build_target(format: OutputFormat, output: Option<&PathBuf>) -> Result<()> {
    anyhow::ensure!(
        output.is_some() || format == OutputFormat::Hex,
        "binary output needs --output; use --format hex for stdout"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let lines = load_source(&cli.input)?;
    let program = assemble_program(lines)?;

    match cli.cmd {
        Command::Build { output, format } => {
            check_build_target(format, output.as_ref())?;
            match (format, output) {
                (OutputFormat::Bin, Some(path)) => {
                    std::fs::write(&path, &program.bytes)
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(bytes = program.bytes.len(), path = %path.display(), "wrote binary");
                }
                (_, out) => emit(hex_dump(&program.bytes), out)?,
            }
        }
        Command::Listing { out } => emit(render_listing(&program.listing), out)?,
        Command::Symbols { format, out } => {
            emit(symbol_text(&program.symbols.symbols(), format)?, out)?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_build_flags() {
        let cli = Cli::parse_from(["i8080asm", "prog.asm", "build", "-o", "prog.bin"]);
        assert_eq!(cli.input, PathBuf::from("prog.asm"));
        assert!(matches!(
            cli.cmd,
            Command::Build { format: OutputFormat::Bin, output: Some(_) }
        ));
    }

    #[test]
    fn cli_parses_symbol_format() {
        let cli = Cli::parse_from(["i8080asm", "-v", "prog.asm", "symbols", "--format", "json"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.cmd,
            Command::Symbols { format: SymbolFormat::Json, out: None }
        ));
    }

    #[test]
    fn binary_build_requires_output_file() {
        let err = check_build_target(OutputFormat::Bin, None).unwrap_err();
        assert!(err.to_string().contains("--output"));
        assert!(check_build_target(OutputFormat::Hex, None).is_ok());
        assert!(check_build_target(OutputFormat::Bin, Some(&PathBuf::from("a.bin"))).is_ok());
    }

    #[test]
    fn assembly_errors_pass_through_anyhow() {
        let res: Result<_> = assemble_program(["RST 9"]).map_err(anyhow::Error::from);
        let msg = res.unwrap_err().to_string();
        assert_eq!(msg, "error on line 1: RST expects a number 0-7, got [9]");
    }
}
