//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vle_isa::Category;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "vle")]
#[command(about = "PowerPC VLE disassembler and lifter for raw code images")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode and lift a range, then report per-mnemonic counts
    Count {
        #[command(flatten)]
        input: InputArgs,

        /// Number of mnemonics to list
        #[arg(long, default_value = "20")]
        top: usize,
    },
    /// Print a disassembly listing
    Dis {
        #[command(flatten)]
        input: InputArgs,

        /// Show raw encoding bytes
        #[arg(long)]
        bytes: bool,
    },
    /// Print the IR of each instruction
    Lift {
        #[command(flatten)]
        input: InputArgs,

        /// Only list instructions without a translation
        #[arg(long)]
        untranslated: bool,
    },
}

/// Image, range, and category selection shared by every command.
#[derive(Args)]
pub struct InputArgs {
    /// Raw code image
    #[arg(value_name = "IMAGE")]
    pub input: PathBuf,

    /// Optional categories, comma separated (e.g. "E,SP,LMV,E.PM")
    #[arg(short, long, default_value = "", value_parser = parse_categories)]
    pub categories: Category,

    /// File offset of the first instruction (hex)
    #[arg(long, default_value = "0", value_parser = parse_hex)]
    pub start: u64,

    /// Number of bytes to decode (hex, default: to end of file)
    #[arg(long, value_parser = parse_hex)]
    pub length: Option<u64>,

    /// Address of the first byte of the image (hex)
    #[arg(long, default_value = "0", value_parser = parse_hex)]
    pub address: u64,

    /// Use 64-bit effective addresses
    #[arg(long)]
    pub x64: bool,
}

impl InputArgs {
    /// Categories including the addressing mode selection.
    pub fn categories(&self) -> Category {
        if self.x64 {
            self.categories | Category::X64
        } else {
            self.categories
        }
    }
}

/// Parse a hex number, with or without `0x`.
pub fn parse_hex(s: &str) -> Result<u64, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
        .replace('_', "");
    u64::from_str_radix(&digits, 16).map_err(|e| format!("invalid hex number '{s}': {e}"))
}

fn parse_categories(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: vle_isa::BuildError| e.to_string())
}
