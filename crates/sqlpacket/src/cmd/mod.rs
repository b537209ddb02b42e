use clap::{Args, Subcommand};
use sqlpacket_builder::MAX_FRAGMENT_LEN;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build one packet from typed values and print its fragments.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Values to append, in order: u8:N u16:N u24:N u32:N u64:N lenenc:N
    /// str:TEXT lenenc-str:TEXT hex:HEX lenenc-hex:HEX fill:COUNT:BYTE.
    #[arg(value_name = "VALUE")]
    pub values: Vec<String>,
    /// Sequence number of the first fragment.
    #[arg(long, short = 's', default_value_t = 0)]
    pub seq: u8,
    /// Payload bytes per fragment before rolling over.
    #[arg(long, default_value_t = MAX_FRAGMENT_LEN)]
    pub max_fragment_len: usize,
    /// Refuse to grow the packet buffer past this many bytes.
    #[arg(long, env = "SQLPACKET_MAX_CAPACITY")]
    pub max_capacity: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
