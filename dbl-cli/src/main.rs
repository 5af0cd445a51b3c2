//! DBL decoder CLI application.
//!
//! Decodes a DBL measurement log from a file or standard input and writes
//! the physical-unit CSV rendition to standard output.

use anyhow::{Context, Result};
use clap::Parser;
use dbl_core::{CsvWriter, DblDecoder, DecodedLog};
use std::io;
use std::path::PathBuf;

/// DBL measurement-log decoder.
///
/// Reads one DBL-format log and prints it as CSV: a title row, a
/// channel-comment row, then one row of physical-unit values per sample.
#[derive(Parser, Debug)]
#[command(name = "catdbl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input DBL file path; reads standard input when omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let decoder = DblDecoder::new();

    let log: DecodedLog = match &args.input {
        Some(path) => decoder
            .decode_file(path)
            .with_context(|| format!("Failed to decode {}", path.display()))?,
        None => decoder
            .decode(&mut io::stdin().lock())
            .context("Failed to decode standard input")?,
    };

    let stdout = io::stdout();
    let mut writer = CsvWriter::new(stdout.lock());
    writer.write_log(&log).context("Failed to write CSV output")?;
    writer.flush().context("Failed to flush CSV output")?;

    Ok(())
}
