//! CSV output for decoded DBL logs.
//!
//! Sample values are emitted in physical units: each raw value is multiplied
//! by its channel's conversion factor and rendered in C-style `%.4E`
//! scientific notation. The first row carries the trimmed log title, the
//! second the trimmed channel comments.

use crate::types::DecodedLog;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing CSV output.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Formats a physical value like C's `%.4E`: four fractional digits and a
/// signed two-digit exponent, e.g. `2.0000E+01`.
///
/// Rust's `{:E}` writes bare exponents (`2.0000E1`), so the exponent is
/// re-rendered with an explicit sign and zero padding.
pub fn format_physical(value: f64) -> String {
    let rendered = format!("{:.4E}", value);
    let (mantissa, exponent) = match rendered.split_once('E') {
        Some(parts) => parts,
        None => return rendered,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.abs())
}

/// CSV writer for decoded logs.
pub struct CsvWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Creates a new CSV writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Writes the title row, the channel-comment row, and one row of
    /// physical values per sample row.
    pub fn write_log(&mut self, log: &DecodedLog) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", log.primary_header.trimmed_title())?;

        let comments: Vec<String> = log
            .channel_headers
            .iter()
            .map(|channel| channel.trimmed_comment())
            .collect();
        writeln!(self.writer, "{}", comments.join(","))?;

        let factors: Vec<f64> = log
            .channel_headers
            .iter()
            .map(|channel| f64::from(channel.physical_amount_cf))
            .collect();

        for row in log.samples.rows() {
            let cells: Vec<String> = row
                .iter()
                .zip(&factors)
                .map(|(&raw, &factor)| format_physical(f64::from(raw) * factor))
                .collect();
            writeln!(self.writer, "{}", cells.join(","))?;
        }
        Ok(())
    }

    /// Flushes the writer.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes a decoded log to a CSV file.
pub fn write_csv<P: AsRef<Path>>(path: P, log: &DecodedLog) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = CsvWriter::new(file);
    writer.write_log(log)?;
    writer.flush()?;
    Ok(())
}
