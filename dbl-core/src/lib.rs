//! DBL measurement-log decoder library.
//!
//! This crate decodes the fixed-layout binary log format written by a
//! data-acquisition instrument: a 512-byte primary header, one 96-byte
//! calibration header per channel, then an interleaved grid of raw 16-bit
//! samples sized by the counts in the primary header. Decoded logs can be
//! re-emitted as CSV with sample values converted to physical units.
//!
//! # Example
//!
//! ```no_run
//! use dbl_core::DblDecoder;
//!
//! let decoder = DblDecoder::new();
//! let log = decoder.decode_file("measurement.dbl").unwrap();
//!
//! println!("{}", log.primary_header.trimmed_title());
//! println!(
//!     "{} channels, {} sample rows",
//!     log.channel_headers.len(),
//!     log.samples.row_count()
//! );
//! ```

pub mod decoder;
pub mod output;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use decoder::{DblDecoder, DecodeError};
pub use output::{CsvWriter, OutputError};
pub use types::{ChannelHeader, DecodedLog, PrimaryHeader, SampleMatrix};
