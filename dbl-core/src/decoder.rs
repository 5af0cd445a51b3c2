//! Sequential DBL stream decoder.
//!
//! Decoding is a single forward pass in fixed order: primary header, then
//! one channel header per channel, then the sample grid. The counts that
//! size the two variable sections come from the primary header itself, so
//! they are checked against allocation ceilings before any proportional
//! buffer is reserved. The first failing step aborts the whole decode; no
//! partial log is ever returned.

use crate::parser;
use crate::types::{
    ChannelHeader, DecodedLog, PrimaryHeader, SampleMatrix, CHANNEL_HEADER_LEN,
    PRIMARY_HEADER_LEN, SAMPLE_VALUE_LEN,
};
use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during DBL decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("truncated input in {section}: needed {expected} bytes, got {actual}")]
    TruncatedInput {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("malformed header: expected a {expected}-byte record, got {actual} bytes")]
    MalformedHeader { expected: usize, actual: usize },

    #[error("declared {field} = {value} exceeds the decoder limit of {limit}")]
    ResourceLimitExceeded {
        field: &'static str,
        value: u64,
        limit: u64,
    },
}

/// Default ceiling on the declared channel count.
pub const DEFAULT_MAX_CHANNELS: usize = 4096;

/// Default ceiling on the total sample values (rows times channels).
pub const DEFAULT_MAX_SAMPLE_VALUES: u64 = 1 << 28;

/// DBL decoder.
///
/// Holds the allocation ceilings applied to the counts read out of the
/// primary header. Those counts are producer-controlled, and a corrupt or
/// hostile header must not be able to trigger an unbounded allocation.
#[derive(Debug, Clone)]
pub struct DblDecoder {
    max_channels: usize,
    max_sample_values: u64,
}

impl Default for DblDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DblDecoder {
    /// Creates a decoder with the default ceilings.
    pub fn new() -> Self {
        Self {
            max_channels: DEFAULT_MAX_CHANNELS,
            max_sample_values: DEFAULT_MAX_SAMPLE_VALUES,
        }
    }

    /// Creates a decoder with custom allocation ceilings.
    pub fn with_limits(max_channels: usize, max_sample_values: u64) -> Self {
        Self {
            max_channels,
            max_sample_values,
        }
    }

    /// Reads and unpacks the 512-byte primary header.
    ///
    /// Field values are extracted as-is; nothing is validated against an
    /// expected tag.
    pub fn decode_primary_header<R: Read>(
        &self,
        reader: &mut R,
    ) -> Result<PrimaryHeader, DecodeError> {
        let mut buf = [0u8; PRIMARY_HEADER_LEN];
        read_exact_or_truncated(reader, &mut buf, "primary header")?;
        parser::parse_primary_header(&buf)
    }

    /// Reads `count` consecutive 96-byte channel headers.
    ///
    /// `count` comes from the primary header and is checked against the
    /// channel ceiling before the result vector is reserved.
    pub fn decode_channel_headers<R: Read>(
        &self,
        reader: &mut R,
        count: usize,
    ) -> Result<Vec<ChannelHeader>, DecodeError> {
        if count > self.max_channels {
            return Err(DecodeError::ResourceLimitExceeded {
                field: "channel_size",
                value: count as u64,
                limit: self.max_channels as u64,
            });
        }

        let mut headers = Vec::with_capacity(count);
        let mut buf = [0u8; CHANNEL_HEADER_LEN];
        for _ in 0..count {
            read_exact_or_truncated(reader, &mut buf, "channel header")?;
            headers.push(parser::parse_channel_header(&buf)?);
        }
        Ok(headers)
    }

    /// Reads `row_count` rows of `channel_count` little-endian u16 values.
    ///
    /// Rows are read incrementally, one row buffer at a time, so a header
    /// that promises more data than the stream holds fails with
    /// [`DecodeError::TruncatedInput`] instead of a giant up-front
    /// allocation. With zero channels a row occupies no bytes, so the
    /// section is empty and nothing is read.
    pub fn decode_samples<R: Read>(
        &self,
        reader: &mut R,
        channel_count: usize,
        row_count: usize,
    ) -> Result<SampleMatrix, DecodeError> {
        let mut samples = SampleMatrix::empty(channel_count);
        if channel_count == 0 {
            return Ok(samples);
        }

        let total_values = row_count as u64 * channel_count as u64;
        if total_values > self.max_sample_values {
            return Err(DecodeError::ResourceLimitExceeded {
                field: "data_size",
                value: total_values,
                limit: self.max_sample_values,
            });
        }

        let mut buf = vec![0u8; channel_count * SAMPLE_VALUE_LEN];
        let mut row = vec![0u16; channel_count];
        for _ in 0..row_count {
            read_exact_or_truncated(reader, &mut buf, "sample data")?;
            LittleEndian::read_u16_into(&buf, &mut row);
            samples.push_row(&row);
        }
        Ok(samples)
    }

    /// Decodes one complete DBL stream.
    ///
    /// `data_size` counts sample rows directly; it is not a grand total to
    /// be divided by the channel count.
    pub fn decode<R: Read>(&self, reader: &mut R) -> Result<DecodedLog, DecodeError> {
        let primary_header = self.decode_primary_header(reader)?;
        let channel_count = primary_header.channel_size as usize;
        let row_count = primary_header.data_size as usize;

        let channel_headers = self.decode_channel_headers(reader, channel_count)?;
        let samples = self.decode_samples(reader, channel_count, row_count)?;

        Ok(DecodedLog {
            primary_header,
            channel_headers,
            samples,
        })
    }

    /// Decodes a DBL file from disk.
    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> Result<DecodedLog, DecodeError> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        self.decode(&mut reader)
    }
}

/// Fills `buf` completely or reports how far the source got.
///
/// A short source is a [`DecodeError::TruncatedInput`], never a silently
/// shorter record.
fn read_exact_or_truncated<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    section: &'static str,
) -> Result<(), DecodeError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(DecodeError::TruncatedInput {
                    section,
                    expected: buf.len(),
                    actual: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
