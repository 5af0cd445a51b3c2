//! Core types for decoded DBL measurement logs.
//!
//! A DBL file carries a 512-byte primary header, one 96-byte channel header
//! per channel, and an interleaved grid of raw 16-bit sample values. Text
//! fields are fixed-width and NUL/space padded; their raw bytes are kept
//! verbatim so headers re-encode byte-for-byte, with trimmed accessors for
//! display.

/// Byte length of the primary header record.
pub const PRIMARY_HEADER_LEN: usize = 512;

/// Byte length of one channel header record.
pub const CHANNEL_HEADER_LEN: usize = 96;

/// Byte length of one raw sample value.
pub const SAMPLE_VALUE_LEN: usize = 2;

/// The file-wide header at the start of every DBL log.
///
/// All numeric fields are little-endian; the record is packed with no
/// padding. `channel_size` and `data_size` govern the lengths of the two
/// sections that follow.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryHeader {
    /// File type tag. Not validated against an expected value; the producer
    /// is trusted.
    pub filetype: [u8; 14],
    pub start_attr: [u8; 2],
    /// Log title, padded text.
    pub title: [u8; 32],
    /// Recording start time, padded text.
    pub start_time: [u8; 48],
    pub unused: [u8; 16],
    /// Number of sample rows (samples per channel).
    pub data_size: u32,
    pub spare: u16,
    /// Number of channels.
    pub channel_size: u16,
    /// Sampling frequency code.
    pub sampling_freq: u16,
    /// Sampling interval in seconds.
    pub sampling_time: f32,
    pub lag: u16,
    /// Reserved trailing block.
    pub system: [u8; 384],
}

impl PrimaryHeader {
    /// Returns the title with trailing padding removed.
    pub fn trimmed_title(&self) -> String {
        trim_text(&self.title)
    }

    /// Returns the start time with trailing padding removed.
    pub fn trimmed_start_time(&self) -> String {
        trim_text(&self.start_time)
    }
}

/// Per-channel calibration metadata, one 96-byte record per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHeader {
    /// Channel description, padded text.
    pub channel_comment: [u8; 32],
    /// Physical unit name, padded text.
    pub unit: [u8; 8],
    pub full_scale: f32,
    pub calibration: u32,
    /// Multiplier converting a raw sample value into physical units.
    pub physical_amount_cf: f32,
    pub unused: u32,
    pub zero_offset: u32,
    pub max: u32,
    pub min: u32,
    pub spare: [u8; 28],
}

impl ChannelHeader {
    /// Returns the channel comment with trailing padding removed.
    pub fn trimmed_comment(&self) -> String {
        trim_text(&self.channel_comment)
    }

    /// Returns the unit name with trailing padding removed.
    pub fn trimmed_unit(&self) -> String {
        trim_text(&self.unit)
    }
}

/// Trims trailing NUL and space padding from a fixed-width text field.
///
/// Non-UTF-8 bytes are replaced rather than rejected; instrument firmware is
/// not consistent about encodings.
pub fn trim_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0 && b != b' ')
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// The decoded sample grid: `row_count` rows of `channel_count` raw values.
///
/// Rows are stored contiguously in row-major order, matching the order they
/// appear in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    channel_count: usize,
    row_count: usize,
    values: Vec<u16>,
}

impl SampleMatrix {
    /// Creates an empty matrix with the given row width.
    pub fn empty(channel_count: usize) -> Self {
        Self {
            channel_count,
            row_count: 0,
            values: Vec::new(),
        }
    }

    /// Appends one row. The row width must match `channel_count`.
    pub(crate) fn push_row(&mut self, row: &[u16]) {
        debug_assert_eq!(row.len(), self.channel_count);
        self.values.extend_from_slice(row);
        self.row_count += 1;
    }

    /// Number of values per row.
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// True when the matrix holds no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Returns one row of raw values, or `None` past the end.
    pub fn row(&self, index: usize) -> Option<&[u16]> {
        if index >= self.row_count {
            return None;
        }
        let start = index * self.channel_count;
        Some(&self.values[start..start + self.channel_count])
    }

    /// Iterates over rows in temporal order.
    pub fn rows(&self) -> impl Iterator<Item = &[u16]> + '_ {
        let width = self.channel_count;
        (0..self.row_count).map(move |i| &self.values[i * width..(i + 1) * width])
    }

    /// The flat row-major value storage.
    pub fn values(&self) -> &[u16] {
        &self.values
    }
}

/// Result of decoding one DBL stream.
///
/// Invariants upheld by the decoder: `channel_headers.len()` equals the
/// primary header's `channel_size`, and every sample row has exactly that
/// many values.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    pub primary_header: PrimaryHeader,
    pub channel_headers: Vec<ChannelHeader>,
    pub samples: SampleMatrix,
}
