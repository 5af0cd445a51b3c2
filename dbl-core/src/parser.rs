//! Byte-layout parsing of DBL header records.
//!
//! Both header records are packed little-endian with no alignment padding,
//! so every field lives at a fixed byte offset. Parsing is a straight
//! unpack of that layout; no field value is validated here.
//!
//! Primary header (512 bytes):
//!
//! | offset | width | field              |
//! |--------|-------|--------------------|
//! | 0      | 14    | filetype           |
//! | 14     | 2     | start_attr         |
//! | 16     | 32    | title              |
//! | 48     | 48    | start_time         |
//! | 96     | 16    | unused             |
//! | 112    | 4     | data_size (u32)    |
//! | 116    | 2     | spare (u16)        |
//! | 118    | 2     | channel_size (u16) |
//! | 120    | 2     | sampling_freq (u16)|
//! | 122    | 4     | sampling_time (f32)|
//! | 126    | 2     | lag (u16)          |
//! | 128    | 384   | system             |
//!
//! Channel header (96 bytes):
//!
//! | offset | width | field                   |
//! |--------|-------|-------------------------|
//! | 0      | 32    | channel_comment         |
//! | 32     | 8     | unit                    |
//! | 40     | 4     | full_scale (f32)        |
//! | 44     | 4     | calibration (u32)       |
//! | 48     | 4     | physical_amount_cf (f32)|
//! | 52     | 4     | unused (u32)            |
//! | 56     | 4     | zero_offset (u32)       |
//! | 60     | 4     | max (u32)               |
//! | 64     | 4     | min (u32)               |
//! | 68     | 28    | spare                   |

use byteorder::{ByteOrder, LittleEndian};

use crate::decoder::DecodeError;
use crate::types::{ChannelHeader, PrimaryHeader, CHANNEL_HEADER_LEN, PRIMARY_HEADER_LEN};

/// Copies a fixed-width text field out of the record image.
#[inline]
fn text_field<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut field = [0u8; N];
    field.copy_from_slice(bytes);
    field
}

/// Unpacks a 512-byte primary header image.
///
/// Fails with [`DecodeError::MalformedHeader`] when the slice is not exactly
/// 512 bytes; field extraction is never attempted on an ill-sized record.
pub fn parse_primary_header(bytes: &[u8]) -> Result<PrimaryHeader, DecodeError> {
    if bytes.len() != PRIMARY_HEADER_LEN {
        return Err(DecodeError::MalformedHeader {
            expected: PRIMARY_HEADER_LEN,
            actual: bytes.len(),
        });
    }

    Ok(PrimaryHeader {
        filetype: text_field(&bytes[0..14]),
        start_attr: text_field(&bytes[14..16]),
        title: text_field(&bytes[16..48]),
        start_time: text_field(&bytes[48..96]),
        unused: text_field(&bytes[96..112]),
        data_size: LittleEndian::read_u32(&bytes[112..116]),
        spare: LittleEndian::read_u16(&bytes[116..118]),
        channel_size: LittleEndian::read_u16(&bytes[118..120]),
        sampling_freq: LittleEndian::read_u16(&bytes[120..122]),
        sampling_time: LittleEndian::read_f32(&bytes[122..126]),
        lag: LittleEndian::read_u16(&bytes[126..128]),
        system: text_field(&bytes[128..512]),
    })
}

/// Unpacks a 96-byte channel header image.
///
/// Fails with [`DecodeError::MalformedHeader`] when the slice is not exactly
/// 96 bytes.
pub fn parse_channel_header(bytes: &[u8]) -> Result<ChannelHeader, DecodeError> {
    if bytes.len() != CHANNEL_HEADER_LEN {
        return Err(DecodeError::MalformedHeader {
            expected: CHANNEL_HEADER_LEN,
            actual: bytes.len(),
        });
    }

    Ok(ChannelHeader {
        channel_comment: text_field(&bytes[0..32]),
        unit: text_field(&bytes[32..40]),
        full_scale: LittleEndian::read_f32(&bytes[40..44]),
        calibration: LittleEndian::read_u32(&bytes[44..48]),
        physical_amount_cf: LittleEndian::read_f32(&bytes[48..52]),
        unused: LittleEndian::read_u32(&bytes[52..56]),
        zero_offset: LittleEndian::read_u32(&bytes[56..60]),
        max: LittleEndian::read_u32(&bytes[60..64]),
        min: LittleEndian::read_u32(&bytes[64..68]),
        spare: text_field(&bytes[68..96]),
    })
}

/// Repacks a primary header into its 512-byte wire image.
///
/// Decoding is lossless, so `parse` followed by `encode` reproduces the
/// original bytes exactly.
pub fn encode_primary_header(header: &PrimaryHeader) -> [u8; PRIMARY_HEADER_LEN] {
    let mut bytes = [0u8; PRIMARY_HEADER_LEN];
    bytes[0..14].copy_from_slice(&header.filetype);
    bytes[14..16].copy_from_slice(&header.start_attr);
    bytes[16..48].copy_from_slice(&header.title);
    bytes[48..96].copy_from_slice(&header.start_time);
    bytes[96..112].copy_from_slice(&header.unused);
    LittleEndian::write_u32(&mut bytes[112..116], header.data_size);
    LittleEndian::write_u16(&mut bytes[116..118], header.spare);
    LittleEndian::write_u16(&mut bytes[118..120], header.channel_size);
    LittleEndian::write_u16(&mut bytes[120..122], header.sampling_freq);
    LittleEndian::write_f32(&mut bytes[122..126], header.sampling_time);
    LittleEndian::write_u16(&mut bytes[126..128], header.lag);
    bytes[128..512].copy_from_slice(&header.system);
    bytes
}

/// Repacks a channel header into its 96-byte wire image.
pub fn encode_channel_header(header: &ChannelHeader) -> [u8; CHANNEL_HEADER_LEN] {
    let mut bytes = [0u8; CHANNEL_HEADER_LEN];
    bytes[0..32].copy_from_slice(&header.channel_comment);
    bytes[32..40].copy_from_slice(&header.unit);
    LittleEndian::write_f32(&mut bytes[40..44], header.full_scale);
    LittleEndian::write_u32(&mut bytes[44..48], header.calibration);
    LittleEndian::write_f32(&mut bytes[48..52], header.physical_amount_cf);
    LittleEndian::write_u32(&mut bytes[52..56], header.unused);
    LittleEndian::write_u32(&mut bytes[56..60], header.zero_offset);
    LittleEndian::write_u32(&mut bytes[60..64], header.max);
    LittleEndian::write_u32(&mut bytes[64..68], header.min);
    bytes[68..96].copy_from_slice(&header.spare);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary_header_image() -> [u8; PRIMARY_HEADER_LEN] {
        let mut bytes = [0u8; PRIMARY_HEADER_LEN];
        bytes[0..14].copy_from_slice(b"DBL LOG FILE\0\0");
        bytes[16..27].copy_from_slice(b"Tensile #42");
        bytes[48..67].copy_from_slice(b"2013-06-01 09:30:00");
        LittleEndian::write_u32(&mut bytes[112..116], 1000); // data_size
        LittleEndian::write_u16(&mut bytes[118..120], 4); // channel_size
        LittleEndian::write_u16(&mut bytes[120..122], 7); // sampling_freq
        LittleEndian::write_f32(&mut bytes[122..126], 0.001); // sampling_time
        LittleEndian::write_u16(&mut bytes[126..128], 2); // lag
        bytes
    }

    fn channel_header_image() -> [u8; CHANNEL_HEADER_LEN] {
        let mut bytes = [0u8; CHANNEL_HEADER_LEN];
        bytes[0..7].copy_from_slice(b"Force 1");
        bytes[32..34].copy_from_slice(b"kN");
        LittleEndian::write_f32(&mut bytes[40..44], 50.0); // full_scale
        LittleEndian::write_u32(&mut bytes[44..48], 3); // calibration
        LittleEndian::write_f32(&mut bytes[48..52], 0.25); // physical_amount_cf
        LittleEndian::write_u32(&mut bytes[56..60], 32768); // zero_offset
        LittleEndian::write_u32(&mut bytes[60..64], 65535); // max
        LittleEndian::write_u32(&mut bytes[64..68], 0); // min
        bytes
    }

    #[test]
    fn test_parse_primary_header_fields() {
        let header = parse_primary_header(&primary_header_image()).unwrap();
        assert_eq!(&header.filetype, b"DBL LOG FILE\0\0");
        assert_eq!(header.trimmed_title(), "Tensile #42");
        assert_eq!(header.trimmed_start_time(), "2013-06-01 09:30:00");
        assert_eq!(header.data_size, 1000);
        assert_eq!(header.channel_size, 4);
        assert_eq!(header.sampling_freq, 7);
        assert_eq!(header.sampling_time, 0.001);
        assert_eq!(header.lag, 2);
    }

    #[test]
    fn test_parse_channel_header_fields() {
        let header = parse_channel_header(&channel_header_image()).unwrap();
        assert_eq!(header.trimmed_comment(), "Force 1");
        assert_eq!(header.trimmed_unit(), "kN");
        assert_eq!(header.full_scale, 50.0);
        assert_eq!(header.calibration, 3);
        assert_eq!(header.physical_amount_cf, 0.25);
        assert_eq!(header.zero_offset, 32768);
        assert_eq!(header.max, 65535);
        assert_eq!(header.min, 0);
    }

    #[test]
    fn test_parse_rejects_wrong_record_length() {
        assert!(matches!(
            parse_primary_header(&[0u8; 100]),
            Err(DecodeError::MalformedHeader {
                expected: PRIMARY_HEADER_LEN,
                actual: 100,
            })
        ));
        assert!(matches!(
            parse_channel_header(&[0u8; 95]),
            Err(DecodeError::MalformedHeader {
                expected: CHANNEL_HEADER_LEN,
                actual: 95,
            })
        ));
    }

    #[test]
    fn test_primary_header_round_trip() {
        let image = primary_header_image();
        let header = parse_primary_header(&image).unwrap();
        assert_eq!(encode_primary_header(&header), image);
    }

    #[test]
    fn test_channel_header_round_trip() {
        let image = channel_header_image();
        let header = parse_channel_header(&image).unwrap();
        assert_eq!(encode_channel_header(&header), image);
    }
}
