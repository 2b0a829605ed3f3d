//! Canonical string rendering of stored GUID bytes.

use std::io::{Cursor, Write};

use crate::error::{check_buffer_size, Error};
use crate::guid::{ByteOrder, GUID_SIZE, GUID_STRING_LENGTH, GUID_STRING_SIZE};

/// Reorders the stored bytes into the canonical field order.
///
/// Little endian swaps only the `u32`, `u16`, `u16` fields; the trailing
/// 8 bytes are a byte array in both orders.
fn canonical_order(guid: &[u8], byte_order: ByteOrder) -> [u8; GUID_SIZE] {
    let mut ordered = [0u8; GUID_SIZE];
    ordered.copy_from_slice(&guid[..GUID_SIZE]);
    if byte_order == ByteOrder::Little {
        ordered[0..4].reverse();
        ordered[4..6].reverse();
        ordered[6..8].reverse();
    }
    ordered
}

/// Writes the ordered bytes as 36 hyphenated hex characters and a NUL
/// terminator, failing if `string` cannot hold them.
fn write_canonical(ordered: &[u8; GUID_SIZE], string: &mut [u8]) -> crate::Result<()> {
    let string_size = string.len();
    let mut cursor = Cursor::new(string);
    for (i, b) in ordered.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            cursor
                .write_all(b"-")
                .map_err(|e| Error::FormatFailed(e.to_string()))?;
        }
        write!(cursor, "{b:02x}").map_err(|e| Error::FormatFailed(e.to_string()))?;
    }
    let print_count = cursor.position() as usize;
    if print_count != GUID_STRING_LENGTH || print_count >= string_size {
        return Err(Error::FormatFailed(format!(
            "wrote {print_count} characters into a {string_size} byte string"
        )));
    }
    cursor
        .write_all(&[0])
        .map_err(|e| Error::FormatFailed(e.to_string()))
}

/// Writes the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form of `guid`
/// into `string`, followed by a NUL terminator.
///
/// `byte_order` may be a [`ByteOrder`] or its raw code. Only the first 16 bytes
/// of `guid` and the first 37 bytes of `string` are used. On failure the
/// contents of `string` are unspecified.
pub fn format<B>(
    guid: Option<&[u8]>,
    byte_order: B,
    string: Option<&mut [u8]>,
) -> crate::Result<()>
where
    B: TryInto<ByteOrder>,
    Error: From<B::Error>,
{
    let guid = guid.ok_or(Error::InvalidArgument("invalid GUID"))?;
    check_buffer_size("GUID", guid.len(), GUID_SIZE)?;
    let byte_order: ByteOrder = byte_order.try_into()?;
    let string = string.ok_or(Error::InvalidArgument("invalid string"))?;
    check_buffer_size("string", string.len(), GUID_STRING_SIZE)?;

    write_canonical(&canonical_order(guid, byte_order), string)?;

    log::trace!("Formatted GUID as {byte_order:?} endian");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENTIAL: [u8; 16] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        0x10,
    ];

    fn format_to_string(guid: &[u8], byte_order: ByteOrder) -> String {
        let mut string = [0u8; GUID_STRING_SIZE];
        format(Some(guid), byte_order, Some(&mut string)).unwrap();
        assert_eq!(string[GUID_STRING_LENGTH], 0);
        String::from_utf8(string[..GUID_STRING_LENGTH].to_vec()).unwrap()
    }

    #[test]
    pub fn test_format_big_endian() {
        assert_eq!(
            format_to_string(&SEQUENTIAL, ByteOrder::Big),
            "01020304-0506-0708-090a-0b0c0d0e0f10"
        );
    }

    #[test]
    pub fn test_format_little_endian() {
        assert_eq!(
            format_to_string(&SEQUENTIAL, ByteOrder::Little),
            "04030201-0605-0807-090a-0b0c0d0e0f10"
        );
    }

    #[test]
    pub fn test_format_raw_byte_order_code() {
        let mut string = [0u8; GUID_STRING_SIZE];
        format(Some(&SEQUENTIAL), b'l', Some(&mut string)).unwrap();
        assert_eq!(&string[..8], b"04030201");
    }

    #[test]
    pub fn test_canonical_order_keeps_trailing_bytes() {
        let little = canonical_order(&SEQUENTIAL, ByteOrder::Little);
        assert_eq!(&little[..8], &[4, 3, 2, 1, 6, 5, 8, 7]);
        assert_eq!(&little[8..], &SEQUENTIAL[8..]);
        assert_eq!(canonical_order(&SEQUENTIAL, ByteOrder::Big), SEQUENTIAL);
    }

    #[test]
    pub fn test_check_order() {
        let mut short_string = [0u8; GUID_STRING_SIZE - 1];
        // Input size is checked before the byte order and the output.
        assert!(matches!(
            format(Some(&SEQUENTIAL[..15]), b'?', Some(&mut short_string)),
            Err(Error::BufferTooSmall { what: "GUID", .. })
        ));
        assert!(matches!(
            format(Some(&SEQUENTIAL), b'?', None),
            Err(Error::UnsupportedValue(_))
        ));
        assert!(matches!(
            format(Some(&SEQUENTIAL), ByteOrder::Big, None),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            format(None, b'?', None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    pub fn test_write_canonical_reports_truncation() {
        let mut no_terminator = [0u8; GUID_STRING_LENGTH];
        assert_eq!(
            write_canonical(&SEQUENTIAL, &mut no_terminator),
            Err(Error::FormatFailed(
                "wrote 36 characters into a 36 byte string".to_string()
            ))
        );
        assert_eq!(&no_terminator[..8], b"01020304");

        let mut short = [0u8; 20];
        assert!(matches!(
            write_canonical(&SEQUENTIAL, &mut short),
            Err(Error::FormatFailed(_))
        ));
    }

    #[test]
    pub fn test_larger_output_untouched_past_terminator() {
        let mut string = [0xaau8; 40];
        format(Some(&SEQUENTIAL), ByteOrder::Big, Some(&mut string)).unwrap();
        assert_eq!(string[GUID_STRING_LENGTH], 0);
        assert_eq!(&string[GUID_STRING_SIZE..], &[0xaa; 3]);
    }
}
