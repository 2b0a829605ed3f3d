use std::fmt::Display;
use std::ops::Deref;

use binrw::prelude::*;

use crate::error::{check_buffer_size, Error};

/// The size of a GUID, in Bytes
pub const GUID_SIZE: usize = 16;
/// Visible characters of the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form.
pub const GUID_STRING_LENGTH: usize = 36;
/// The size of a GUID string buffer, including the NUL terminator.
pub const GUID_STRING_SIZE: usize = GUID_STRING_LENGTH + 1;

/// The scheme used to produce a new GUID.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuidKind {
    Random = 1,
    Time = 2,
}

impl GuidKind {
    /// Whether a source for this kind was compiled into this build.
    pub const fn is_available(self) -> bool {
        match self {
            GuidKind::Random => cfg!(feature = "random"),
            GuidKind::Time => cfg!(feature = "time-based"),
        }
    }
}

impl TryFrom<u8> for GuidKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GuidKind::Random),
            2 => Ok(GuidKind::Time),
            _ => Err(Error::UnsupportedValue(format!(
                "unsupported GUID type {value}"
            ))),
        }
    }
}

impl Display for GuidKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuidKind::Random => write!(f, "random"),
            GuidKind::Time => write!(f, "time-based"),
        }
    }
}

/// How the 16 stored bytes map onto the first three canonical fields.
///
/// The trailing 8 bytes are a byte array and are never swapped.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Big = b'b',
    Little = b'l',
}

impl TryFrom<u8> for ByteOrder {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'b' => Ok(ByteOrder::Big),
            b'l' => Ok(ByteOrder::Little),
            _ => Err(Error::UnsupportedValue(format!(
                "unsupported byte order {value:#04x}"
            ))),
        }
    }
}

/// Represents a standard, 16-byte GUID, as stored.
///
/// No version or variant bits are interpreted.
#[derive(BinRead, BinWrite, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid([u8; GUID_SIZE]);

impl Guid {
    pub const NIL: Guid = Guid([0; GUID_SIZE]);

    /// Generates a new GUID of the given kind.
    #[cfg(any(feature = "random", feature = "time-based"))]
    pub fn generate(kind: GuidKind) -> crate::Result<Self> {
        let mut bytes = [0u8; GUID_SIZE];
        crate::generate::generate(Some(&mut bytes), kind)?;
        Ok(Guid(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; GUID_SIZE] {
        &self.0
    }

    /// Renders the GUID in canonical form, reading the stored bytes in `byte_order`.
    pub fn to_guid_string(&self, byte_order: ByteOrder) -> crate::Result<GuidString> {
        let mut string = [0u8; GUID_STRING_SIZE];
        crate::format::format(Some(&self.0), byte_order, Some(&mut string))?;
        GuidString::from_formatted(string)
    }
}

impl From<[u8; GUID_SIZE]> for Guid {
    fn from(value: [u8; GUID_SIZE]) -> Self {
        Guid(value)
    }
}

impl From<Guid> for [u8; GUID_SIZE] {
    fn from(val: Guid) -> Self {
        val.0
    }
}

impl From<GuidRecord> for Guid {
    fn from(value: GuidRecord) -> Self {
        Guid(encode_record_as_bytes(value))
    }
}

impl TryFrom<&[u8]> for Guid {
    type Error = Error;

    /// Takes the first 16 bytes of a larger buffer.
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        check_buffer_size("GUID", value.len(), GUID_SIZE)?;
        let mut bytes = [0u8; GUID_SIZE];
        bytes.copy_from_slice(&value[..GUID_SIZE]);
        Ok(Guid(bytes))
    }
}

impl std::fmt::Debug for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Guid(")?;
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}

/// The structured form of a GUID: `u32 - u16 - u16 - 8 byte array`.
///
/// Stored little endian, as Windows and link files lay it out.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[brw(little)]
pub struct GuidRecord {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

/// Serializes a record into the flat 16-byte layout.
///
/// The first three fields are written little endian, `data4` verbatim.
pub const fn encode_record_as_bytes(record: GuidRecord) -> [u8; GUID_SIZE] {
    let d1 = record.data1.to_le_bytes();
    let d2 = record.data2.to_le_bytes();
    let d3 = record.data3.to_le_bytes();
    let d4 = record.data4;
    [
        d1[0], d1[1], d1[2], d1[3], d2[0], d2[1], d3[0], d3[1], d4[0], d4[1], d4[2], d4[3], d4[4],
        d4[5], d4[6], d4[7],
    ]
}

impl Display for GuidRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-",
            self.data1, self.data2, self.data3, self.data4[0], self.data4[1]
        )?;
        for b in &self.data4[2..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// A canonical GUID string, NUL terminated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuidString([u8; GUID_STRING_SIZE]);

impl GuidString {
    /// Accepts a buffer only if it holds 36 ASCII characters and the terminator.
    fn from_formatted(string: [u8; GUID_STRING_SIZE]) -> crate::Result<Self> {
        let (text, terminator) = string.split_at(GUID_STRING_LENGTH);
        if !text.is_ascii() || terminator != [0u8] {
            return Err(Error::FormatFailed(format!(
                "not a terminated ASCII GUID string: {string:02x?}"
            )));
        }
        Ok(GuidString(string))
    }

    pub fn as_str(&self) -> &str {
        let text = std::str::from_utf8(&self.0[..GUID_STRING_LENGTH]);
        debug_assert!(text.is_ok(), "GuidString holds non-ASCII bytes");
        text.unwrap_or_default()
    }

    /// The full buffer, terminator included.
    pub const fn as_bytes_with_nul(&self) -> &[u8; GUID_STRING_SIZE] {
        &self.0
    }
}

impl Deref for GuidString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl Display for GuidString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for GuidString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
