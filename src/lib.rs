//! GUID generation and canonical string formatting.
//!
//! Identifiers are handled as their 16 stored bytes. The same bytes render
//! differently depending on whether the first three fields were stored big or
//! little endian, so formatting always takes a [`ByteOrder`].
//!
//! ```
//! use lnk_guid::{ByteOrder, Guid};
//!
//! let guid = Guid::from([
//!     0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
//!     0x10,
//! ]);
//! assert_eq!(
//!     guid.to_guid_string(ByteOrder::Little).unwrap().as_str(),
//!     "04030201-0605-0807-090a-0b0c0d0e0f10"
//! );
//! ```

pub mod error;
pub mod format;
pub mod generate;
pub mod guid;

pub use error::Error;
pub use format::format;
#[cfg(any(feature = "random", feature = "time-based"))]
pub use generate::generate;
pub use generate::Backend;
pub use guid::{
    encode_record_as_bytes, ByteOrder, Guid, GuidKind, GuidRecord, GuidString, GUID_SIZE,
    GUID_STRING_LENGTH, GUID_STRING_SIZE,
};

pub type Result<T> = std::result::Result<T, crate::Error>;
