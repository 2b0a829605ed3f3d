#![allow(dead_code)]

use lnk_guid::GUID_STRING_LENGTH;

/// Checks `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` with lower-case hex digits.
pub fn is_canonical(s: &str) -> bool {
    s.len() == GUID_STRING_LENGTH
        && s.bytes().enumerate().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == b'-',
            _ => matches!(c, b'0'..=b'9' | b'a'..=b'f'),
        })
}
