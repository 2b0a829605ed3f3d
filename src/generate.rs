//! GUID generation over the backends compiled into this build.
//!
//! The `random` feature enables the random source and the `time-based` feature
//! the time-based source. Without either, [`generate`] does not exist and
//! [`Backend::select`] only ever returns [`Backend::NotAvailable`].

use std::fmt::Display;

use crate::guid::GuidKind;
#[cfg(any(feature = "random", feature = "time-based"))]
use crate::{
    error::{check_buffer_size, Error},
    guid::{encode_record_as_bytes, GUID_SIZE},
};

/// The source that produces identifiers of a given [`GuidKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    NotAvailable,
    #[cfg(feature = "random")]
    RandomBacked,
    #[cfg(feature = "time-based")]
    TimeBacked,
}

impl Backend {
    pub fn select(kind: GuidKind) -> Backend {
        match kind {
            #[cfg(feature = "random")]
            GuidKind::Random => Backend::RandomBacked,
            #[cfg(feature = "time-based")]
            GuidKind::Time => Backend::TimeBacked,
            #[allow(unreachable_patterns)]
            _ => Backend::NotAvailable,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Backend::NotAvailable)
    }

    /// Every backend produces a [`GuidRecord`](crate::GuidRecord), so all kinds share the
    /// little-endian stored layout.
    #[cfg(any(feature = "random", feature = "time-based"))]
    fn fill(&self, kind: GuidKind) -> crate::Result<[u8; GUID_SIZE]> {
        let record = match self {
            Backend::NotAvailable => {
                return Err(Error::UnsupportedValue(format!(
                    "{kind} GUID generation is not available in this build"
                )))
            }
            #[cfg(feature = "random")]
            Backend::RandomBacked => random::generate_record(),
            #[cfg(feature = "time-based")]
            Backend::TimeBacked => time_based::generate_record(),
        };
        Ok(encode_record_as_bytes(record))
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::NotAvailable => write!(f, "unavailable"),
            #[cfg(feature = "random")]
            Backend::RandomBacked => write!(f, "random"),
            #[cfg(feature = "time-based")]
            Backend::TimeBacked => write!(f, "time-based"),
        }
    }
}

/// Generates a new GUID into the first 16 bytes of `guid`.
///
/// `kind` may be a [`GuidKind`] or its raw code. Bytes past the 16th are not
/// touched, and nothing is written when an error is returned.
#[cfg(any(feature = "random", feature = "time-based"))]
pub fn generate<K>(guid: Option<&mut [u8]>, kind: K) -> crate::Result<()>
where
    K: TryInto<GuidKind>,
    Error: From<K::Error>,
{
    let guid = guid.ok_or(Error::InvalidArgument("invalid GUID"))?;
    check_buffer_size("GUID", guid.len(), GUID_SIZE)?;
    let kind: GuidKind = kind.try_into()?;

    let backend = Backend::select(kind);
    let bytes = backend.fill(kind)?;
    guid[..GUID_SIZE].copy_from_slice(&bytes);

    log::debug!("Generated {kind} GUID using the {backend} backend");
    Ok(())
}

#[cfg(feature = "random")]
mod random {
    use rand::{rngs::OsRng, Rng};

    use crate::guid::GuidRecord;

    /// Stamps random fields as a version 4 record.
    pub fn random_record(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> GuidRecord {
        let mut data4 = data4;
        data4[0] = (data4[0] & 0x3f) | 0x80;
        GuidRecord {
            data1,
            data2,
            data3: (data3 & 0x0fff) | 0x4000,
            data4,
        }
    }

    pub fn generate_record() -> GuidRecord {
        let mut rng = OsRng;
        let mut data4 = [0u8; 8];
        rng.fill(&mut data4);
        random_record(rng.gen(), rng.gen(), rng.gen(), data4)
    }

}

#[cfg(feature = "time-based")]
mod time_based {
    use rand::{rngs::OsRng, Rng};
    use time::macros::datetime;
    use time::OffsetDateTime;

    use crate::guid::GuidRecord;

    /// Start of the Gregorian calendar, the epoch of version 1 timestamps.
    const GREGORIAN_EPOCH: OffsetDateTime = datetime!(1582-10-15 00:00:00 UTC);

    /// 100-nanosecond intervals since the Gregorian epoch, truncated to 60 bits.
    pub fn gregorian_timestamp(now: OffsetDateTime) -> u64 {
        let intervals = (now - GREGORIAN_EPOCH).whole_nanoseconds() / 100;
        (intervals.max(0) as u64) & 0x0fff_ffff_ffff_ffff
    }

    /// Lays out a version 1 record. The node gets its multicast bit set,
    /// marking it as not being a hardware address.
    pub fn time_record(timestamp: u64, clock_seq: u16, node: [u8; 6]) -> GuidRecord {
        let [clock_seq_hi, clock_seq_low] = ((clock_seq & 0x3fff) | 0x8000).to_be_bytes();
        GuidRecord {
            data1: timestamp as u32,
            data2: (timestamp >> 32) as u16,
            data3: ((timestamp >> 48) as u16 & 0x0fff) | 0x1000,
            data4: [
                clock_seq_hi,
                clock_seq_low,
                node[0] | 0x01,
                node[1],
                node[2],
                node[3],
                node[4],
                node[5],
            ],
        }
    }

    pub fn generate_record() -> GuidRecord {
        let mut rng = OsRng;
        let clock_seq: u16 = rng.gen();
        let mut node = [0u8; 6];
        rng.fill(&mut node);
        time_record(gregorian_timestamp(OffsetDateTime::now_utc()), clock_seq, node)
    }

}
