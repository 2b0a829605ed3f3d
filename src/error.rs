use std::convert::Infallible;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("{what} too small: need at least {required} bytes, got {actual}")]
    BufferTooSmall {
        what: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("Invalid {what} size value {actual} exceeds maximum {maximum}")]
    ValueExceedsMaximum {
        what: &'static str,
        actual: usize,
        maximum: usize,
    },
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
    #[error("Unable to set string: {0}")]
    FormatFailed(String),
}

impl From<Infallible> for Error {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

/// Validates a caller-declared buffer size against the fixed payload it must hold.
///
/// The upper bound mirrors the largest object the platform can address.
pub(crate) fn check_buffer_size(
    what: &'static str,
    actual: usize,
    required: usize,
) -> crate::Result<()> {
    if actual < required {
        return Err(Error::BufferTooSmall {
            what,
            required,
            actual,
        });
    }
    let maximum = isize::MAX as usize;
    if actual > maximum {
        return Err(Error::ValueExceedsMaximum {
            what,
            actual,
            maximum,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_buffer_size_bounds() {
        assert_eq!(check_buffer_size("GUID", 16, 16), Ok(()));
        assert_eq!(
            check_buffer_size("GUID", 15, 16),
            Err(Error::BufferTooSmall {
                what: "GUID",
                required: 16,
                actual: 15
            })
        );
        assert!(matches!(
            check_buffer_size("string", usize::MAX, 37),
            Err(Error::ValueExceedsMaximum { .. })
        ));
    }

    #[test]
    pub fn test_error_messages() {
        let err = Error::BufferTooSmall {
            what: "GUID",
            required: 16,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "GUID too small: need at least 16 bytes, got 4"
        );
        assert_eq!(
            Error::InvalidArgument("missing GUID buffer").to_string(),
            "Invalid argument: missing GUID buffer"
        );
    }
}
