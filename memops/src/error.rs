//! # Error Handling
//!
//! The primitives themselves have no error channel: unsupported widths are
//! rejected at compile time and address validity is the caller's obligation.
//! The few operations that run off the hot path (runtime width descriptors,
//! host scratch windows) report failures through this type.

use core::fmt;

// =============================================================================
// RESULT TYPE
// =============================================================================

/// Memops result type alias
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Memops error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Byte count outside `{0, 1, 2, 4, 8, 16}`
    UnsupportedWidth(usize),
    /// Scratch window base pointer is null
    NullScratch,
    /// Scratch window does not fit a 32-bit shared address
    ScratchTooLarge(usize),
    /// Scratch window base is not 16-byte aligned
    ScratchMisaligned(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedWidth(bytes) => {
                write!(f, "unsupported pack width: {} bytes", bytes)
            },
            Self::NullScratch => write!(f, "scratch window base is null"),
            Self::ScratchTooLarge(len) => {
                write!(f, "scratch window of {} bytes exceeds the 32-bit shared space", len)
            },
            Self::ScratchMisaligned(base) => {
                write!(f, "scratch window base {:#x} is not 16-byte aligned", base)
            },
        }
    }
}

#[cfg(not(target_arch = "nvptx64"))]
impl std::error::Error for Error {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::UnsupportedWidth(3).to_string(), "unsupported pack width: 3 bytes");
        assert_eq!(
            Error::ScratchMisaligned(0x1004).to_string(),
            "scratch window base 0x1004 is not 16-byte aligned"
        );
    }
}
