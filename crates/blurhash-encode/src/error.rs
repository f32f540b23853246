//! Error types for BlurHash encoding.

use thiserror::Error;

/// Errors that can occur while encoding an image into a BlurHash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlurhashError {
    /// The component count is out of the valid range (1..=9).
    #[error("component count out of range: {component} = {value} (must be 1..=9)")]
    InvalidComponentCount {
        /// Which component axis ("x" or "y").
        component: &'static str,
        /// The invalid value.
        value: u32,
    },

    /// A working table could not be allocated.
    #[error("failed to allocate {bytes} bytes for encoder tables")]
    AllocationFailure {
        /// Size of the allocation that failed.
        bytes: usize,
    },

    /// The image dimensions or row stride are unusable.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
        /// Why the dimensions are invalid.
        reason: &'static str,
    },

    /// The pixel buffer is shorter than width, height and stride require.
    #[error("pixel buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall {
        /// Minimum number of bytes needed.
        expected: usize,
        /// Length of the buffer that was passed.
        actual: usize,
    },

    /// A value does not fit in the requested number of base83 digits.
    #[error("value {value} does not fit in {length} base83 digits")]
    Base83Overflow {
        /// The value being encoded.
        value: u64,
        /// The requested digit count.
        length: usize,
    },

    /// An invalid character was encountered while reading base83 digits.
    #[error("invalid base83 character: {0:?}")]
    InvalidBase83Character(char),

    /// The BlurHash string is too short to carry a header.
    #[error("invalid BlurHash length: expected at least {expected}, got {actual}")]
    InvalidLength {
        /// The minimum length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },
}

