//! Borrowed view of an RGB888 pixel buffer.

use crate::error::BlurhashError;

/// Bytes per pixel in the accepted layout (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// Row-major RGB888 pixels with an arbitrary row stride.
///
/// The stride is the distance in bytes between the starts of consecutive
/// rows and may exceed `3 * width` when rows carry padding. The last row
/// needs no padding.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    row_stride: usize,
}

/// Row stride of a tightly packed image, `3 * width`.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidDimensions`] if the row size overflows
/// `usize`.
pub fn packed_stride(width: u32, height: u32) -> Result<usize, BlurhashError> {
    (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "row size overflows usize",
        })
}

impl<'a> ImageRef<'a> {
    /// View a tightly packed buffer (`row_stride == 3 * width`).
    ///
    /// # Errors
    ///
    /// See [`ImageRef::with_stride`].
    pub fn packed(pixels: &'a [u8], width: u32, height: u32) -> Result<Self, BlurhashError> {
        Self::with_stride(pixels, width, height, packed_stride(width, height)?)
    }

    /// View a buffer whose rows start `row_stride` bytes apart.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::InvalidDimensions`] for a zero width or
    /// height or a stride shorter than one row of pixels, and
    /// [`BlurhashError::BufferTooSmall`] if `pixels` ends before the last
    /// pixel of the last row.
    pub fn with_stride(
        pixels: &'a [u8],
        width: u32,
        height: u32,
        row_stride: usize,
    ) -> Result<Self, BlurhashError> {
        if width == 0 || height == 0 {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be > 0",
            });
        }

        let overflow = BlurhashError::InvalidDimensions {
            width,
            height,
            reason: "dimensions overflow buffer size calculation",
        };
        let row_bytes = (width as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(overflow.clone())?;
        if row_stride < row_bytes {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "row stride is shorter than width * 3",
            });
        }

        let expected = row_stride
            .checked_mul(height as usize - 1)
            .and_then(|v| v.checked_add(row_bytes))
            .ok_or(overflow)?;
        if pixels.len() < expected {
            return Err(BlurhashError::BufferTooSmall {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
            row_stride,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in bytes between row starts.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// The `3 * width` pixel bytes of row `y`, padding excluded.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.row_stride;
        &self.pixels[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> {
        let view = *self;
        (0..view.height as usize).map(move |y| view.row(y))
    }
}
