//! Quantization of normalized coefficients into packed integer codes.

use crate::color::{linear_to_srgb, sign_pow};
use crate::factors::Rgb;

/// Levels per channel of a quantized AC term (0..=18, 9 is zero).
pub const AC_LEVELS: u32 = 19;

/// Largest packed AC code: all three channels at level 18.
pub const MAX_AC_CODE: u32 = AC_LEVELS * AC_LEVELS * AC_LEVELS - 1;

/// Pack the DC term as a 24-bit `0xRRGGBB` sRGB value.
///
/// # Examples
///
/// ```
/// use blurhash_encode::quantize::encode_dc;
/// assert_eq!(encode_dc([1.0, 0.0, 1.0]), 0xFF00FF);
/// ```
#[inline]
pub fn encode_dc(dc: Rgb) -> u32 {
    ((linear_to_srgb(dc[0]) as u32) << 16)
        | ((linear_to_srgb(dc[1]) as u32) << 8)
        | linear_to_srgb(dc[2]) as u32
}

/// Shared magnitude scale of all AC terms of one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcScale {
    quantized: u32,
    maximum: f32,
}

impl AcScale {
    /// Derive the scale from the AC terms of an image.
    ///
    /// With no AC terms the scale is `0` and the maximum is `1.0`.
    pub fn from_ac(ac: &[Rgb]) -> Self {
        if ac.is_empty() {
            return Self {
                quantized: 0,
                maximum: 1.0,
            };
        }

        let actual = ac
            .iter()
            .flat_map(|c| c.iter())
            .fold(0.0f32, |max, &c| c.abs().max(max));
        let quantized = (((actual * 166.0) as f64 - 0.5) as f32)
            .floor()
            .min(82.0)
            .max(0.0) as u32;
        Self::from_quantized(quantized)
    }

    /// Rebuild the scale from its single-digit encoding (0..=82).
    pub fn from_quantized(quantized: u32) -> Self {
        Self {
            quantized,
            maximum: (quantized as f32 + 1.0) / 166.0,
        }
    }

    /// The value written to the hash.
    #[inline]
    pub fn quantized(&self) -> u32 {
        self.quantized
    }

    /// Magnitude that maps to the outermost AC level.
    #[inline]
    pub fn maximum(&self) -> f32 {
        self.maximum
    }
}

#[inline]
fn quantize_channel(value: f32, maximum: f32) -> u32 {
    let level = (sign_pow(value / maximum, 0.5) * 9.0) as f64 + 9.5;
    // min before max: a NaN level lands on 18, as with fmaxf(0, fminf(18, x)).
    (level as f32).floor().min(18.0).max(0.0) as u32
}

/// Pack one AC term as `r * 19^2 + g * 19 + b` of its quantized levels.
///
/// # Examples
///
/// ```
/// use blurhash_encode::quantize::encode_ac;
/// // A zero term sits in the middle of every channel.
/// assert_eq!(encode_ac([0.0; 3], 1.0), 9 * 19 * 19 + 9 * 19 + 9);
/// ```
#[inline]
pub fn encode_ac(ac: Rgb, maximum: f32) -> u32 {
    quantize_channel(ac[0], maximum) * AC_LEVELS * AC_LEVELS
        + quantize_channel(ac[1], maximum) * AC_LEVELS
        + quantize_channel(ac[2], maximum)
}
