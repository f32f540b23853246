//! Color space conversion utilities for sRGB and linear RGB.
//!
//! The forward direction (sRGB byte to linear) runs once per channel per
//! pixel and is served from a 256-entry [`SrgbLut`]. The process-wide table
//! is built on first use and is read-only afterwards, so any number of
//! encoders on any number of threads can share it.
//!
//! Arithmetic follows the woltapp C encoder: values are stored in single
//! precision while the piecewise constants are applied in double precision.
//! Changing either side alters encoded output for boundary inputs.

use std::fmt;
use std::sync::OnceLock;

/// `1 / 2.4` rounded to single precision, as the C `powf` call sees it.
const INV_GAMMA: f32 = (1.0f64 / 2.4) as f32;

/// Lookup table mapping sRGB byte values (0..=255) to linear RGB (0.0..=1.0).
#[derive(Clone, PartialEq)]
pub struct SrgbLut {
    table: [f32; 256],
}

impl SrgbLut {
    /// Compute a fresh table.
    ///
    /// Every call yields identical contents; most callers want
    /// [`SrgbLut::shared`] instead.
    pub fn build() -> Self {
        let mut table = [0.0f32; 256];
        for (value, slot) in (0..=255u8).zip(table.iter_mut()) {
            *slot = srgb_to_linear_exact(value);
        }
        Self { table }
    }

    /// The process-wide table, built on the first call.
    ///
    /// Concurrent first calls race through a one-time initializer; exactly
    /// one table is ever published.
    pub fn shared() -> &'static SrgbLut {
        static SHARED: OnceLock<SrgbLut> = OnceLock::new();
        SHARED.get_or_init(SrgbLut::build)
    }

    /// Convert one sRGB byte to linear light.
    #[inline]
    pub fn to_linear(&self, value: u8) -> f32 {
        self.table[value as usize]
    }

    /// Convert an `[r, g, b]` byte triple to linear light.
    #[inline]
    pub fn pixel(&self, rgb: [u8; 3]) -> [f32; 3] {
        [
            self.to_linear(rgb[0]),
            self.to_linear(rgb[1]),
            self.to_linear(rgb[2]),
        ]
    }

    /// The raw table, indexed by sRGB byte value.
    pub fn as_array(&self) -> &[f32; 256] {
        &self.table
    }
}

impl Default for SrgbLut {
    fn default() -> Self {
        Self::build()
    }
}

impl fmt::Debug for SrgbLut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SrgbLut")
            .field("min", &self.table[0])
            .field("max", &self.table[255])
            .finish()
    }
}

fn srgb_to_linear_exact(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v as f64 <= 0.04045 {
        (v as f64 / 12.92) as f32
    } else {
        (((v as f64 + 0.055) / 1.055) as f32).powf(2.4)
    }
}

/// Convert an sRGB byte value (0..=255) to linear RGB (0.0..=1.0).
///
/// Reads the shared [`SrgbLut`].
///
/// # Examples
///
/// ```
/// use blurhash_encode::color::srgb_to_linear;
/// assert_eq!(srgb_to_linear(0), 0.0);
/// assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn srgb_to_linear(value: u8) -> f32 {
    SrgbLut::shared().to_linear(value)
}

/// Convert a linear RGB value to an sRGB byte value (0..=255).
///
/// Input is clamped to \[0.0, 1.0\] (NaN maps to 255, as with `fminf`), then
/// rounded by adding 0.5 and truncating.
///
/// # Examples
///
/// ```
/// use blurhash_encode::color::linear_to_srgb;
/// assert_eq!(linear_to_srgb(0.0), 0);
/// assert_eq!(linear_to_srgb(1.0), 255);
/// assert_eq!(linear_to_srgb(-3.0), 0);
/// ```
#[inline]
pub fn linear_to_srgb(value: f32) -> u8 {
    let v = value.min(1.0).max(0.0);
    let scaled = if v as f64 <= 0.003_130_8 {
        v as f64 * 12.92 * 255.0 + 0.5
    } else {
        (1.055 * v.powf(INV_GAMMA) as f64 - 0.055) * 255.0 + 0.5
    };
    // `as` truncates toward zero; the clamp above keeps this within 0..=255.5.
    scaled as u8
}

/// Compute `sign(value) * |value|^exp`.
///
/// # Examples
///
/// ```
/// use blurhash_encode::color::sign_pow;
/// assert!((sign_pow(4.0, 0.5) - 2.0).abs() < 1e-6);
/// assert!((sign_pow(-4.0, 0.5) + 2.0).abs() < 1e-6);
/// ```
#[inline]
pub fn sign_pow(value: f32, exp: f32) -> f32 {
    value.abs().powf(exp).copysign(value)
}
