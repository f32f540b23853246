//! BlurHash encoding: convert an RGB image into a compact BlurHash string.
//!
//! The encoder projects the image onto a small cosine basis, quantizes the
//! resulting components and writes them as base83 digits:
//!
//! | chars | content                                   |
//! |-------|-------------------------------------------|
//! | 1     | size flag `(x - 1) + (y - 1) * 9`         |
//! | 1     | quantized AC scale                        |
//! | 4     | DC term as packed sRGB                    |
//! | 2 each| AC terms in slot order, x fastest         |

use tracing::{debug_span, trace};

use crate::base83;
use crate::color::SrgbLut;
use crate::components::Components;
use crate::error::BlurhashError;
use crate::factors::{accumulate, FactorGrid};
use crate::image::ImageRef;
use crate::quantize::{encode_ac, encode_dc, AcScale};

/// Reusable encoder for a fixed component grid.
///
/// Holds no per-image state, so one encoder can serve any number of images
/// from any number of threads.
///
/// # Examples
///
/// ```
/// use blurhash_encode::{Components, Encoder, ImageRef};
///
/// let encoder = Encoder::new(Components::new(4, 3).unwrap());
/// let pixels = vec![200u8; 8 * 8 * 3];
/// let image = ImageRef::packed(&pixels, 8, 8).unwrap();
/// let hash = encoder.encode(&image).unwrap();
/// assert_eq!(hash.len(), 28);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'lut> {
    components: Components,
    lut: &'lut SrgbLut,
}

impl Encoder<'static> {
    /// Encoder backed by the process-wide [`SrgbLut`].
    pub fn new(components: Components) -> Self {
        Self::with_lut(components, SrgbLut::shared())
    }
}

impl<'lut> Encoder<'lut> {
    /// Encoder backed by a caller-supplied table.
    pub fn with_lut(components: Components, lut: &'lut SrgbLut) -> Self {
        Self { components, lut }
    }

    /// The component grid this encoder produces.
    pub fn components(&self) -> Components {
        self.components
    }

    /// Compute the normalized coefficient grid of `image` without encoding it.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::AllocationFailure`] if working tables cannot
    /// be allocated.
    pub fn factors(&self, image: &ImageRef<'_>) -> Result<FactorGrid, BlurhashError> {
        accumulate(image, self.components, self.lut)
    }

    /// Encode `image` into a BlurHash string.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::AllocationFailure`] if working tables cannot
    /// be allocated.
    pub fn encode(&self, image: &ImageRef<'_>) -> Result<String, BlurhashError> {
        let span = debug_span!(
            "encode",
            width = image.width(),
            height = image.height(),
            components_x = self.components.x(),
            components_y = self.components.y(),
        );
        let _guard = span.enter();

        let grid = self.factors(image)?;
        let hash = write_hash(&grid)?;
        trace!(%hash, "encoded");
        Ok(hash)
    }
}

/// Serialize a coefficient grid into its BlurHash string.
///
/// # Errors
///
/// Returns [`BlurhashError::Base83Overflow`] only if a packed value falls
/// outside its digit range, which quantization rules out.
pub fn write_hash(grid: &FactorGrid) -> Result<String, BlurhashError> {
    let components = grid.components();
    let scale = AcScale::from_ac(grid.ac());
    trace!(
        quantized = scale.quantized(),
        maximum = scale.maximum(),
        "ac scale"
    );

    let mut hash = String::with_capacity(components.hash_len());
    base83::encode_into(components.size_flag() as u64, 1, &mut hash)?;
    base83::encode_into(scale.quantized() as u64, 1, &mut hash)?;
    base83::encode_into(encode_dc(grid.dc()) as u64, 4, &mut hash)?;
    for &ac in grid.ac() {
        base83::encode_into(encode_ac(ac, scale.maximum()) as u64, 2, &mut hash)?;
    }
    Ok(hash)
}

/// Encode a tightly packed RGB image into a BlurHash string.
///
/// # Arguments
///
/// * `pixels` - Flat RGB byte array in row-major order (3 bytes per pixel).
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `components_x` - Number of horizontal components (1..=9).
/// * `components_y` - Number of vertical components (1..=9).
///
/// # Errors
///
/// Returns an error if the component counts are out of range (checked
/// first), if the dimensions are zero, or if the pixel buffer is shorter
/// than `width * height * 3`.
///
/// # Examples
///
/// ```
/// use blurhash_encode::encode;
/// // A 2x2 red image
/// let pixels = [255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0];
/// let hash = encode(&pixels, 2, 2, 4, 3).unwrap();
/// assert_eq!(hash.len(), 28);
/// ```
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    components_x: u32,
    components_y: u32,
) -> Result<String, BlurhashError> {
    let components = Components::new(components_x, components_y)?;
    let image = ImageRef::packed(pixels, width, height)?;
    Encoder::new(components).encode(&image)
}

/// Encode an RGB image whose rows start `row_stride` bytes apart.
///
/// # Errors
///
/// As [`encode`], plus [`BlurhashError::InvalidDimensions`] if `row_stride`
/// is shorter than `width * 3`.
///
/// # Examples
///
/// ```
/// use blurhash_encode::encode_strided;
/// // One red and one blue row, each padded to 8 bytes.
/// let pixels = [255, 0, 0, 255, 0, 0, 9, 9, 0, 0, 255, 0, 0, 255];
/// let hash = encode_strided(&pixels, 2, 2, 8, 1, 2).unwrap();
/// assert_eq!(hash.len(), 8);
/// ```
pub fn encode_strided(
    pixels: &[u8],
    width: u32,
    height: u32,
    row_stride: usize,
    components_x: u32,
    components_y: u32,
) -> Result<String, BlurhashError> {
    let components = Components::new(components_x, components_y)?;
    let image = ImageRef::with_stride(pixels, width, height, row_stride)?;
    Encoder::new(components).encode(&image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_solid_black() {
        let pixels = vec![0u8; 4 * 4 * 3];
        let hash = encode(&pixels, 4, 4, 4, 3).unwrap();
        // Size flag 21 is 'L'; black has no AC energy so the scale is '0' and
        // every AC term packs levels (9, 9, 9) = 3429.
        assert_eq!(&hash[0..2], "L0");
        assert_eq!(&hash[2..6], "0000");
        assert!(hash[6..].as_bytes().chunks(2).all(|c| c == b"fQ"));
    }

    #[test]
    fn test_encode_solid_white_dc() {
        let pixels = vec![255u8; 4 * 4 * 3];
        let hash = encode(&pixels, 4, 4, 1, 1).unwrap();
        assert_eq!(hash, "00TSUA");
    }

    #[test]
    fn test_encode_component_count_validation() {
        let pixels = vec![0u8; 4 * 4 * 3];
        assert!(encode(&pixels, 4, 4, 0, 3).is_err());
        assert!(encode(&pixels, 4, 4, 10, 3).is_err());
        assert!(encode(&pixels, 4, 4, 4, 0).is_err());
        assert!(encode(&pixels, 4, 4, 4, 10).is_err());
    }

    #[test]
    fn test_components_checked_before_image() {
        // Both the components and the buffer are bad; components win.
        assert_eq!(
            encode(&[], 0, 0, 10, 3),
            Err(BlurhashError::InvalidComponentCount { component: "x", value: 10 })
        );
    }

    #[test]
    fn test_encode_pixel_buffer_validation() {
        let pixels = vec![0u8; 10];
        assert_eq!(
            encode(&pixels, 4, 4, 4, 3),
            Err(BlurhashError::BufferTooSmall { expected: 48, actual: 10 })
        );
    }

    #[test]
    fn test_encode_1x1_components() {
        let pixels = vec![100u8; 2 * 2 * 3];
        let hash = encode(&pixels, 2, 2, 1, 1).unwrap();
        assert_eq!(hash.len(), 6);
        assert_eq!(&hash[0..2], "00");
    }

    #[test]
    fn test_write_hash_matches_encode() {
        let mut pixels = vec![0u8; 8 * 3];
        for x in 0..8 {
            let val = (x * 32).min(255) as u8;
            pixels[x * 3..x * 3 + 3].copy_from_slice(&[val, val, val]);
        }
        let image = ImageRef::packed(&pixels, 8, 1).unwrap();
        let encoder = Encoder::new(Components::new(4, 1).unwrap());
        let grid = encoder.factors(&image).unwrap();
        assert_eq!(write_hash(&grid).unwrap(), encoder.encode(&image).unwrap());
    }

    #[test]
    fn test_encoder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Encoder<'static>>();
    }

    #[test]
    fn test_custom_lut_gives_same_hash() {
        let lut = SrgbLut::build();
        let pixels: Vec<u8> = (0..6 * 5 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let image = ImageRef::packed(&pixels, 6, 5).unwrap();
        let components = Components::new(3, 3).unwrap();
        let shared = Encoder::new(components).encode(&image).unwrap();
        let owned = Encoder::with_lut(components, &lut).encode(&image).unwrap();
        assert_eq!(shared, owned);
    }
}
