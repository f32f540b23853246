//! Coefficient accumulation: projecting an image onto the cosine basis.
//!
//! For every slot `(y_freq, x_freq)` of the component grid the accumulator
//! sums `cos_y[y_freq][py] * cos_x[x_freq][px] * linear(pixel)` over all
//! pixels, then scales the sum by `1 / (W * H)` for the DC slot and
//! `2 / (W * H)` for every AC slot.
//!
//! The reference order is row-major pixel traversal, accumulating each
//! slot as pixels arrive. [`Strategy::Parallel`] visits pixels in the same
//! order per slot and is bit-identical to [`Strategy::Reference`];
//! [`Strategy::Separable`] sums each row before weighting it and agrees only
//! up to floating-point reassociation.

use tracing::trace;

use crate::basis::CosineTable;
use crate::color::SrgbLut;
use crate::components::Components;
use crate::error::BlurhashError;
use crate::image::{ImageRef, BYTES_PER_PIXEL};

/// One linear-light coefficient: `[r, g, b]`.
pub type Rgb = [f32; 3];

/// How the accumulation loop is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Strategy {
    /// Single-threaded pixel-major loop; output matches the woltapp C encoder.
    Reference,
    /// One rayon task per slot, same per-slot summation order as `Reference`.
    #[cfg(feature = "parallel")]
    Parallel,
    /// Per-row vectorized dot products, then weighted by the y basis.
    #[cfg(feature = "simd")]
    Separable,
}

impl Default for Strategy {
    fn default() -> Self {
        #[cfg(feature = "simd")]
        {
            Strategy::Separable
        }
        #[cfg(all(feature = "parallel", not(feature = "simd")))]
        {
            Strategy::Parallel
        }
        #[cfg(not(any(feature = "parallel", feature = "simd")))]
        {
            Strategy::Reference
        }
    }
}

/// Normalized coefficients for every slot of a component grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorGrid {
    components: Components,
    slots: Vec<Rgb>,
}

impl FactorGrid {
    fn zeroed(components: Components) -> Result<Self, BlurhashError> {
        let count = components.count();
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(count)
            .map_err(|_| BlurhashError::AllocationFailure {
                bytes: count * std::mem::size_of::<Rgb>(),
            })?;
        slots.resize(count, [0.0; 3]);
        Ok(Self { components, slots })
    }

    /// The grid's dimensions.
    #[inline]
    pub fn components(&self) -> Components {
        self.components
    }

    /// Coefficient of frequency pair `(y_freq, x_freq)`.
    ///
    /// # Panics
    ///
    /// Panics if either frequency is outside the grid.
    #[inline]
    pub fn get(&self, y_freq: usize, x_freq: usize) -> Rgb {
        assert!(
            x_freq < self.components.x() as usize,
            "x frequency {x_freq} outside grid"
        );
        self.slots[self.components.slot(y_freq, x_freq)]
    }

    /// The DC term, i.e. the mean linear color.
    #[inline]
    pub fn dc(&self) -> Rgb {
        self.slots[0]
    }

    /// AC terms in wire order (slot 1 onwards).
    #[inline]
    pub fn ac(&self) -> &[Rgb] {
        &self.slots[1..]
    }

    /// All slots in wire order, DC first.
    #[inline]
    pub fn as_slice(&self) -> &[Rgb] {
        &self.slots
    }

    fn normalize(&mut self, width: u32, height: u32) {
        let area = (width as u64 * height as u64) as f32;
        for (slot, factor) in self.slots.iter_mut().enumerate() {
            let normalisation = if slot == 0 { 1.0f32 } else { 2.0 };
            let scale = normalisation / area;
            for channel in factor.iter_mut() {
                *channel *= scale;
            }
        }
    }
}

/// Project `image` onto the cosine basis using the default [`Strategy`].
///
/// # Errors
///
/// Returns [`BlurhashError::AllocationFailure`] if a working table cannot be
/// allocated.
pub fn accumulate(
    image: &ImageRef<'_>,
    components: Components,
    lut: &SrgbLut,
) -> Result<FactorGrid, BlurhashError> {
    accumulate_with(image, components, lut, Strategy::default())
}

/// Project `image` onto the cosine basis using a specific [`Strategy`].
///
/// # Errors
///
/// Returns [`BlurhashError::AllocationFailure`] if a working table cannot be
/// allocated.
pub fn accumulate_with(
    image: &ImageRef<'_>,
    components: Components,
    lut: &SrgbLut,
    strategy: Strategy,
) -> Result<FactorGrid, BlurhashError> {
    let cos_x = CosineTable::new(image.width() as usize, components.x() as usize)?;
    let cos_y = CosineTable::new(image.height() as usize, components.y() as usize)?;
    let mut grid = FactorGrid::zeroed(components)?;
    let basis = Basis {
        cos_x: &cos_x,
        cos_y: &cos_y,
        components,
    };

    trace!(?strategy, slots = components.count(), "accumulating coefficients");
    match strategy {
        Strategy::Reference => accumulate_reference(image, &basis, lut, &mut grid.slots),
        #[cfg(feature = "parallel")]
        Strategy::Parallel => accumulate_parallel(image, &basis, lut, &mut grid.slots),
        #[cfg(feature = "simd")]
        Strategy::Separable => accumulate_separable(image, &basis, lut, &mut grid.slots)?,
    }

    grid.normalize(image.width(), image.height());
    Ok(grid)
}

struct Basis<'t> {
    cos_x: &'t CosineTable,
    cos_y: &'t CosineTable,
    components: Components,
}

#[inline]
fn rgb_at(chunk: &[u8]) -> [u8; 3] {
    [chunk[0], chunk[1], chunk[2]]
}

fn accumulate_reference(
    image: &ImageRef<'_>,
    basis: &Basis<'_>,
    lut: &SrgbLut,
    slots: &mut [Rgb],
) {
    let cx = basis.components.x() as usize;
    for (py, row) in image.rows().enumerate() {
        for (px, chunk) in row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            let pixel = lut.pixel(rgb_at(chunk));
            for (slot, factor) in slots.iter_mut().enumerate() {
                let weight =
                    basis.cos_y.weight(slot / cx, py) * basis.cos_x.weight(slot % cx, px);
                factor[0] += weight * pixel[0];
                factor[1] += weight * pixel[1];
                factor[2] += weight * pixel[2];
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn accumulate_parallel(
    image: &ImageRef<'_>,
    basis: &Basis<'_>,
    lut: &SrgbLut,
    slots: &mut [Rgb],
) {
    use rayon::prelude::*;

    slots.par_iter_mut().enumerate().for_each(|(slot, factor)| {
        let (y_freq, x_freq) = basis.components.frequencies(slot);
        let weights_x = basis.cos_x.frequency(x_freq);
        let weights_y = basis.cos_y.frequency(y_freq);
        let mut sum = [0.0f32; 3];
        for (row, &wy) in image.rows().zip(weights_y) {
            for (chunk, &wx) in row.chunks_exact(BYTES_PER_PIXEL).zip(weights_x) {
                let pixel = lut.pixel(rgb_at(chunk));
                let weight = wy * wx;
                sum[0] += weight * pixel[0];
                sum[1] += weight * pixel[1];
                sum[2] += weight * pixel[2];
            }
        }
        *factor = sum;
    });
}

#[cfg(feature = "simd")]
fn accumulate_separable(
    image: &ImageRef<'_>,
    basis: &Basis<'_>,
    lut: &SrgbLut,
    slots: &mut [Rgb],
) -> Result<(), BlurhashError> {
    use crate::simd::dot_product_3ch_f32;

    let width = image.width() as usize;
    let cx = basis.components.x() as usize;

    // R, G and B planes of the current row.
    let plane_len = 3 * width;
    let mut scratch: Vec<f32> = Vec::new();
    scratch
        .try_reserve_exact(plane_len)
        .map_err(|_| BlurhashError::AllocationFailure {
            bytes: plane_len * std::mem::size_of::<f32>(),
        })?;
    scratch.resize(plane_len, 0.0);
    let (r, rest) = scratch.split_at_mut(width);
    let (g, b) = rest.split_at_mut(width);
    let mut row_sums = [[0.0f32; 3]; crate::components::MAX_COMPONENTS as usize];

    for (py, row) in image.rows().enumerate() {
        for (px, chunk) in row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            r[px] = lut.to_linear(chunk[0]);
            g[px] = lut.to_linear(chunk[1]);
            b[px] = lut.to_linear(chunk[2]);
        }
        for (x_freq, sums) in row_sums.iter_mut().enumerate().take(cx) {
            let weights = basis.cos_x.frequency(x_freq);
            let (sr, sg, sb) = dot_product_3ch_f32(weights, r, g, b, width);
            *sums = [sr, sg, sb];
        }
        for (slot, factor) in slots.iter_mut().enumerate() {
            let (y_freq, x_freq) = basis.components.frequencies(slot);
            let wy = basis.cos_y.weight(y_freq, py);
            let sums = row_sums[x_freq];
            factor[0] += wy * sums[0];
            factor[1] += wy * sums[1];
            factor[2] += wy * sums[2];
        }
    }
    Ok(())
}
