//! Cosine basis weights along one image axis.

use std::f64::consts::PI;

use crate::error::BlurhashError;

/// `cos(PI * freq * pos / len)` for every frequency and axis position.
///
/// Stored frequency-major, so the weights of one frequency across the whole
/// axis are contiguous. Frequency 0 is 1.0 everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct CosineTable {
    len: usize,
    components: usize,
    weights: Vec<f32>,
}

impl CosineTable {
    /// Build the table for an axis of `len` pixels and `components`
    /// frequencies.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::AllocationFailure`] if the weights cannot be
    /// allocated.
    pub fn new(len: usize, components: usize) -> Result<Self, BlurhashError> {
        let count = len.saturating_mul(components);
        let mut weights = Vec::new();
        weights
            .try_reserve_exact(count)
            .map_err(|_| BlurhashError::AllocationFailure {
                bytes: count.saturating_mul(std::mem::size_of::<f32>()),
            })?;

        let lenf = len as f64;
        for freq in 0..components {
            // The argument is formed in double precision, the cosine in single.
            weights.extend(
                (0..len).map(|pos| ((PI * freq as f64 * pos as f64 / lenf) as f32).cos()),
            );
        }

        Ok(Self {
            len,
            components,
            weights,
        })
    }

    /// Number of positions along the axis.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for a zero-length axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of frequencies.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Weights of `freq` at every position along the axis.
    #[inline]
    pub fn frequency(&self, freq: usize) -> &[f32] {
        &self.weights[freq * self.len..(freq + 1) * self.len]
    }

    /// Weight of `freq` at `pos`.
    #[inline]
    pub fn weight(&self, freq: usize, pos: usize) -> f32 {
        self.weights[freq * self.len + pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_row_is_constant_one() {
        let table = CosineTable::new(7, 3).unwrap();
        assert!(table.frequency(0).iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_shape() {
        let table = CosineTable::new(5, 4).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.components(), 4);
        for freq in 0..4 {
            assert_eq!(table.frequency(freq).len(), 5);
        }
    }

    #[test]
    fn test_known_weights() {
        let table = CosineTable::new(4, 3).unwrap();
        // freq 1 over 4 positions: cos(0), cos(pi/4), cos(pi/2), cos(3pi/4)
        let expected = [1.0f32, 0.707_106_8, 0.0, -0.707_106_8];
        for (pos, &want) in expected.iter().enumerate() {
            assert!((table.weight(1, pos) - want).abs() < 1e-6, "pos {pos}");
        }
        // freq 2, pos 1: cos(pi/2)
        assert!(table.weight(2, 1).abs() < 1e-6);
        assert!((table.weight(2, 2) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_pixel_axis() {
        let table = CosineTable::new(1, 9).unwrap();
        for freq in 0..9 {
            assert_eq!(table.weight(freq, 0), 1.0);
        }
    }

    #[test]
    fn test_weight_matches_frequency_slice() {
        let table = CosineTable::new(13, 5).unwrap();
        for freq in 0..5 {
            for pos in 0..13 {
                assert_eq!(table.weight(freq, pos), table.frequency(freq)[pos]);
            }
        }
    }
}
