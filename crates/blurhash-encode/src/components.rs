//! Component-grid configuration and the size flag that carries it.

use crate::base83;
use crate::error::BlurhashError;

/// Smallest and largest component count per axis.
pub const MIN_COMPONENTS: u32 = 1;
/// See [`MIN_COMPONENTS`].
pub const MAX_COMPONENTS: u32 = 9;

/// Number of cosine components along each axis, validated to 1..=9.
///
/// Slots of the grid are numbered `y * x_count + x`, so the x frequency
/// varies fastest. That order is the order AC terms appear in a hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Components {
    x: u32,
    y: u32,
}

impl Components {
    /// Validate a pair of component counts.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::InvalidComponentCount`] naming the first
    /// axis outside 1..=9.
    pub fn new(x: u32, y: u32) -> Result<Self, BlurhashError> {
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&x) {
            return Err(BlurhashError::InvalidComponentCount {
                component: "x",
                value: x,
            });
        }
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&y) {
            return Err(BlurhashError::InvalidComponentCount {
                component: "y",
                value: y,
            });
        }
        Ok(Self { x, y })
    }

    /// Horizontal component count.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Vertical component count.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Total number of coefficient slots, DC included.
    #[inline]
    pub fn count(&self) -> usize {
        (self.x * self.y) as usize
    }

    /// Slot index of frequency pair `(y_freq, x_freq)`.
    #[inline]
    pub fn slot(&self, y_freq: usize, x_freq: usize) -> usize {
        y_freq * self.x as usize + x_freq
    }

    /// Frequency pair `(y_freq, x_freq)` of a slot index.
    #[inline]
    pub fn frequencies(&self, slot: usize) -> (usize, usize) {
        (slot / self.x as usize, slot % self.x as usize)
    }

    /// The single-digit header value `(x - 1) + (y - 1) * 9`.
    #[inline]
    pub fn size_flag(&self) -> u32 {
        (self.x - 1) + (self.y - 1) * 9
    }

    /// Inverse of [`Components::size_flag`].
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::InvalidComponentCount`] if the flag is 81 or
    /// larger, which would put the y count past 9.
    pub fn from_size_flag(flag: u32) -> Result<Self, BlurhashError> {
        Self::new(flag % 9 + 1, flag / 9 + 1)
    }

    /// Length of a hash produced with these components.
    #[inline]
    pub fn hash_len(&self) -> usize {
        2 + 4 + 2 * (self.count() - 1)
    }
}

/// Extract the number of X and Y components from a BlurHash string.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidLength`] if the string is shorter than 6
/// characters, or a base83 error if the first character is not a digit.
///
/// # Examples
///
/// ```
/// use blurhash_encode::components;
/// let (cx, cy) = components("LEHV6nWB2yk8pyo0adR*.7kCMdnj").unwrap();
/// assert_eq!((cx, cy), (4, 3));
/// ```
pub fn components(blurhash: &str) -> Result<(u32, u32), BlurhashError> {
    if blurhash.len() < 6 {
        return Err(BlurhashError::InvalidLength {
            expected: 6,
            actual: blurhash.len(),
        });
    }
    let head = blurhash
        .chars()
        .next()
        .ok_or(BlurhashError::InvalidLength {
            expected: 6,
            actual: 0,
        })?;
    let mut digit = [0u8; 4];
    let flag = base83::decode(head.encode_utf8(&mut digit))?;
    let parsed = Components::from_size_flag(flag as u32)?;
    Ok((parsed.x(), parsed.y()))
}
