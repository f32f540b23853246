//! # blurhash-encode
//!
//! BlurHash encoding in pure Rust.
//!
//! [BlurHash](https://blurha.sh/) is a compact representation of a placeholder
//! for an image. This crate turns an 8-bit RGB pixel buffer into the short
//! ASCII string that describes it, producing the same characters as the
//! woltapp C encoder.
//!
//! ## Quick Start
//!
//! ```
//! use blurhash_encode::{components, encode};
//!
//! let pixels = vec![128u8; 4 * 4 * 3]; // 4x4 gray image
//! let hash = encode(&pixels, 4, 4, 4, 3).unwrap();
//! assert_eq!(hash.len(), 4 + 2 * 4 * 3);
//! assert_eq!(components(&hash).unwrap(), (4, 3));
//! ```
//!
//! ## Features
//!
//! - `parallel`: accumulate grid slots on the rayon thread pool. Output is
//!   bit-identical to the single-threaded loop.
//! - `simd`: separable accumulation with AVX2/NEON row dot products. Output
//!   may differ from the reference loop in the last bits of a coefficient.

pub mod base83;
pub mod basis;
pub mod color;
pub mod components;
pub mod error;
pub mod factors;
pub mod image;
pub mod quantize;
#[cfg(feature = "simd")]
pub mod simd;

mod encode_impl;

// Re-export primary functions at crate root.
pub use color::{linear_to_srgb, sign_pow, srgb_to_linear, SrgbLut};
pub use components::{components, Components};
pub use encode_impl::{encode, encode_strided, write_hash, Encoder};
pub use error::BlurhashError;
pub use factors::{FactorGrid, Strategy};
pub use image::ImageRef;
