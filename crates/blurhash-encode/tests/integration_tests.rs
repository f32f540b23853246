use blurhash_encode::{
    base83, components, encode, encode_strided, BlurhashError, Components, Encoder, ImageRef,
    SrgbLut,
};

// ---------------------------------------------------------------------------
// Known test vectors
// ---------------------------------------------------------------------------

/// Reference blurhash from the woltapp README.
const KNOWN_HASH: &str = "LEHV6nWB2yk8pyo0adR*.7kCMdnj";

/// Packed code of an AC term that quantizes to zero in every channel:
/// levels (9, 9, 9) = 3429.
const FLAT_AC: &str = "fQ";

/// Hashes produced by the woltapp C encoder for `gradient_image(32, 32)`.
const GRADIENT_32_4X3: &str = "LxG[[y2swxX8l}WDjte;gJfjfQfj";
const GRADIENT_32_9X9: &str = concat!(
    "|xG[[y2swxX8a|ofWpofWpl}WDjte;fQe;fQe;fQgJfjfQfjfQfjfQfjfQnmWpjtfQfQfQfQfQfQ",
    "f7fQfQfQfQfQfQfQfQofWpjtfQfQfQfQfQfQe;fQfQfQfQfQfQfQfQofWpjtfQfQfQfQfQfQe;",
    "fQfQfQfQfQfQfQfQ",
);

/// The woltapp C encoder's hash of a solid (128, 128, 128) 64x64 image at 4x4.
const GRAY_64_4X4: &str = "U0Eyb[~qfQ~q~qj[fQj[fQfQfQfQ~qj[fQj[";

// ---------------------------------------------------------------------------
// Helper: generate a synthetic gradient image (row-major, RGB u8)
// ---------------------------------------------------------------------------
fn gradient_image(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f64 / width as f64) * 255.0) as u8;
            let g = ((y as f64 / height as f64) * 255.0) as u8;
            let b = 128u8;
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
        }
    }
    pixels
}

/// Generate a solid-colour image.
fn solid_image(width: usize, height: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for _ in 0..(width * height) {
        pixels.push(r);
        pixels.push(g);
        pixels.push(b);
    }
    pixels
}

/// The two-character AC codes of a hash, in slot order starting at slot 1.
fn ac_codes(hash: &str) -> Vec<&str> {
    (6..hash.len()).step_by(2).map(|i| &hash[i..i + 2]).collect()
}

// ===========================================================================
// Hash layout
// ===========================================================================

#[test]
fn encode_gradient_4x3() {
    let img = gradient_image(32, 32);
    let hash = encode(&img, 32, 32, 4, 3).expect("encode ok");
    // Expected length: 4 + 2 * 4 * 3 = 28
    assert_eq!(hash.len(), 28);
    assert_eq!(&hash[0..1], "L");
}

#[test]
fn encode_every_component_count() {
    let img = gradient_image(32, 32);
    for cx in 1..=9 {
        for cy in 1..=9 {
            let hash = encode(&img, 32, 32, cx, cy)
                .unwrap_or_else(|e| panic!("encode failed for {cx}x{cy}: {e}"));
            let expected_len = 4 + 2 * cx as usize * cy as usize;
            assert_eq!(hash.len(), expected_len, "wrong hash length for {cx}x{cy}");
            assert_eq!(components(&hash).unwrap(), (cx, cy));
            assert!(
                hash.chars().all(base83::is_base83_char),
                "invalid base83 character in {hash}"
            );
        }
    }
}

#[test]
fn encode_only_base83_chars() {
    let img = gradient_image(16, 16);
    let hash = encode(&img, 16, 16, 4, 4).expect("encode ok");
    for ch in hash.chars() {
        assert!(
            base83::ALPHABET.contains(&(ch as u8)),
            "invalid base83 character in hash: '{ch}'"
        );
    }
}

#[test]
fn components_from_known_hash() {
    assert_eq!(components(KNOWN_HASH).expect("valid hash"), (4, 3));
}

#[test]
fn components_too_short() {
    assert_eq!(
        components("ABCDE"),
        Err(BlurhashError::InvalidLength {
            expected: 6,
            actual: 5
        })
    );
}

// ===========================================================================
// Known encodings
// ===========================================================================

#[test]
fn encode_white_pixel_dc_only() {
    let hash = encode(&[255, 255, 255], 1, 1, 1, 1).expect("encode ok");
    assert_eq!(hash, "00TSUA");
}

#[test]
fn encode_white_pixel_with_ac() {
    // Every basis function is 1 at the origin, so each AC term is 2.0: the
    // scale saturates at 82 and every channel lands on level 18.
    let hash = encode(&[255, 255, 255], 1, 1, 2, 1).expect("encode ok");
    assert_eq!(hash, "1~TSUA~q");
}

#[test]
fn encode_black_image_is_flat() {
    let img = solid_image(13, 9, 0, 0, 0);
    let hash = encode(&img, 13, 9, 5, 4).expect("encode ok");
    assert_eq!(&hash[1..6], "00000");
    assert!(ac_codes(&hash).iter().all(|&code| code == FLAT_AC));
}

#[test]
fn encode_gray_image_keeps_even_slots_flat() {
    let img = solid_image(64, 64, 128, 128, 128);
    let hash = encode(&img, 64, 64, 4, 4).expect("encode ok");
    // Leakage into odd frequencies stays below the first scale step.
    assert_eq!(&hash[1..2], "0");
    let codes = ac_codes(&hash);
    for slot in 1..16usize {
        let (y_freq, x_freq) = (slot / 4, slot % 4);
        if y_freq % 2 == 0 && x_freq % 2 == 0 {
            assert_eq!(codes[slot - 1], FLAT_AC, "slot ({y_freq},{x_freq})");
        }
    }
}

// The separable accumulator reassociates sums and may move a level, so the
// exact vectors hold for the reference and parallel strategies only.
#[cfg(not(feature = "simd"))]
#[test]
fn encode_matches_c_encoder_gradient() {
    let img = gradient_image(32, 32);
    assert_eq!(encode(&img, 32, 32, 4, 3).unwrap(), GRADIENT_32_4X3);
    assert_eq!(encode(&img, 32, 32, 9, 9).unwrap(), GRADIENT_32_9X9);
}

#[cfg(not(feature = "simd"))]
#[test]
fn encode_matches_c_encoder_solid_gray() {
    let img = solid_image(64, 64, 128, 128, 128);
    assert_eq!(encode(&img, 64, 64, 4, 4).unwrap(), GRAY_64_4X4);
}

#[test]
fn golden_vectors_are_well_formed() {
    assert_eq!(GRADIENT_32_9X9.len(), 166);
    assert_eq!(components(GRADIENT_32_9X9).unwrap(), (9, 9));
    assert_eq!(components(GRADIENT_32_4X3).unwrap(), (4, 3));
    assert_eq!(components(GRAY_64_4X4).unwrap(), (4, 4));
}

#[test]
fn encode_solid_colour_dc_round_trips() {
    for val in [0u8, 1, 50, 128, 200, 254, 255] {
        let hash = encode(&[val, val, val], 1, 1, 1, 1).expect("encode ok");
        let packed = (val as u64) << 16 | (val as u64) << 8 | val as u64;
        let expected = format!("00{}", base83::encode(packed, 4).unwrap());
        assert_eq!(hash, expected, "sRGB round trip failed for {val}");
    }
}

#[test]
fn encode_is_deterministic() {
    let img = gradient_image(16, 16);
    let hash1 = encode(&img, 16, 16, 4, 4).expect("encode ok");
    let hash2 = encode(&img, 16, 16, 4, 4).expect("encode ok");
    assert_eq!(hash1, hash2, "encoding should be deterministic");
}

// ===========================================================================
// Strides and reuse
// ===========================================================================

#[test]
fn encode_strided_matches_packed() {
    let (w, h) = (11usize, 7usize);
    let packed = gradient_image(w, h);
    let stride = w * 3 + 5;
    let mut padded = vec![0xEEu8; stride * (h - 1) + w * 3];
    for y in 0..h {
        padded[y * stride..y * stride + w * 3]
            .copy_from_slice(&packed[y * w * 3..(y + 1) * w * 3]);
    }
    let a = encode(&packed, w as u32, h as u32, 4, 3).unwrap();
    let b = encode_strided(&padded, w as u32, h as u32, stride, 4, 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn encode_strided_with_packed_stride() {
    let img = gradient_image(8, 8);
    assert_eq!(
        encode(&img, 8, 8, 3, 3).unwrap(),
        encode_strided(&img, 8, 8, 24, 3, 3).unwrap()
    );
}

#[test]
fn encoder_can_be_reused() {
    let encoder = Encoder::new(Components::new(4, 3).unwrap());
    let a = gradient_image(20, 10);
    let b = solid_image(5, 5, 10, 200, 30);
    let hash_a = encoder.encode(&ImageRef::packed(&a, 20, 10).unwrap()).unwrap();
    let hash_b = encoder.encode(&ImageRef::packed(&b, 5, 5).unwrap()).unwrap();
    assert_eq!(hash_a, encode(&a, 20, 10, 4, 3).unwrap());
    assert_eq!(hash_b, encode(&b, 5, 5, 4, 3).unwrap());
}

#[test]
fn encoder_with_private_lut() {
    let lut = SrgbLut::build();
    let img = gradient_image(9, 9);
    let encoder = Encoder::with_lut(Components::new(2, 2).unwrap(), &lut);
    let hash = encoder.encode(&ImageRef::packed(&img, 9, 9).unwrap()).unwrap();
    assert_eq!(hash, encode(&img, 9, 9, 2, 2).unwrap());
}

#[test]
fn concurrent_encodes_agree() {
    let img = gradient_image(40, 30);
    let expected = encode(&img, 40, 30, 5, 5).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| encode(&img, 40, 30, 5, 5).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn encode_invalid_components_zero() {
    let img = gradient_image(8, 8);
    assert_eq!(
        encode(&img, 8, 8, 0, 4),
        Err(BlurhashError::InvalidComponentCount {
            component: "x",
            value: 0
        })
    );
    assert_eq!(
        encode(&img, 8, 8, 4, 0),
        Err(BlurhashError::InvalidComponentCount {
            component: "y",
            value: 0
        })
    );
}

#[test]
fn encode_invalid_components_too_large() {
    let img = gradient_image(8, 8);
    assert!(encode(&img, 8, 8, 10, 4).is_err());
    assert!(encode(&img, 8, 8, 4, 10).is_err());
}

#[test]
fn encode_zero_dimensions() {
    assert!(matches!(
        encode(&[], 0, 4, 4, 3),
        Err(BlurhashError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        encode(&[], 4, 0, 4, 3),
        Err(BlurhashError::InvalidDimensions { .. })
    ));
}

#[test]
fn encode_short_buffer() {
    let img = gradient_image(4, 4);
    assert_eq!(
        encode(&img[..47], 4, 4, 4, 3),
        Err(BlurhashError::BufferTooSmall {
            expected: 48,
            actual: 47
        })
    );
}

#[test]
fn encode_strided_rejects_short_stride() {
    let img = gradient_image(4, 4);
    assert!(matches!(
        encode_strided(&img, 4, 4, 11, 4, 3),
        Err(BlurhashError::InvalidDimensions { .. })
    ));
}

// ===========================================================================
// Edge cases
// ===========================================================================

#[test]
fn encode_single_row_and_column() {
    let row = gradient_image(32, 1);
    assert_eq!(encode(&row, 32, 1, 9, 9).unwrap().len(), 166);
    let column = gradient_image(1, 32);
    assert_eq!(encode(&column, 1, 32, 9, 9).unwrap().len(), 166);
}

#[test]
fn encode_large_image_256x256() {
    let img = gradient_image(256, 256);
    let hash = encode(&img, 256, 256, 4, 4).expect("encode ok");
    assert_eq!(hash.len(), 4 + 2 * 4 * 4);
}
