//! BlurHash Demo - Encode a synthetic image
//!
//! Run with: cargo run --example demo

use blurhash_encode::{components, encode, Components, Encoder, ImageRef};

fn main() {
    println!("=== BlurHash Demo ===\n");

    // Create a simple 4x4 gradient image (RGB)
    // Red grows left to right, green top to bottom.
    let width = 4;
    let height = 4;
    let mut pixels = Vec::with_capacity(width * height * 3);

    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / (width - 1) as f32) * 255.0) as u8;
            let g = ((y as f32 / (height - 1) as f32) * 255.0) as u8;
            let b = 128;
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
        }
    }

    println!("1. Created a {}x{} gradient image", width, height);
    println!("   Pixels (first 12 bytes): {:?}...\n", &pixels[..12]);

    // Encode to BlurHash
    let components_x = 4;
    let components_y = 3;
    let hash = encode(&pixels, width as u32, height as u32, components_x, components_y)
        .expect("Failed to encode");

    println!("2. Encoded to BlurHash: {}", hash);
    println!("   Components: {}x{}", components_x, components_y);
    println!("   Hash length: {} characters\n", hash.len());

    // Extract components from hash
    let (cx, cy) = components(&hash).expect("Failed to get components");
    println!("3. Extracted components from hash: {}x{}\n", cx, cy);

    // Inspect the coefficients behind the hash
    let encoder = Encoder::new(Components::new(cx, cy).expect("valid components"));
    let image = ImageRef::packed(&pixels, width as u32, height as u32).expect("valid image");
    let grid = encoder.factors(&image).expect("Failed to accumulate");
    let dc = grid.dc();
    println!("4. Mean linear colour: ({:.4}, {:.4}, {:.4})", dc[0], dc[1], dc[2]);
    println!("   First AC term: {:?}", grid.ac()[0]);

    println!("\n=== Demo Complete ===");
    println!("\nTry `blurhash 4 3 photo.jpg` on your own images!");
}
