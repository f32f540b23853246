use napi::bindgen_prelude::*;
use napi::Task;
use napi_derive::napi;

fn to_napi_err(e: blurhash_encode::BlurhashError) -> Error {
    Error::from_reason(e.to_string())
}

/// Encode image pixel data into a BlurHash string.
///
/// @param data - Raw pixel bytes in RGB order (length must be width * height * 3).
/// @param width - Image width in pixels.
/// @param height - Image height in pixels.
/// @param components_x - Number of horizontal components (1..=9, default 4).
/// @param components_y - Number of vertical components (1..=9, default 4).
/// @returns The BlurHash string.
#[napi]
pub fn encode(
    data: Buffer,
    width: u32,
    height: u32,
    components_x: Option<u32>,
    components_y: Option<u32>,
) -> Result<String> {
    let cx = components_x.unwrap_or(4);
    let cy = components_y.unwrap_or(4);
    blurhash_encode::encode(data.as_ref(), width, height, cx, cy).map_err(to_napi_err)
}

/// Encode from a Uint8Array (for browser/Deno compatibility).
///
/// @param data - Raw pixel bytes as Uint8Array in RGB order.
/// @param width - Image width in pixels.
/// @param height - Image height in pixels.
/// @param components_x - Number of horizontal components (1..=9, default 4).
/// @param components_y - Number of vertical components (1..=9, default 4).
/// @param row_stride - Bytes between row starts (default width * 3).
/// @returns The BlurHash string.
#[napi]
pub fn encode_from_uint8_array(
    data: Uint8Array,
    width: u32,
    height: u32,
    components_x: Option<u32>,
    components_y: Option<u32>,
    row_stride: Option<u32>,
) -> Result<String> {
    let cx = components_x.unwrap_or(4);
    let cy = components_y.unwrap_or(4);
    let stride = match row_stride {
        Some(stride) => stride as usize,
        None => blurhash_encode::image::packed_stride(width, height).map_err(to_napi_err)?,
    };
    blurhash_encode::encode_strided(data.as_ref(), width, height, stride, cx, cy)
        .map_err(to_napi_err)
}

/// Number of X and Y components encoded in a BlurHash string.
#[napi(object)]
pub struct Components {
    pub components_x: u32,
    pub components_y: u32,
}

/// Extract the number of X and Y components from a BlurHash string.
///
/// @param blurhash - The BlurHash string.
/// @returns An object with componentsX and componentsY fields.
#[napi]
pub fn get_components(blurhash: String) -> Result<Components> {
    let (cx, cy) = blurhash_encode::components(&blurhash).map_err(to_napi_err)?;
    Ok(Components {
        components_x: cx,
        components_y: cy,
    })
}

/// Convert an sRGB byte value (0-255) to linear RGB (0.0-1.0).
#[napi]
pub fn srgb_to_linear(value: u8) -> f64 {
    blurhash_encode::srgb_to_linear(value) as f64
}

/// Convert a linear RGB value (0.0-1.0) to an sRGB byte value (0-255).
#[napi]
pub fn linear_to_srgb(value: f64) -> u8 {
    blurhash_encode::linear_to_srgb(value as f32)
}

// --- Async version (runs on libuv thread pool) ---

pub struct EncodeTask {
    data: Vec<u8>,
    width: u32,
    height: u32,
    components_x: u32,
    components_y: u32,
}

impl Task for EncodeTask {
    type Output = String;
    type JsValue = String;

    fn compute(&mut self) -> Result<Self::Output> {
        blurhash_encode::encode(
            &self.data,
            self.width,
            self.height,
            self.components_x,
            self.components_y,
        )
        .map_err(to_napi_err)
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
        Ok(output)
    }
}

/// Async version of encode that runs on the libuv thread pool.
/// Returns a Promise<string>.
///
/// @param data - Raw pixel bytes in RGB order (length must be width * height * 3).
/// @param width - Image width in pixels.
/// @param height - Image height in pixels.
/// @param components_x - Number of horizontal components (1..=9, default 4).
/// @param components_y - Number of vertical components (1..=9, default 4).
/// @returns A Promise resolving to the BlurHash string.
#[napi]
pub fn encode_async(
    data: Buffer,
    width: u32,
    height: u32,
    components_x: Option<u32>,
    components_y: Option<u32>,
) -> AsyncTask<EncodeTask> {
    AsyncTask::new(EncodeTask {
        data: data.to_vec(),
        width,
        height,
        components_x: components_x.unwrap_or(4),
        components_y: components_y.unwrap_or(4),
    })
}
