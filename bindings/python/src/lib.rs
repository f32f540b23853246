use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Convert a `BlurhashError` into a Python `ValueError`.
fn to_py_err(e: blurhash_encode::BlurhashError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Encode image pixel data into a BlurHash string.
///
/// Args:
///     data: Raw pixel bytes in RGB order.
///     width: Image width in pixels.
///     height: Image height in pixels.
///     components_x: Number of horizontal components (1..=9).
///     components_y: Number of vertical components (1..=9).
///     row_stride: Bytes between the starts of consecutive rows
///         (default width * 3).
///
/// Returns:
///     The BlurHash string.
#[pyfunction]
#[pyo3(signature = (data, width, height, components_x = 4, components_y = 4, row_stride = None))]
fn encode(
    py: Python<'_>,
    data: &[u8],
    width: u32,
    height: u32,
    components_x: u32,
    components_y: u32,
    row_stride: Option<usize>,
) -> PyResult<String> {
    let stride = match row_stride {
        Some(stride) => stride,
        None => blurhash_encode::image::packed_stride(width, height).map_err(to_py_err)?,
    };
    py.allow_threads(|| {
        blurhash_encode::encode_strided(data, width, height, stride, components_x, components_y)
    })
    .map_err(to_py_err)
}

/// Extract the number of X and Y components from a BlurHash string.
///
/// Args:
///     blurhash: The BlurHash string.
///
/// Returns:
///     A tuple (components_x, components_y).
#[pyfunction]
fn components(blurhash: &str) -> PyResult<(u32, u32)> {
    blurhash_encode::components(blurhash).map_err(to_py_err)
}

/// Convert an sRGB byte value (0-255) to linear RGB (0.0-1.0).
#[pyfunction]
fn srgb_to_linear(value: u8) -> f32 {
    blurhash_encode::srgb_to_linear(value)
}

/// Convert a linear RGB value (0.0-1.0) to an sRGB byte value (0-255).
#[pyfunction]
fn linear_to_srgb(value: f32) -> u8 {
    blurhash_encode::linear_to_srgb(value)
}

/// BlurHash encoding (Rust-powered).
#[pymodule]
fn blurhash(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(components, m)?)?;
    m.add_function(wrap_pyfunction!(srgb_to_linear, m)?)?;
    m.add_function(wrap_pyfunction!(linear_to_srgb, m)?)?;
    Ok(())
}
