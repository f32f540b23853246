//! SIMD-accelerated inner loop for the separable accumulator.
//!
//! Provides platform-specific implementations of the row dot product used by
//! [`Strategy::Separable`](crate::factors::Strategy). Falls back to scalar
//! code on unsupported platforms. Lane-wise summation reassociates the
//! additions, so results differ from the scalar loop in the last bits.

/// Compute three dot products simultaneously (one per color channel).
///
/// Returns (sum_r, sum_g, sum_b) where:
///   sum_c = sum_x(cos_row[x] * channel[x]) for c in {r, g, b}
///
/// # Panics
///
/// Panics if any slice is shorter than `len`.
#[inline]
pub fn dot_product_3ch_f32(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> (f32, f32, f32) {
    assert!(
        cos_row.len() >= len && r_row.len() >= len && g_row.len() >= len && b_row.len() >= len,
        "dot product rows shorter than {len}"
    );

    #[cfg(target_arch = "aarch64")]
    {
        // NEON is always available on aarch64.
        unsafe { dot_product_3ch_neon(cos_row, r_row, g_row, b_row, len) }
    }

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            // SAFETY: the required CPU features were detected above and the
            // slice lengths were checked on entry.
            unsafe { dot_product_3ch_avx2(cos_row, r_row, g_row, b_row, len) }
        } else {
            dot_product_3ch_scalar(cos_row, r_row, g_row, b_row, len)
        }
    }

    #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
    {
        dot_product_3ch_scalar(cos_row, r_row, g_row, b_row, len)
    }
}

/// Scalar fallback for 3-channel dot product.
#[inline]
#[allow(dead_code)]
fn dot_product_3ch_scalar(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> (f32, f32, f32) {
    let mut sr = 0.0f32;
    let mut sg = 0.0f32;
    let mut sb = 0.0f32;
    for i in 0..len {
        let c = cos_row[i];
        sr += c * r_row[i];
        sg += c * g_row[i];
        sb += c * b_row[i];
    }
    (sr, sg, sb)
}

/// NEON-accelerated 3-channel dot product.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn dot_product_3ch_neon(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> (f32, f32, f32) {
    use std::arch::aarch64::*;

    let cp = cos_row.as_ptr();
    let rp = r_row.as_ptr();
    let gp = g_row.as_ptr();
    let bp = b_row.as_ptr();

    let mut acc_r = vdupq_n_f32(0.0);
    let mut acc_g = vdupq_n_f32(0.0);
    let mut acc_b = vdupq_n_f32(0.0);

    let chunks = len / 4;
    let tail_start = chunks * 4;

    for c in 0..chunks {
        let offset = c * 4;
        let cv = vld1q_f32(cp.add(offset));
        let rv = vld1q_f32(rp.add(offset));
        let gv = vld1q_f32(gp.add(offset));
        let bv = vld1q_f32(bp.add(offset));
        acc_r = vfmaq_f32(acc_r, cv, rv);
        acc_g = vfmaq_f32(acc_g, cv, gv);
        acc_b = vfmaq_f32(acc_b, cv, bv);
    }

    let mut sr = vaddvq_f32(acc_r);
    let mut sg = vaddvq_f32(acc_g);
    let mut sb = vaddvq_f32(acc_b);

    for i in tail_start..len {
        let c = *cp.add(i);
        sr += c * *rp.add(i);
        sg += c * *gp.add(i);
        sb += c * *bp.add(i);
    }

    (sr, sg, sb)
}

/// AVX2-accelerated 3-channel dot product.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn dot_product_3ch_avx2(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> (f32, f32, f32) {
    use std::arch::x86_64::*;

    let cp = cos_row.as_ptr();
    let rp = r_row.as_ptr();
    let gp = g_row.as_ptr();
    let bp = b_row.as_ptr();

    let mut acc_r = _mm256_setzero_ps();
    let mut acc_g = _mm256_setzero_ps();
    let mut acc_b = _mm256_setzero_ps();

    let chunks = len / 8;
    let tail_start = chunks * 8;

    for c in 0..chunks {
        let offset = c * 8;
        let cv = _mm256_loadu_ps(cp.add(offset));
        let rv = _mm256_loadu_ps(rp.add(offset));
        let gv = _mm256_loadu_ps(gp.add(offset));
        let bv = _mm256_loadu_ps(bp.add(offset));
        acc_r = _mm256_fmadd_ps(cv, rv, acc_r);
        acc_g = _mm256_fmadd_ps(cv, gv, acc_g);
        acc_b = _mm256_fmadd_ps(cv, bv, acc_b);
    }

    #[inline(always)]
    unsafe fn hsum_avx2(v: __m256) -> f32 {
        let hi = _mm256_extractf128_ps(v, 1);
        let lo = _mm256_castps256_ps128(v);
        let sum128 = _mm_add_ps(lo, hi);
        let shuf = _mm_movehdup_ps(sum128);
        let sums = _mm_add_ps(sum128, shuf);
        let shuf2 = _mm_movehl_ps(sums, sums);
        let sums2 = _mm_add_ss(sums, shuf2);
        _mm_cvtss_f32(sums2)
    }

    let mut sr = hsum_avx2(acc_r);
    let mut sg = hsum_avx2(acc_g);
    let mut sb = hsum_avx2(acc_b);

    for i in tail_start..len {
        let c = *cp.add(i);
        sr += c * *rp.add(i);
        sg += c * *gp.add(i);
        sb += c * *bp.add(i);
    }

    (sr, sg, sb)
}
