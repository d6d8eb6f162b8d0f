// SIMD kernels for prefix scoring
// Every funnel round is a batch of dot products over equal-length prefixes,
// so only the dot product is vectorized; norms are derived from it.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

// Below this length the dispatch overhead outweighs the wide loads
#[cfg(target_arch = "x86_64")]
const MIN_DIM_SIZE_AVX: usize = 32;

#[cfg(target_arch = "aarch64")]
const MIN_DIM_SIZE_NEON: usize = 16;

/// Dot product of two equal-length slices.
///
/// Returns 0.0 when the lengths differ. Dispatches to AVX2/FMA on x86_64 and
/// NEON on aarch64, falling back to a two-accumulator scalar loop.
#[inline]
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if a.len() >= MIN_DIM_SIZE_AVX
            && is_x86_feature_detected!("avx2")
            && is_x86_feature_detected!("fma")
        {
            return unsafe { dot_product_avx2(a, b) };
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if a.len() >= MIN_DIM_SIZE_NEON && std::arch::is_aarch64_feature_detected!("neon") {
            return unsafe { dot_product_neon(a, b) };
        }
    }

    dot_product_scalar(a, b)
}

/// AVX2 dot product, 16 lanes per iteration across two registers
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
unsafe fn dot_product_avx2(a: &[f32], b: &[f32]) -> f32 {
    let dim = a.len();
    let mut i = 0;

    let mut acc_lo = _mm256_setzero_ps();
    let mut acc_hi = _mm256_setzero_ps();

    while i + 16 <= dim {
        let a_lo = _mm256_loadu_ps(a.as_ptr().add(i));
        let b_lo = _mm256_loadu_ps(b.as_ptr().add(i));
        let a_hi = _mm256_loadu_ps(a.as_ptr().add(i + 8));
        let b_hi = _mm256_loadu_ps(b.as_ptr().add(i + 8));

        acc_lo = _mm256_fmadd_ps(a_lo, b_lo, acc_lo);
        acc_hi = _mm256_fmadd_ps(a_hi, b_hi, acc_hi);

        i += 16;
    }

    let acc = _mm256_add_ps(acc_lo, acc_hi);
    let upper = _mm256_extractf128_ps(acc, 1);
    let lower = _mm256_castps256_ps128(acc);
    let mut sum = _mm_add_ps(upper, lower);
    sum = _mm_hadd_ps(sum, sum);
    sum = _mm_hadd_ps(sum, sum);

    let mut dot = _mm_cvtss_f32(sum);
    while i < dim {
        dot += a[i] * b[i];
        i += 1;
    }
    dot
}

/// NEON dot product, 8 lanes per iteration across two registers
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn dot_product_neon(a: &[f32], b: &[f32]) -> f32 {
    let dim = a.len();
    let mut i = 0;

    let mut acc_lo = vdupq_n_f32(0.0);
    let mut acc_hi = vdupq_n_f32(0.0);

    while i + 8 <= dim {
        let a_lo = vld1q_f32(a.as_ptr().add(i));
        let b_lo = vld1q_f32(b.as_ptr().add(i));
        let a_hi = vld1q_f32(a.as_ptr().add(i + 4));
        let b_hi = vld1q_f32(b.as_ptr().add(i + 4));

        acc_lo = vfmaq_f32(acc_lo, a_lo, b_lo);
        acc_hi = vfmaq_f32(acc_hi, a_hi, b_hi);

        i += 8;
    }

    let mut dot = vaddvq_f32(vaddq_f32(acc_lo, acc_hi));
    while i < dim {
        dot += a[i] * b[i];
        i += 1;
    }
    dot
}

/// Scalar fallback with two accumulators
#[inline]
fn dot_product_scalar(a: &[f32], b: &[f32]) -> f32 {
    let mut even = 0.0f32;
    let mut odd = 0.0f32;

    let a_pairs = a.chunks_exact(2);
    let tail = a_pairs.remainder();
    for (pa, pb) in a_pairs.zip(b.chunks_exact(2)) {
        even += pa[0] * pb[0];
        odd += pa[1] * pb[1];
    }
    if let (Some(x), Some(y)) = (tail.first(), b.last()) {
        even += x * y;
    }

    even + odd
}

/// Squared Euclidean length
#[inline]
pub fn norm_squared_simd(v: &[f32]) -> f32 {
    dot_product_simd(v, v)
}

/// Euclidean length
#[inline]
pub fn norm_simd(v: &[f32]) -> f32 {
    norm_squared_simd(v).sqrt()
}
