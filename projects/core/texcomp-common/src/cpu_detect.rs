//! Helpers for CPU feature detection without using std.
//!
//! The SIMD-targeted BC7 kernels need SSE4.1. Detection goes through `cpufeatures`, which
//! runs `cpuid` once and caches the result, so calling these in a hot path is fine.
//!
//! With the `no-runtime-cpu-detection` feature the answer comes from the compile time
//! `target_feature` set instead.

/// Checks if the CPU supports SSE4.1 instructions.
///
/// # Returns
/// `true` if the CPU supports SSE4.1 instructions, `false` otherwise.
#[inline]
#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    not(feature = "no-runtime-cpu-detection")
))]
pub fn has_sse41() -> bool {
    cpufeatures::new!(cpuid_sse41, "sse4.1");
    cpuid_sse41::get()
}

/// Checks if the CPU supports SSE4.1 instructions, as decided at compile time.
#[inline]
#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    feature = "no-runtime-cpu-detection"
))]
pub fn has_sse41() -> bool {
    cfg!(target_feature = "sse4.1")
}

/// SSE4.1 does not exist outside of x86.
#[inline]
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
pub fn has_sse41() -> bool {
    false
}

/// Checks if the CPU supports AVX2 instructions.
#[inline]
#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    not(feature = "no-runtime-cpu-detection")
))]
pub fn has_avx2() -> bool {
    cpufeatures::new!(cpuid_avx2, "avx2");
    cpuid_avx2::get()
}

/// Checks if the CPU supports AVX2 instructions, as decided at compile time.
#[inline]
#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    feature = "no-runtime-cpu-detection"
))]
pub fn has_avx2() -> bool {
    cfg!(target_feature = "avx2")
}

/// AVX2 does not exist outside of x86.
#[inline]
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
pub fn has_avx2() -> bool {
    false
}
