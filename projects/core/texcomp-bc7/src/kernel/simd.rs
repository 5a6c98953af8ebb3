use super::assign_indices_body;
use multiversion::multiversion;

#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
#[inline(never)] // keep one dispatch per call, not per inlined site.
pub(crate) fn assign_indices(pixels: &[[u8; 4]], palette: &[[u8; 4]], indices: &mut [u8; 16]) -> u32 {
    assign_indices_body(pixels, palette, indices)
}
