use super::assign_indices_body;

#[inline]
pub(crate) fn assign_indices(pixels: &[[u8; 4]], palette: &[[u8; 4]], indices: &mut [u8; 16]) -> u32 {
    assign_indices_body(pixels, palette, indices)
}
