/// A `width` x `height` RGBA8 test image: diagonal gradients, xorshift noise and an alpha ramp.
pub fn synthesize_image(width: usize, height: usize) -> Vec<u8> {
    let mut state = 0x1234_5678u32;
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state & 0x0F) as usize;
            data.push(((x * 255) / width.max(1)) as u8);
            data.push(((y * 255) / height.max(1)) as u8);
            data.push((((x + y) * 4 + noise) & 0xFF) as u8);
            data.push((255 - (y * 64) / height.max(1)) as u8);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_sized() {
        let a = synthesize_image(12, 8);
        assert_eq!(a.len(), 12 * 8 * 4);
        assert_eq!(a, synthesize_image(12, 8));
    }
}
