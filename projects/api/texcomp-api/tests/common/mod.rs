//! Images shared by the integration tests.
#![allow(dead_code)]

/// A `width` x `height` RGBA8 image with gradients, noise and varying alpha.
pub fn test_image(width: usize, height: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9u32;
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state & 0x1F) as usize;
            data.push(((x * 7 + y * 3 + noise) & 0xFF) as u8);
            data.push(((y * 255) / height) as u8);
            data.push((((width - x) * 255) / width) as u8);
            data.push(if (x / 4 + y / 4) % 3 == 0 { 255 } else { (128 + noise * 2) as u8 });
        }
    }
    data
}

/// A `width` x `height` image where every pixel is `pixel`.
pub fn solid_image(width: usize, height: usize, pixel: [u8; 4]) -> Vec<u8> {
    pixel
        .iter()
        .copied()
        .cycle()
        .take(width * height * 4)
        .collect()
}
