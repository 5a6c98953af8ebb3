/// An RGBA8 image whose dimensions are multiples of 4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedImage {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Grows `width` x `height` up to the next multiple of 4 by repeating the last row and column.
///
/// Images that are already aligned, or empty, are copied unchanged.
pub fn pad_to_block_multiple(data: &[u8], width: usize, height: usize) -> PaddedImage {
    let padded_width = width.next_multiple_of(4);
    let padded_height = height.next_multiple_of(4);
    if width == 0 || height == 0 || (padded_width == width && padded_height == height) {
        return PaddedImage {
            data: data.to_vec(),
            width,
            height,
        };
    }

    let mut padded = Vec::with_capacity(padded_width * padded_height * 4);
    for y in 0..padded_height {
        let row = y.min(height - 1) * width * 4;
        padded.extend_from_slice(&data[row..row + width * 4]);
        let last = &data[row + (width - 1) * 4..row + width * 4];
        for _ in width..padded_width {
            padded.extend_from_slice(last);
        }
    }

    PaddedImage {
        data: padded,
        width: padded_width,
        height: padded_height,
    }
}
