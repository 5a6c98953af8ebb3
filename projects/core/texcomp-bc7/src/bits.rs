//! LSB-first bit packing of a 128-bit block.

/// Appends fields to a 128-bit block, least significant bit first.
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    value: u128,
    position: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the low `bits` bits of `value`.
    #[inline]
    pub fn write(&mut self, value: u32, bits: u32) {
        debug_assert!(self.position + bits <= 128);
        debug_assert!(bits >= 32 || value >> bits == 0);
        if bits == 0 {
            return;
        }
        self.value |= (value as u128) << self.position;
        self.position += bits;
    }

    /// Number of bits written so far.
    #[inline]
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn into_bytes(self) -> [u8; 16] {
        debug_assert_eq!(self.position, 128);
        self.value.to_le_bytes()
    }
}

/// Reads fields back out of a 128-bit block in the order [`BitWriter`] wrote them.
#[cfg(test)]
pub(crate) struct BitReader {
    value: u128,
    position: u32,
}

#[cfg(test)]
impl BitReader {
    pub fn new(block: &[u8; 16]) -> Self {
        Self {
            value: u128::from_le_bytes(*block),
            position: 0,
        }
    }

    pub fn read(&mut self, bits: u32) -> u32 {
        if bits == 0 {
            return 0;
        }
        let result = ((self.value >> self.position) & ((1u128 << bits) - 1)) as u32;
        self.position += bits;
        result
    }
}
