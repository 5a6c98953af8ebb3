/// Represents a single RGBA8888 pixel, as read from the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use texcomp_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs a [`Color8888`] from 4 bytes in `R, G, B, A` order.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Returns the channels in `R, G, B, A` order.
    ///
    /// The encoders index channels numerically, with `3` always being alpha.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the pixel with the alpha channel cleared, as a packed little endian `u32`.
    #[inline]
    pub const fn without_alpha(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, 0])
    }

    /// Squared euclidean distance over all four channels.
    #[inline]
    pub fn distance_squared(self, other: Self) -> u32 {
        let a = self.to_array();
        let b = other.to_array();
        let mut sum = 0u32;
        for x in 0..4 {
            let d = a[x] as i32 - b[x] as i32;
            sum += (d * d) as u32;
        }
        sum
    }
}
