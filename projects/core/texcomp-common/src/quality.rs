//! Encoder quality setting.

/// Search budget handed to a block encoder.
///
/// Valid values are `0..=256`. Anything outside the range is clamped when constructed, so
/// every [`QualityLevel`] is in range. Higher values try more candidate encodings per block;
/// a higher level never yields a worse block than a lower one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualityLevel(u16);

impl QualityLevel {
    /// Lowest quality, fastest search.
    pub const MIN: QualityLevel = QualityLevel(0);
    /// Highest quality.
    pub const MAX: QualityLevel = QualityLevel(256);
    /// Used when the caller does not pick a quality.
    pub const DEFAULT: QualityLevel = QualityLevel(50);

    /// Creates a quality level, clamping `value` into `0..=256`.
    ///
    /// ```
    /// use texcomp_common::quality::QualityLevel;
    ///
    /// assert_eq!(QualityLevel::new(-5).get(), 0);
    /// assert_eq!(QualityLevel::new(1000).get(), 256);
    /// assert_eq!(QualityLevel::new(70).get(), 70);
    /// ```
    #[inline]
    pub const fn new(value: i32) -> Self {
        let clamped = if value < 0 {
            0
        } else if value > Self::MAX.0 as i32 {
            Self::MAX.0 as i32
        } else {
            value
        };
        Self(clamped as u16)
    }

    /// The clamped value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0 as u32
    }
}

impl Default for QualityLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i32> for QualityLevel {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}
