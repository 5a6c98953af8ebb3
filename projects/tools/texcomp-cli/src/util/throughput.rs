use bytesize::ByteSize;
use core::fmt;

/// Bytes processed per second, printed as e.g. `12.5 MiB/s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throughput(ByteSize);

impl Throughput {
    pub fn from_bytes_per_sec(bytes: u64) -> Self {
        Self(ByteSize(bytes))
    }

    /// Throughput of processing `bytes` in `milliseconds`.
    pub fn from_millis(bytes: u64, milliseconds: f64) -> Self {
        if milliseconds > 0.0 {
            Self::from_bytes_per_sec((bytes as f64 * 1000.0 / milliseconds) as u64)
        } else {
            Self::from_bytes_per_sec(0)
        }
    }

    pub fn bytes_per_sec(&self) -> u64 {
        self.0.as_u64()
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_time() {
        assert_eq!(Throughput::from_millis(1000, 500.0).bytes_per_sec(), 2000);
        assert_eq!(Throughput::from_millis(1000, 0.0).bytes_per_sec(), 0);
    }

    #[test]
    fn display_appends_per_second() {
        assert!(Throughput::from_bytes_per_sec(1024).to_string().ends_with("/s"));
    }
}
