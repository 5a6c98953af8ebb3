/// What the encoder chose for a single block.
///
/// Produced by [`Bc7Encoder::encode_block_with_stats`](crate::Bc7Encoder::encode_block_with_stats).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Bc7BlockStats {
    /// BC7 mode (0-7).
    pub mode: u8,
    /// Partition number; `0` for single subset modes.
    pub partition: u8,
    /// Channel rotation (modes 4 and 5); `0` otherwise.
    pub rotation: u8,
    /// Index selection bit (mode 4); `0` otherwise.
    pub index_selection: u8,
    /// Summed squared RGBA error of the decoded block against the source pixels.
    pub error: u32,
}
