//! Per-block statistics collected while compressing.
//!
//! Only codecs with a stats variant (BC7) report anything. Records arrive from whichever worker
//! thread encoded the block, in no particular order.

use parking_lot::Mutex;
use texcomp_bc7::Bc7BlockStats;

/// Receives one record per encoded block.
///
/// Implementations are called concurrently from worker threads.
pub trait StatsManager: Send + Sync {
    /// Records the outcome of encoding a single block.
    fn record(&self, record: BlockStatsRecord);
}

/// What the encoder chose for the block at `block_index`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BlockStatsRecord {
    /// Index of the block in raster order.
    pub block_index: usize,
    /// BC7 mode (0-7).
    pub mode: u8,
    /// Partition number; `0` for single subset modes.
    pub partition: u8,
    /// Channel rotation; `0` when unused.
    pub rotation: u8,
    /// Index selection bit; `0` when unused.
    pub index_selection: u8,
    /// Summed squared RGBA error of the block.
    pub error: u32,
}

impl BlockStatsRecord {
    /// Creates a record for the block at `block_index`.
    pub fn new(block_index: usize, stats: Bc7BlockStats) -> Self {
        Self {
            block_index,
            mode: stats.mode,
            partition: stats.partition,
            rotation: stats.rotation,
            index_selection: stats.index_selection,
            error: stats.error,
        }
    }
}

/// A [`StatsManager`] that keeps every record in memory.
///
/// Repeated compressions append again, so an image compressed `n` times holds `n` records per
/// block.
#[derive(Debug, Default)]
pub struct BlockStatsCollector {
    records: Mutex<Vec<BlockStatsRecord>>,
}

impl BlockStatsCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, sorted by block index.
    pub fn records(&self) -> Vec<BlockStatsRecord> {
        let mut records = self.records.lock().clone();
        records.sort_by_key(|record| record.block_index);
        records
    }

    /// Number of blocks encoded with each of the 8 modes.
    pub fn mode_histogram(&self) -> [usize; 8] {
        let mut histogram = [0usize; 8];
        for record in self.records.lock().iter() {
            histogram[(record.mode & 7) as usize] += 1;
        }
        histogram
    }

    /// Sum of the error over every record.
    pub fn total_error(&self) -> u64 {
        self.records
            .lock()
            .iter()
            .map(|record| record.error as u64)
            .sum()
    }

    /// Number of records collected.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Removes every record.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl StatsManager for BlockStatsCollector {
    fn record(&self, record: BlockStatsRecord) {
        self.records.lock().push(record);
    }
}
