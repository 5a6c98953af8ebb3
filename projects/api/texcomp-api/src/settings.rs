//! Compression settings and their builder.

use crate::stats::StatsManager;
use core::fmt;
use std::sync::Arc;
use texcomp_common::format::CompressionFormat;
use texcomp_common::quality::QualityLevel;

/// Settings for a single compression call.
///
/// Values are clamped into range on construction, so every instance is valid.
/// Use [`CompressionSettings::builder`] to create one.
#[derive(Clone)]
pub struct CompressionSettings {
    format: CompressionFormat,
    quality: QualityLevel,
    threads: usize,
    job_size: usize,
    use_simd: bool,
    use_atomics: bool,
    stats_manager: Option<Arc<dyn StatsManager>>,
    repetitions: usize,
}

impl CompressionSettings {
    /// Creates a builder with every setting at its default.
    pub fn builder() -> CompressionSettingsBuilder {
        CompressionSettingsBuilder::new()
    }

    /// Output format.
    pub fn format(&self) -> CompressionFormat {
        self.format
    }

    /// Search budget for the encoder.
    pub fn quality(&self) -> QualityLevel {
        self.quality
    }

    /// Number of threads; at least 1.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Blocks per work queue job; `0` disables the work queue.
    pub fn job_size(&self) -> usize {
        self.job_size
    }

    /// Whether the SIMD encoder was requested.
    pub fn use_simd(&self) -> bool {
        self.use_simd
    }

    /// Whether the atomic barrier benchmark was requested.
    pub fn use_atomics(&self) -> bool {
        self.use_atomics
    }

    /// Receiver of per-block statistics, if any.
    pub fn stats_manager(&self) -> Option<&Arc<dyn StatsManager>> {
        self.stats_manager.as_ref()
    }

    /// How many times the image is compressed; timings are averaged over these.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }
}

impl Default for CompressionSettings {
    fn default() -> Self {
        CompressionSettingsBuilder::new().build()
    }
}

impl fmt::Debug for CompressionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionSettings")
            .field("format", &self.format)
            .field("quality", &self.quality)
            .field("threads", &self.threads)
            .field("job_size", &self.job_size)
            .field("use_simd", &self.use_simd)
            .field("use_atomics", &self.use_atomics)
            .field("stats_manager", &self.stats_manager.is_some())
            .field("repetitions", &self.repetitions)
            .finish()
    }
}

/// Builder for [`CompressionSettings`].
///
/// Unset values fall back to their defaults: BPTC, quality 50, 1 thread, no job queue,
/// no SIMD, no atomics, no stats, 1 repetition.
#[derive(Default, Clone)]
pub struct CompressionSettingsBuilder {
    format: Option<CompressionFormat>,
    quality: Option<QualityLevel>,
    threads: Option<usize>,
    job_size: Option<usize>,
    use_simd: Option<bool>,
    use_atomics: Option<bool>,
    stats_manager: Option<Arc<dyn StatsManager>>,
    repetitions: Option<usize>,
}

impl CompressionSettingsBuilder {
    /// Create a new settings builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn format(mut self, format: CompressionFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the quality. Clamped to `0..=256`.
    pub fn quality(mut self, quality: i32) -> Self {
        self.quality = Some(QualityLevel::new(quality));
        self
    }

    /// Set the number of threads. `0` is treated as `1`.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    /// Set the number of blocks per work queue job. `0` disables the work queue.
    pub fn job_size(mut self, job_size: usize) -> Self {
        self.job_size = Some(job_size);
        self
    }

    /// Request the SIMD encoder. Compression fails if the platform lacks SSE 4.1.
    pub fn use_simd(mut self, use_simd: bool) -> Self {
        self.use_simd = Some(use_simd);
        self
    }

    /// Request the atomic barrier benchmark when running on more than one thread.
    pub fn use_atomics(mut self, use_atomics: bool) -> Self {
        self.use_atomics = Some(use_atomics);
        self
    }

    /// Set the receiver of per-block statistics.
    pub fn stats_manager(mut self, stats_manager: Arc<dyn StatsManager>) -> Self {
        self.stats_manager = Some(stats_manager);
        self
    }

    /// Set how many times to compress the image. `0` is treated as `1`.
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = Some(repetitions.max(1));
        self
    }

    /// Build the settings using the configured values or defaults.
    pub fn build(self) -> CompressionSettings {
        CompressionSettings {
            format: self.format.unwrap_or_default(),
            quality: self.quality.unwrap_or_default(),
            threads: self.threads.unwrap_or(1),
            job_size: self.job_size.unwrap_or(0),
            use_simd: self.use_simd.unwrap_or(false),
            use_atomics: self.use_atomics.unwrap_or(false),
            stats_manager: self.stats_manager,
            repetitions: self.repetitions.unwrap_or(1),
        }
    }
}
