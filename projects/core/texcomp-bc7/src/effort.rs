//! Maps a [`QualityLevel`] to the parts of the BC7 search space that get explored.

use texcomp_common::quality::QualityLevel;

/// Quality at which each mode (by index) joins the search.
const MODE_MIN_QUALITY: [u32; 8] = [96, 32, 112, 64, 48, 16, 0, 80];

/// Largest number of partitions tried per multi-subset mode.
const MAX_PARTITIONS: usize = 17;

/// What the encoder tries for a block at a given quality.
///
/// Every field grows monotonically with quality, so the candidates at a higher quality are a
/// superset of the candidates at a lower one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchEffort {
    /// Modes enabled, by mode index.
    pub modes: [bool; 8],
    /// Number of top ranked partitions tried for modes with 2 or 3 subsets.
    pub partitions: usize,
    /// Try all 4 channel rotations in modes 4 and 5.
    pub rotations: bool,
    /// Try both index selections in mode 4.
    pub index_selection: bool,
    /// Try a principal axis endpoint fit next to the bounding box fit.
    pub principal_axis: bool,
    /// Greedy endpoint refinement passes per fit.
    pub refine_passes: u32,
}

impl SearchEffort {
    /// Derives the search effort for `quality`.
    ///
    /// ```
    /// use texcomp_bc7::SearchEffort;
    /// use texcomp_common::quality::QualityLevel;
    ///
    /// let fastest = SearchEffort::from_quality(QualityLevel::MIN);
    /// assert_eq!(fastest.modes, [false, false, false, false, false, false, true, false]);
    ///
    /// let best = SearchEffort::from_quality(QualityLevel::MAX);
    /// assert!(best.modes.iter().all(|&enabled| enabled));
    /// assert_eq!(best.partitions, 17);
    /// ```
    pub fn from_quality(quality: QualityLevel) -> Self {
        let q = quality.get();
        let mut modes = [false; 8];
        for (enabled, threshold) in modes.iter_mut().zip(MODE_MIN_QUALITY) {
            *enabled = q >= threshold;
        }
        Self {
            modes,
            partitions: (1 + q as usize / 16).min(MAX_PARTITIONS),
            rotations: q >= 128,
            index_selection: q >= 160,
            principal_axis: q >= 64,
            refine_passes: q / 96,
        }
    }

    /// Whether any mode with `subsets` subsets is enabled.
    pub(crate) fn any_mode_with_subsets(&self, subsets: usize) -> bool {
        crate::modes::MODES
            .iter()
            .zip(self.modes)
            .any(|(mode, enabled)| enabled && mode.subsets == subsets)
    }
}
