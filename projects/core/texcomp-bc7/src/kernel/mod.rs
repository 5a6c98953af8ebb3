//! Index assignment kernels.
//!
//! For every pixel, find the closest palette entry and sum up the squared error. This is where
//! the encoder spends nearly all of its time, so it is compiled twice: once for the baseline
//! target, and once through `multiversion` for SSE4.1/AVX2 capable CPUs.
//!
//! Both variants share [`assign_indices_body`] and only use integer arithmetic, so their
//! results are identical.

use derive_enum_all_values::AllValues;

mod portable;
mod simd;

/// Which compiled variant of the index assignment kernel an encoder uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
pub enum Bc7Kernel {
    /// Baseline build, runs everywhere.
    #[default]
    Portable,
    /// Build targeting x86-64-v2/v3, picked at runtime when the CPU supports it.
    ///
    /// Callers are expected to check [`texcomp_common::cpu_detect::has_sse41`] before choosing
    /// this; on other CPUs it falls back to the baseline build.
    Simd,
}

impl Bc7Kernel {
    /// Assigns every pixel the index of its nearest palette entry.
    ///
    /// Ties go to the lower index. Returns the summed squared error over all 4 channels.
    #[inline]
    pub(crate) fn assign_indices(
        self,
        pixels: &[[u8; 4]],
        palette: &[[u8; 4]],
        indices: &mut [u8; 16],
    ) -> u32 {
        match self {
            Bc7Kernel::Portable => portable::assign_indices(pixels, palette, indices),
            Bc7Kernel::Simd => simd::assign_indices(pixels, palette, indices),
        }
    }
}

#[inline(always)]
pub(crate) fn assign_indices_body(
    pixels: &[[u8; 4]],
    palette: &[[u8; 4]],
    indices: &mut [u8; 16],
) -> u32 {
    let mut total = 0u32;
    for (pixel, index) in pixels.iter().zip(indices.iter_mut()) {
        let mut best_error = u32::MAX;
        let mut best_index = 0u8;
        for (entry_index, entry) in palette.iter().enumerate() {
            let mut error = 0u32;
            for c in 0..4 {
                let d = pixel[c] as i32 - entry[c] as i32;
                error += (d * d) as u32;
            }
            if error < best_error {
                best_error = error;
                best_index = entry_index as u8;
            }
        }
        *index = best_index;
        total += best_error;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn palette() -> [[u8; 4]; 4] {
        [[0, 0, 0, 0], [85, 85, 85, 0], [170, 170, 170, 0], [255, 255, 255, 0]]
    }

    #[rstest]
    #[case(Bc7Kernel::Portable)]
    #[case(Bc7Kernel::Simd)]
    fn picks_nearest_entry(#[case] kernel: Bc7Kernel) {
        let pixels = [[0, 0, 0, 0], [80, 90, 85, 0], [250, 255, 255, 0]];
        let mut indices = [0u8; 16];
        let error = kernel.assign_indices(&pixels, &palette(), &mut indices);
        assert_eq!(&indices[..3], &[0, 1, 3]);
        assert_eq!(error, 50 + 25);
    }

    #[rstest]
    #[case(Bc7Kernel::Portable)]
    #[case(Bc7Kernel::Simd)]
    fn ties_go_to_lower_index(#[case] kernel: Bc7Kernel) {
        let palette = [[10, 0, 0, 0], [20, 0, 0, 0]];
        let mut indices = [9u8; 16];
        kernel.assign_indices(&[[15, 0, 0, 0]], &palette, &mut indices);
        assert_eq!(indices[0], 0);
    }

    #[test]
    fn kernels_agree() {
        let mut pixels = [[0u8; 4]; 16];
        for (x, pixel) in pixels.iter_mut().enumerate() {
            *pixel = [(x * 37) as u8, (x * 91) as u8, (x * 13) as u8, (255 - x * 7) as u8];
        }
        let palette: Vec<[u8; 4]> = (0..16u8).map(|i| [i * 17, 255 - i * 17, i * 9, 200]).collect();

        let mut portable = [0u8; 16];
        let mut simd = [0u8; 16];
        let a = Bc7Kernel::Portable.assign_indices(&pixels, &palette, &mut portable);
        let b = Bc7Kernel::Simd.assign_indices(&pixels, &palette, &mut simd);
        assert_eq!(a, b);
        assert_eq!(portable, simd);
    }
}
