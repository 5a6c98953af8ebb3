//! Endpoint quantisation.
//!
//! A component is a group of channels that share one set of indices: RGB, RGBA, or a lone
//! alpha channel in modes 4 and 5. Component pixels are stored "locally": the used channels
//! come first and the rest are zero, so the kernel can always compare all 4 channels.

use crate::modes::{unquantize, PBits};

/// How the endpoints of a component are stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ComponentFormat {
    /// Number of local channels in use.
    pub channels: usize,
    /// Stored bits per channel, excluding the p-bit.
    pub bits: u32,
    pub pbits: PBits,
    /// Bits per index, which also sets the palette size.
    pub index_bits: u32,
}

/// Quantised endpoint pair of a component, as written to the block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) struct QuantizedEndpoints {
    /// Stored values, p-bit excluded.
    pub values: [[u8; 4]; 2],
    /// P-bit of each endpoint. Both are equal for shared p-bits, and zero without p-bits.
    pub pbits: [u8; 2],
}

impl ComponentFormat {
    /// Largest value a channel can store.
    #[inline]
    pub const fn max_value(&self) -> u8 {
        ((1u32 << self.bits) - 1) as u8
    }

    /// Expands a stored channel value to 8 bits.
    #[inline]
    pub const fn unquantize_channel(&self, value: u8, pbit: u8) -> u8 {
        match self.pbits {
            PBits::None => unquantize(value, self.bits),
            PBits::PerEndpoint | PBits::Shared => unquantize((value << 1) | pbit, self.bits + 1),
        }
    }

    /// Expands both endpoints to 8 bits. Channels outside the component stay zero.
    pub fn unquantize(&self, endpoints: &QuantizedEndpoints) -> [[u8; 4]; 2] {
        let mut out = [[0u8; 4]; 2];
        for (ep, expanded) in out.iter_mut().enumerate() {
            for (c, channel) in expanded.iter_mut().enumerate().take(self.channels) {
                *channel = self.unquantize_channel(endpoints.values[ep][c], endpoints.pbits[ep]);
            }
        }
        out
    }

    /// Stored value whose expansion is closest to `target`, for a fixed p-bit.
    ///
    /// Ties go to the lower stored value.
    pub fn quantize_channel(&self, target: u8, pbit: u8) -> u8 {
        let max = self.max_value() as i32;
        let guess = (target as i32 * max + 127) / 255;

        let mut best = 0u8;
        let mut best_error = i32::MAX;
        for candidate in (guess - 2).max(0)..=(guess + 2).min(max) {
            let error = (self.unquantize_channel(candidate as u8, pbit) as i32 - target as i32).abs();
            if error < best_error {
                best_error = error;
                best = candidate as u8;
            }
        }
        best
    }

    /// Quantises a full endpoint with a fixed p-bit, returning the values and their squared error.
    pub fn quantize_endpoint(&self, target: &[u8; 4], pbit: u8) -> ([u8; 4], u32) {
        let mut values = [0u8; 4];
        let mut error = 0u32;
        for c in 0..self.channels {
            values[c] = self.quantize_channel(target[c], pbit);
            let d = self.unquantize_channel(values[c], pbit) as i32 - target[c] as i32;
            error += (d * d) as u32;
        }
        (values, error)
    }

    /// Quantises an endpoint pair using `pbits` for both endpoints.
    pub fn quantize_with_pbits(&self, fit: &[[u8; 4]; 2], pbits: [u8; 2]) -> QuantizedEndpoints {
        QuantizedEndpoints {
            values: [
                self.quantize_endpoint(&fit[0], pbits[0]).0,
                self.quantize_endpoint(&fit[1], pbits[1]).0,
            ],
            pbits,
        }
    }

    /// Quantises an endpoint pair, choosing each p-bit to land nearest to its endpoint.
    ///
    /// Only meaningful for [`PBits::PerEndpoint`] and [`PBits::None`]; shared p-bits are
    /// chosen by the caller from the resulting error of the whole subset.
    pub fn quantize_nearest(&self, fit: &[[u8; 4]; 2]) -> QuantizedEndpoints {
        if self.pbits != PBits::PerEndpoint {
            return self.quantize_with_pbits(fit, [0, 0]);
        }

        let mut out = QuantizedEndpoints::default();
        for ep in 0..2 {
            let (zero, zero_error) = self.quantize_endpoint(&fit[ep], 0);
            let (one, one_error) = self.quantize_endpoint(&fit[ep], 1);
            if one_error < zero_error {
                out.values[ep] = one;
                out.pbits[ep] = 1;
            } else {
                out.values[ep] = zero;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn format(bits: u32, pbits: PBits) -> ComponentFormat {
        ComponentFormat {
            channels: 3,
            bits,
            pbits,
            index_bits: 2,
        }
    }

    #[rstest]
    #[case(5, PBits::None)]
    #[case(7, PBits::None)]
    #[case(8, PBits::None)]
    #[case(4, PBits::PerEndpoint)]
    #[case(6, PBits::Shared)]
    #[case(7, PBits::PerEndpoint)]
    fn quantize_channel_is_nearest(#[case] bits: u32, #[case] pbits: PBits) {
        let format = format(bits, pbits);
        let pbit_values: &[u8] = if pbits == PBits::None { &[0] } else { &[0, 1] };
        for &pbit in pbit_values {
            for target in 0..=255u8 {
                let chosen = format.quantize_channel(target, pbit);
                let chosen_error =
                    (format.unquantize_channel(chosen, pbit) as i32 - target as i32).abs();
                for candidate in 0..=format.max_value() {
                    let error =
                        (format.unquantize_channel(candidate, pbit) as i32 - target as i32).abs();
                    assert!(chosen_error <= error, "bits {bits} target {target}");
                }
            }
        }
    }

    #[test]
    fn eight_bit_channels_are_exact() {
        let format = format(8, PBits::None);
        for target in 0..=255u8 {
            assert_eq!(format.quantize_channel(target, 0), target);
        }
    }

    #[test]
    fn per_endpoint_pbits_pick_closer_expansion() {
        // 7 bits + p-bit is a full 8 bit value, so an odd target needs p-bit 1.
        let format = format(7, PBits::PerEndpoint);
        let fit = [[1, 3, 5, 0], [2, 4, 6, 0]];
        let quantized = format.quantize_nearest(&fit);
        assert_eq!(quantized.pbits, [1, 0]);
        assert_eq!(format.unquantize(&quantized), fit);
    }

    #[test]
    fn unused_channels_stay_zero() {
        let format = ComponentFormat {
            channels: 1,
            bits: 6,
            pbits: PBits::None,
            index_bits: 3,
        };
        let quantized = format.quantize_nearest(&[[200, 99, 99, 99], [10, 99, 99, 99]]);
        let expanded = format.unquantize(&quantized);
        assert_eq!(expanded[0][1..], [0, 0, 0]);
        assert_eq!(expanded[1][1..], [0, 0, 0]);
    }
}
