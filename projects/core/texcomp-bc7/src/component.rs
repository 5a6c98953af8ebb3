//! Solves the endpoints and indices of a single component of a subset.

use crate::effort::SearchEffort;
use crate::kernel::Bc7Kernel;
use crate::modes::{interpolate, weights, PBits};
use crate::quantize::{ComponentFormat, QuantizedEndpoints};
use texcomp_common::color_fit::{bounding_box_endpoints, principal_axis_endpoints};

/// Best encoding found for one component.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ComponentSolution {
    pub endpoints: QuantizedEndpoints,
    /// Index of each input pixel, in input order.
    pub indices: [u8; 16],
    /// Summed squared error over the component's channels.
    pub error: u32,
}

/// Finds endpoints and indices for `pixels` (local channel layout).
///
/// Tries the bounding box fit, plus the principal axis fit when `effort` asks for it. Each
/// fit is quantised and then refined independently; the lowest error wins, ties keep the
/// bounding box.
pub(crate) fn solve_component(
    pixels: &[[u8; 4]],
    format: &ComponentFormat,
    effort: &SearchEffort,
    kernel: Bc7Kernel,
) -> ComponentSolution {
    let bounding_box = bounding_box_endpoints(pixels, format.channels);
    let mut best = solve_fit(pixels, format, &bounding_box, effort.refine_passes, kernel);

    if effort.principal_axis {
        let axis = principal_axis_endpoints(pixels, format.channels);
        let candidate = solve_fit(pixels, format, &axis, effort.refine_passes, kernel);
        if candidate.error < best.error {
            best = candidate;
        }
    }
    best
}

fn solve_fit(
    pixels: &[[u8; 4]],
    format: &ComponentFormat,
    fit: &[[u8; 4]; 2],
    passes: u32,
    kernel: Bc7Kernel,
) -> ComponentSolution {
    let start = match format.pbits {
        PBits::Shared => {
            let zero = evaluate(pixels, format, format.quantize_with_pbits(fit, [0, 0]), kernel);
            let one = evaluate(pixels, format, format.quantize_with_pbits(fit, [1, 1]), kernel);
            if one.error < zero.error {
                one
            } else {
                zero
            }
        }
        PBits::None | PBits::PerEndpoint => {
            evaluate(pixels, format, format.quantize_nearest(fit), kernel)
        }
    };
    refine(pixels, format, start, passes, kernel)
}

/// Greedy local search: nudge every stored endpoint value by one step, then flip p-bits,
/// keeping any change that strictly lowers the error.
fn refine(
    pixels: &[[u8; 4]],
    format: &ComponentFormat,
    mut current: ComponentSolution,
    passes: u32,
    kernel: Bc7Kernel,
) -> ComponentSolution {
    let max = format.max_value() as i32;
    for _ in 0..passes {
        for ep in 0..2 {
            for c in 0..format.channels {
                for delta in [-1i32, 1] {
                    let value = current.endpoints.values[ep][c] as i32 + delta;
                    if !(0..=max).contains(&value) {
                        continue;
                    }
                    let mut trial = current.endpoints;
                    trial.values[ep][c] = value as u8;
                    keep_if_better(&mut current, evaluate(pixels, format, trial, kernel));
                }
            }
        }

        match format.pbits {
            PBits::None => {}
            PBits::PerEndpoint => {
                for ep in 0..2 {
                    let mut trial = current.endpoints;
                    trial.pbits[ep] ^= 1;
                    keep_if_better(&mut current, evaluate(pixels, format, trial, kernel));
                }
            }
            PBits::Shared => {
                let mut trial = current.endpoints;
                trial.pbits[0] ^= 1;
                trial.pbits[1] = trial.pbits[0];
                keep_if_better(&mut current, evaluate(pixels, format, trial, kernel));
            }
        }
    }
    current
}

#[inline]
fn keep_if_better(current: &mut ComponentSolution, candidate: ComponentSolution) {
    if candidate.error < current.error {
        *current = candidate;
    }
}

/// Builds the palette for `endpoints` and assigns every pixel its nearest entry.
pub(crate) fn evaluate(
    pixels: &[[u8; 4]],
    format: &ComponentFormat,
    endpoints: QuantizedEndpoints,
    kernel: Bc7Kernel,
) -> ComponentSolution {
    let [e0, e1] = format.unquantize(&endpoints);
    let weights = weights(format.index_bits);

    let mut palette = [[0u8; 4]; 16];
    for (entry, &weight) in palette.iter_mut().zip(weights) {
        for c in 0..format.channels {
            entry[c] = interpolate(e0[c], e1[c], weight);
        }
    }

    let mut indices = [0u8; 16];
    let error = kernel.assign_indices(pixels, &palette[..weights.len()], &mut indices);
    ComponentSolution {
        endpoints,
        indices,
        error,
    }
}
