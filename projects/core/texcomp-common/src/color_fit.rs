//! Endpoint fitting for a set of pixels.
//!
//! Block encoders approximate a group of pixels with a line segment through colour space and
//! store the two ends of that segment. This module finds candidate segments:
//!
//! - [`bounding_box_endpoints`]: per-channel minimum and maximum.
//! - [`principal_axis_endpoints`]: the extent of the pixels along their principal axis,
//!   found with power iteration on the covariance matrix.
//!
//! Both operate on the first `channels` channels of each `[R, G, B, A]` pixel (3 for colour
//! only, 4 for colour and alpha). Channels past `channels` are returned as `0`.
//!
//! Neither needs `sqrt`, so everything here works without `std`.

/// Number of power iteration steps used to find the principal axis.
const POWER_ITERATIONS: usize = 8;

/// Endpoint pair, each `[R, G, B, A]`.
pub type Endpoints = [[u8; 4]; 2];

/// Per-channel minimum and maximum of the first `channels` channels.
///
/// Returns `[min, max]`. `pixels` must not be empty.
pub fn bounding_box_endpoints(pixels: &[[u8; 4]], channels: usize) -> Endpoints {
    if pixels.is_empty() {
        return [[0; 4]; 2];
    }
    let mut low = [0u8; 4];
    let mut high = [0u8; 4];
    for c in 0..channels {
        low[c] = u8::MAX;
        for pixel in pixels {
            low[c] = low[c].min(pixel[c]);
            high[c] = high[c].max(pixel[c]);
        }
    }
    [low, high]
}

/// Projects the pixels onto their principal axis and returns the two extreme points.
///
/// Falls back to [`bounding_box_endpoints`] when the pixels have no variance.
/// The first endpoint is the one with the lower projection.
pub fn principal_axis_endpoints(pixels: &[[u8; 4]], channels: usize) -> Endpoints {
    if pixels.is_empty() {
        return [[0; 4]; 2];
    }

    let mean = channel_mean(pixels, channels);
    let covariance = covariance(pixels, channels, &mean);
    let axis = match principal_axis(&covariance, channels) {
        Some(axis) => axis,
        None => return bounding_box_endpoints(pixels, channels),
    };

    let mut axis_len_sq = 0.0f32;
    for c in 0..channels {
        axis_len_sq += axis[c] * axis[c];
    }

    let mut min_t = f32::MAX;
    let mut max_t = f32::MIN;
    for pixel in pixels {
        let mut t = 0.0f32;
        for c in 0..channels {
            t += (pixel[c] as f32 - mean[c]) * axis[c];
        }
        min_t = min_t.min(t);
        max_t = max_t.max(t);
    }
    min_t /= axis_len_sq;
    max_t /= axis_len_sq;

    let mut low = [0u8; 4];
    let mut high = [0u8; 4];
    for c in 0..channels {
        low[c] = round_to_u8(mean[c] + min_t * axis[c]);
        high[c] = round_to_u8(mean[c] + max_t * axis[c]);
    }
    [low, high]
}

/// Per-channel mean of the first `channels` channels.
pub fn channel_mean(pixels: &[[u8; 4]], channels: usize) -> [f32; 4] {
    let mut sum = [0u32; 4];
    for pixel in pixels {
        for c in 0..channels {
            sum[c] += pixel[c] as u32;
        }
    }
    let mut mean = [0.0f32; 4];
    if pixels.is_empty() {
        return mean;
    }
    for c in 0..channels {
        mean[c] = sum[c] as f32 / pixels.len() as f32;
    }
    mean
}

/// Sum of the per-channel variances (trace of the covariance matrix), unnormalised.
///
/// Used to rank how well a group of pixels is described by a single segment.
pub fn total_variance(pixels: &[[u8; 4]], channels: usize) -> f32 {
    let mean = channel_mean(pixels, channels);
    let mut total = 0.0f32;
    for pixel in pixels {
        for c in 0..channels {
            let d = pixel[c] as f32 - mean[c];
            total += d * d;
        }
    }
    total
}

fn covariance(pixels: &[[u8; 4]], channels: usize, mean: &[f32; 4]) -> [[f32; 4]; 4] {
    let mut cov = [[0.0f32; 4]; 4];
    for pixel in pixels {
        let mut d = [0.0f32; 4];
        for c in 0..channels {
            d[c] = pixel[c] as f32 - mean[c];
        }
        for row in 0..channels {
            for col in row..channels {
                cov[row][col] += d[row] * d[col];
            }
        }
    }
    for row in 0..channels {
        for col in 0..row {
            cov[row][col] = cov[col][row];
        }
    }
    cov
}

/// Power iteration, seeded with the covariance row of the channel with the largest variance.
///
/// The axis is normalised so its largest component has magnitude 1, which avoids `sqrt`.
/// Callers divide projections by the squared axis length instead.
fn principal_axis(cov: &[[f32; 4]; 4], channels: usize) -> Option<[f32; 4]> {
    let mut seed = 0;
    for c in 1..channels {
        if cov[c][c] > cov[seed][seed] {
            seed = c;
        }
    }
    if cov[seed][seed] <= 0.0 {
        return None;
    }

    let mut axis = [0.0f32; 4];
    axis[..channels].copy_from_slice(&cov[seed][..channels]);
    normalise_max(&mut axis)?;

    for _ in 0..POWER_ITERATIONS {
        let mut next = [0.0f32; 4];
        for row in 0..channels {
            for col in 0..channels {
                next[row] += cov[row][col] * axis[col];
            }
        }
        normalise_max(&mut next)?;
        axis = next;
    }
    Some(axis)
}

/// Scales `v` so its largest magnitude component becomes 1. `None` if `v` is zero.
fn normalise_max(v: &mut [f32; 4]) -> Option<()> {
    let mut largest = 0.0f32;
    for x in v.iter() {
        largest = largest.max(abs(*x));
    }
    if largest <= f32::EPSILON {
        return None;
    }
    for x in v.iter_mut() {
        *x /= largest;
    }
    Some(())
}

#[inline]
fn abs(x: f32) -> f32 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

#[inline]
fn round_to_u8(x: f32) -> u8 {
    if x <= 0.0 {
        0
    } else if x >= 255.0 {
        255
    } else {
        (x + 0.5) as u8
    }
}
