//! Separable Gaussian blur with clamp-to-edge sampling.
//!
//! The blur length `intensity * MAX_BLUR_PX` is read the way a canvas
//! `blur(Npx)` filter reads it: as the Gaussian standard deviation. The
//! kernel is truncated at `ceil(3 * sigma)` and normalized.
//!
//! Color is convolved premultiplied by alpha, so the hidden color of
//! transparent pixels never bleeds into visible neighbors.
//!
//! Both passes run row-parallel. Each task owns one destination row, and
//! the intermediate buffer is only read after the first pass completes.

use rayon::prelude::*;

use super::color::to_u8;
use crate::buffer::{RasterBuffer, CHANNELS};

/// Blur length at intensity 1, in pixels.
pub const MAX_BLUR_PX: f32 = 8.0;

/// Map a normalized intensity to a Gaussian sigma.
#[inline]
pub fn sigma_for_intensity(intensity: f32) -> f32 {
    intensity.max(0.0) * MAX_BLUR_PX
}

/// Build a normalized 1-D Gaussian kernel truncated at `ceil(3 * sigma)`.
///
/// A non-positive sigma yields the identity kernel `[1.0]`.
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma.is_nan() || sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (sigma * 3.0).ceil() as usize;
    let len = radius * 2 + 1;
    let s2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..len)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / s2).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Blur all four channels of `source` and return the new samples.
#[allow(clippy::needless_range_loop)]
pub fn gaussian_blur(source: &RasterBuffer, sigma: f32) -> Vec<u8> {
    let w = source.width() as usize;
    let h = source.height() as usize;
    let src = source.as_bytes();
    if w == 0 || h == 0 || sigma.is_nan() || sigma <= 0.0 {
        return src.to_vec();
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let stride = w * CHANNELS;

    // Horizontal pass: straight u8 source -> premultiplied f32 intermediate.
    let mut horizontal = vec![0.0f32; src.len()];
    horizontal
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = &src[y * stride..(y + 1) * stride];
            for x in 0..w {
                let mut acc = [0.0f32; CHANNELS];
                for (k, &weight) in kernel.iter().enumerate() {
                    let sx = clamp_index(x as isize + k as isize - radius, w);
                    let px = &row_in[sx * CHANNELS..sx * CHANNELS + CHANNELS];
                    let alpha = px[ALPHA] as f32;
                    for c in 0..ALPHA {
                        acc[c] += px[c] as f32 * alpha / 255.0 * weight;
                    }
                    acc[ALPHA] += alpha * weight;
                }
                row_out[x * CHANNELS..x * CHANNELS + CHANNELS].copy_from_slice(&acc);
            }
        });

    // Vertical pass: premultiplied f32 intermediate -> straight u8 output.
    let mut out = vec![0u8; src.len()];
    out.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            for x in 0..w {
                let mut acc = [0.0f32; CHANNELS];
                for (k, &weight) in kernel.iter().enumerate() {
                    let sy = clamp_index(y as isize + k as isize - radius, h);
                    let i = sy * stride + x * CHANNELS;
                    for c in 0..CHANNELS {
                        acc[c] += horizontal[i + c] * weight;
                    }
                }
                let alpha = acc[ALPHA];
                let px = &mut row_out[x * CHANNELS..x * CHANNELS + CHANNELS];
                if alpha > 0.0 {
                    for c in 0..ALPHA {
                        px[c] = to_u8(acc[c] * 255.0 / alpha);
                    }
                }
                px[ALPHA] = to_u8(alpha);
            }
        });

    out
}

const ALPHA: usize = CHANNELS - 1;

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
