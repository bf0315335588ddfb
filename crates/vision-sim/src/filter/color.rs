//! Per-pixel color remaps: contrast loss, single-channel color blindness,
//! and achromatopsia.
//!
//! Every remap is a linear blend `c * (1 - t) + target * t` computed in
//! `f32` and rounded to the nearest integer before storage. Alpha is never
//! touched. Rows are processed in parallel; each task writes only its own
//! destination row.

use rayon::prelude::*;

use crate::buffer::{RasterBuffer, CHANNELS};

/// Neutral midpoint that contrast loss converges to.
pub const MID_GRAY: f32 = 128.0;

/// Rec. 601 luma weights.
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Which channels move, and toward what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remap {
    /// R, G and B toward [`MID_GRAY`].
    Contrast,
    /// One channel (0 = R, 1 = G, 2 = B) toward the pixel's luminance.
    Channel(usize),
    /// R, G and B toward the pixel's luminance.
    Desaturate,
}

/// Perceptual luminance `0.299 R + 0.587 G + 0.114 B`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

#[inline]
fn blend(channel: u8, target: f32, t: f32) -> u8 {
    to_u8(channel as f32 * (1.0 - t) + target * t)
}

/// Round to nearest and clamp into the byte range.
#[inline]
pub(crate) fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Apply `remap` at strength `t` to a single RGBA pixel.
pub fn remap_pixel(px: [u8; 4], remap: Remap, t: f32) -> [u8; 4] {
    let [r, g, b, a] = px;
    match remap {
        Remap::Contrast => [
            blend(r, MID_GRAY, t),
            blend(g, MID_GRAY, t),
            blend(b, MID_GRAY, t),
            a,
        ],
        Remap::Channel(c) => {
            let gray = luminance(r, g, b);
            let mut out = px;
            if c < 3 {
                out[c] = blend(px[c], gray, t);
            }
            out
        }
        Remap::Desaturate => {
            let gray = luminance(r, g, b);
            [blend(r, gray, t), blend(g, gray, t), blend(b, gray, t), a]
        }
    }
}

/// Apply `remap` to every pixel of `source`, returning the new samples.
pub fn remap(source: &RasterBuffer, remap: Remap, t: f32) -> Vec<u8> {
    let src = source.as_bytes();
    let mut dst = vec![0u8; src.len()];
    if dst.is_empty() {
        return dst;
    }

    let stride = source.stride();
    dst.par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(|(row_out, row_in)| {
            for (out, px) in row_out
                .chunks_exact_mut(CHANNELS)
                .zip(row_in.chunks_exact(CHANNELS))
            {
                out.copy_from_slice(&remap_pixel([px[0], px[1], px[2], px[3]], remap, t));
            }
        });

    dst
}
