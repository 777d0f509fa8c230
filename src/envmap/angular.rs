use std::f64::consts::PI;

use rayon::prelude::*;

use crate::{
    foundation::error::{LuxelError, LuxelResult},
    foundation::math::{MIN_VECTOR_LEN, normalize3},
    texture::record::{TextureRecord, rgba_len},
};

/// Reproject an angular (light-probe) map into an equirectangular layout.
///
/// Destination pixel `(i, j)` samples the probe along the direction for
/// longitude `u = i / width` and latitude `v = j / height`: `theta = v*pi`,
/// `phi = u*2*pi`, direction `(sin theta cos phi, -cos theta, sin theta sin
/// phi)`. The probe is fetched nearest-neighbor, with no bilinear filtering,
/// and output alpha is always 1.0 regardless of the source alpha.
///
/// Probe texel coordinates are clamped to the valid range, so every
/// destination pixel traces to a real source sample even where the angular
/// UV lands exactly on 1.0.
#[tracing::instrument(skip(src))]
pub fn angular_to_longlat(
    src: &TextureRecord,
    width: u32,
    height: u32,
) -> LuxelResult<TextureRecord> {
    if width == 0 || height == 0 {
        return Err(LuxelError::validation(
            "longitude-latitude dimensions must be non-zero",
        ));
    }

    let row_len = width as usize * 4;
    let mut texels = vec![0.0f32; rgba_len(width, height)?];

    texels
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(j, row)| {
            let v = j as f64 / f64::from(height);
            for i in 0..width as usize {
                let u = i as f64 / f64::from(width);
                let [r, g, b] = sample_angular(src, longlat_direction(u, v));
                row[4 * i] = r;
                row[4 * i + 1] = g;
                row[4 * i + 2] = b;
                row[4 * i + 3] = 1.0;
            }
        });

    TextureRecord::from_rgba(width, height, texels)
}

fn longlat_direction(u: f64, v: f64) -> [f64; 3] {
    let theta = v * PI;
    let phi = u * 2.0 * PI;
    [
        theta.sin() * phi.cos(),
        -theta.cos(),
        theta.sin() * phi.sin(),
    ]
}

/// Nearest-neighbor angular-map fetch along a direction.
///
/// The squared-norm guard keeps the pole singularity finite, and the `acos`
/// argument is clamped because normalization can overshoot unit length by an
/// ulp.
fn sample_angular(src: &TextureRecord, dir: [f64; 3]) -> [f32; 3] {
    let dir = normalize3(dir);

    let mut r = dir[2].clamp(-1.0, 1.0).acos() / PI;
    let norm2 = dir[0] * dir[0] + dir[1] * dir[1];
    if norm2 > MIN_VECTOR_LEN {
        r /= norm2.sqrt();
    }

    let u = 0.5 * dir[0] * r + 0.5;
    let v = 0.5 * dir[1] * r + 0.5;

    let x = ((u * f64::from(src.width())) as i64).clamp(0, i64::from(src.width()) - 1) as u32;
    let y = ((v * f64::from(src.height())) as i64).clamp(0, i64::from(src.height()) - 1) as u32;

    let texel = src.texel(x, y);
    [texel[0], texel[1], texel[2]]
}

#[cfg(test)]
#[path = "../../tests/unit/envmap/angular.rs"]
mod tests;
