use rayon::prelude::*;

use crate::{
    foundation::error::{LuxelError, LuxelResult},
    texture::record::TextureRecord,
};

#[derive(Clone, Debug)]
/// Double-precision summed-area table over an RGBA texture.
///
/// Entry `(x, y)` holds, per channel, the sum of every source texel `(i, j)`
/// with `i <= x` and `j <= y`. For non-negative sources the table is
/// non-decreasing along +x and +y, and any axis-aligned box sum costs four
/// lookups; see [`SummedAreaTable::region_sum`].
pub struct SummedAreaTable {
    width: u32,
    height: u32,
    sums: Vec<f64>,
}

impl SummedAreaTable {
    /// Build the table for a texture.
    ///
    /// Two passes over one buffer: horizontal prefix sums per row, then
    /// vertical prefix sums per column over the horizontal result. Rows are
    /// independent in the first pass and run in parallel; the second pass is
    /// sequential in `y` because each row accumulates the one above it.
    /// Accumulation is `f64` throughout: a sum can range over
    /// `width * height` terms, which loses precision in `f32` for large
    /// textures.
    pub fn build(texture: &TextureRecord) -> Self {
        let w = texture.width() as usize;
        let h = texture.height() as usize;
        let row_len = w * 4;
        let mut sums = vec![0.0f64; row_len * h];

        sums.par_chunks_mut(row_len)
            .zip(texture.texels().par_chunks(row_len))
            .for_each(|(dst, src)| {
                for k in 0..4 {
                    dst[k] = f64::from(src[k]);
                }
                for x in 1..w {
                    for k in 0..4 {
                        dst[4 * x + k] = dst[4 * (x - 1) + k] + f64::from(src[4 * x + k]);
                    }
                }
            });

        for j in 1..h {
            let (above, below) = sums.split_at_mut(j * row_len);
            let prev = &above[(j - 1) * row_len..];
            let cur = &mut below[..row_len];
            for i in 0..row_len {
                cur[i] += prev[i];
            }
        }

        Self {
            width: texture.width(),
            height: texture.height(),
            sums,
        }
    }

    /// Width in texels, equal to the source texture's.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels, equal to the source texture's.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Inclusive prefix sums at `(x, y)`, one per channel.
    ///
    /// Panics when `x` or `y` is out of bounds.
    pub fn value(&self, x: u32, y: u32) -> [f64; 4] {
        assert!(
            x < self.width && y < self.height,
            "entry ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.raw(x, y)
    }

    /// Channel sums over the inclusive box `[x0, x1] x [y0, y1]`.
    ///
    /// Four-corner inclusion-exclusion: `S(x1,y1) - S(x0-1,y1) - S(x1,y0-1)
    /// + S(x0-1,y0-1)`, with corners outside the table contributing zero.
    /// Reversed or out-of-range corners are validation errors rather than
    /// being clamped, so indexing bugs in callers surface.
    pub fn region_sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> LuxelResult<[f64; 4]> {
        if x1 >= self.width || y1 >= self.height {
            return Err(LuxelError::validation(format!(
                "region corner ({x1}, {y1}) out of bounds for {}x{}",
                self.width, self.height
            )));
        }
        if x0 > x1 || y0 > y1 {
            return Err(LuxelError::validation(format!(
                "region corners reversed: ({x0}, {y0}) to ({x1}, {y1})"
            )));
        }

        let mut out = self.raw(x1, y1);
        if x0 > 0 {
            let s = self.raw(x0 - 1, y1);
            for k in 0..4 {
                out[k] -= s[k];
            }
        }
        if y0 > 0 {
            let s = self.raw(x1, y0 - 1);
            for k in 0..4 {
                out[k] -= s[k];
            }
        }
        if x0 > 0 && y0 > 0 {
            let s = self.raw(x0 - 1, y0 - 1);
            for k in 0..4 {
                out[k] += s[k];
            }
        }
        Ok(out)
    }

    /// Per-channel mean over the inclusive box `[x0, x1] x [y0, y1]`.
    pub fn region_mean(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> LuxelResult<[f64; 4]> {
        let mut out = self.region_sum(x0, y0, x1, y1)?;
        let count = f64::from(x1 - x0 + 1) * f64::from(y1 - y0 + 1);
        for v in &mut out {
            *v /= count;
        }
        Ok(out)
    }

    fn raw(&self, x: u32, y: u32) -> [f64; 4] {
        let idx = 4 * (y as usize * self.width as usize + x as usize);
        let s = &self.sums[idx..idx + 4];
        [s[0], s[1], s[2], s[3]]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/sat.rs"]
mod tests;
