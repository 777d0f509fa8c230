use rayon::prelude::*;

use crate::texture::record::TextureRecord;

#[derive(Clone, Debug)]
/// One level of a mipmap pyramid: an owned row-major RGBA `f32` image.
pub struct MipLevel {
    width: u32,
    height: u32,
    texels: Vec<f32>,
}

impl MipLevel {
    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel buffer, `4 * width * height` floats.
    pub fn texels(&self) -> &[f32] {
        &self.texels
    }

    /// Fetch the RGBA channels of one texel.
    ///
    /// Panics when `x` or `y` is out of bounds.
    pub fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        assert!(
            x < self.width && y < self.height,
            "texel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let idx = 4 * (y as usize * self.width as usize + x as usize);
        let t = &self.texels[idx..idx + 4];
        [t[0], t[1], t[2], t[3]]
    }
}

#[derive(Clone, Debug)]
/// Box-filtered minification chain of a texture, finest level first.
///
/// Level 0 is a copy of the source record's texels (never an alias); level
/// `i` floor-halves level `i-1` in both dimensions. The chain is sized
/// exactly to the computed level count.
pub struct MipmapPyramid {
    levels: Vec<MipLevel>,
}

impl MipmapPyramid {
    /// Build the full chain for a texture.
    ///
    /// The level count comes from halving the larger source dimension until
    /// it would drop below 2; a 1x1 source still yields its single level-0
    /// copy. Each destination texel averages the corresponding 2x2 block of
    /// the previous level per channel; the trailing row or column of an odd
    /// dimension is truncated, not padded. Box filtering is the only filter
    /// offered.
    pub fn build(texture: &TextureRecord) -> Self {
        let nlevels = level_count(texture.width(), texture.height());
        let mut levels = Vec::with_capacity(nlevels as usize);
        levels.push(MipLevel {
            width: texture.width(),
            height: texture.height(),
            texels: texture.texels().to_vec(),
        });
        for _ in 1..nlevels {
            let next = downsample_box(&levels[levels.len() - 1]);
            levels.push(next);
        }
        Self { levels }
    }

    /// Number of levels in the chain, including level 0.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// All levels, finest first.
    pub fn levels(&self) -> &[MipLevel] {
        &self.levels
    }

    /// One level by index; 0 is the source resolution.
    pub fn level(&self, index: usize) -> Option<&MipLevel> {
        self.levels.get(index)
    }
}

fn level_count(width: u32, height: u32) -> u32 {
    let mut size = width.max(height);
    let mut n = 0u32;
    while size >= 2 {
        n += 1;
        size /= 2;
    }
    n.max(1)
}

/// 2x2 unweighted mean per channel. Destination rows are independent, so the
/// filter runs row-parallel.
fn downsample_box(src: &MipLevel) -> MipLevel {
    let dst_w = src.width / 2;
    let dst_h = src.height / 2;
    if dst_w == 0 || dst_h == 0 {
        // A degenerate aspect ratio (e.g. 256x1) halves its short side to
        // zero before the chain ends; such levels are empty.
        return MipLevel {
            width: dst_w,
            height: dst_h,
            texels: Vec::new(),
        };
    }

    let src_row = src.width as usize * 4;
    let dst_row = dst_w as usize * 4;
    let mut texels = vec![0.0f32; dst_row * dst_h as usize];

    texels
        .par_chunks_mut(dst_row)
        .enumerate()
        .for_each(|(y, row)| {
            let top = &src.texels[2 * y * src_row..][..src_row];
            let bottom = &src.texels[(2 * y + 1) * src_row..][..src_row];
            for x in 0..dst_w as usize {
                let a = &top[8 * x..8 * x + 4];
                let b = &top[8 * x + 4..8 * x + 8];
                let c = &bottom[8 * x..8 * x + 4];
                let d = &bottom[8 * x + 4..8 * x + 8];
                for k in 0..4 {
                    row[4 * x + k] = 0.25 * (a[k] + b[k] + c[k] + d[k]);
                }
            }
        });

    MipLevel {
        width: dst_w,
        height: dst_h,
        texels,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/mipmap.rs"]
mod tests;
