use std::sync::Arc;

use crate::foundation::error::{LuxelError, LuxelResult};

#[derive(Clone, Debug)]
/// Loaded texture in row-major RGBA `f32` form.
///
/// Records are immutable once constructed: no accessor mutates the texels and
/// `Clone` only bumps the reference count of the shared buffer, so a cached
/// record can be handed to any number of readers at once. Derived
/// representations (mip levels, summed-area tables, reprojections) copy the
/// texels they need instead of aliasing this buffer.
pub struct TextureRecord {
    width: u32,
    height: u32,
    texels: Arc<Vec<f32>>,
}

impl TextureRecord {
    /// Wrap a row-major RGBA buffer, validating dimensions and length.
    ///
    /// The buffer must hold exactly `4 * width * height` floats in R,G,B,A
    /// channel order.
    pub fn from_rgba(width: u32, height: u32, texels: Vec<f32>) -> LuxelResult<Self> {
        if width == 0 || height == 0 {
            return Err(LuxelError::validation(
                "texture dimensions must be non-zero",
            ));
        }
        let expected = rgba_len(width, height)?;
        if texels.len() != expected {
            return Err(LuxelError::validation(format!(
                "texture buffer holds {} floats, expected {expected} for {width}x{height} RGBA",
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels: Arc::new(texels),
        })
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full texel buffer, `4 * width * height` floats, row-major RGBA.
    pub fn texels(&self) -> &[f32] {
        &self.texels
    }

    /// Fetch the RGBA channels of one texel.
    ///
    /// Panics when `x` or `y` is out of bounds; samplers are expected to have
    /// clamped or wrapped their coordinates already.
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

    /// Heap bytes held by the texel buffer.
    pub fn byte_size(&self) -> usize {
        self.texels.len() * std::mem::size_of::<f32>()
    }
}

/// Checked `4 * width * height`, guarding the buffer-size arithmetic.
pub(crate) fn rgba_len(width: u32, height: u32) -> LuxelResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| LuxelError::invariant("texture buffer size overflows usize"))
}

#[cfg(test)]
#[path = "../../tests/unit/texture/record.rs"]
mod tests;
