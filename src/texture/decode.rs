use anyhow::Context;

use crate::foundation::error::{LuxelError, LuxelResult};

#[derive(Clone, Debug)]
/// Decoder output before RGBA expansion: dimensions plus native-channel float
/// samples, row-major, `channels` floats per pixel.
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel as stored in the source file (1 to 4).
    pub channels: u8,
    /// Samples normalized to `[0, 1]` for integer sources, `width * height *
    /// channels` floats.
    pub samples: Vec<f32>,
}

/// Contract of the image-decode collaborator: encoded file bytes in, float
/// samples out.
///
/// The cache owns a boxed decoder, so tests can substitute an implementation
/// that counts calls or fabricates pixels without touching the filesystem.
pub trait TextureDecoder {
    /// Decode encoded image bytes into a [`DecodedImage`].
    fn decode(&mut self, bytes: &[u8]) -> LuxelResult<DecodedImage>;
}

#[derive(Clone, Copy, Debug, Default)]
/// Default decoder backed by the `image` crate.
///
/// The source channel count is preserved (gray stays one channel, gray+alpha
/// two, and so on); RGBA expansion is a separate, explicit step in
/// [`expand_to_rgba`].
pub struct DefaultDecoder;

impl TextureDecoder for DefaultDecoder {
    fn decode(&mut self, bytes: &[u8]) -> LuxelResult<DecodedImage> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;

        let (width, height, channels, samples) = match dyn_img.color().channel_count() {
            1 => {
                let buf = dyn_img.to_luma32f();
                let (w, h) = buf.dimensions();
                (w, h, 1, buf.into_raw())
            }
            2 => {
                let buf = dyn_img.to_luma_alpha32f();
                let (w, h) = buf.dimensions();
                (w, h, 2, buf.into_raw())
            }
            3 => {
                let buf = dyn_img.to_rgb32f();
                let (w, h) = buf.dimensions();
                (w, h, 3, buf.into_raw())
            }
            _ => {
                let buf = dyn_img.to_rgba32f();
                let (w, h) = buf.dimensions();
                (w, h, 4, buf.into_raw())
            }
        };

        Ok(DecodedImage {
            width,
            height,
            channels,
            samples,
        })
    }
}

/// Expand decoder samples to the uniform RGBA layout of a texture record.
///
/// Policy for sources with fewer than four channels:
/// 1 channel replicates luminance into R, G, B with alpha 1.0; 2 channels
/// replicate luminance and keep the source alpha; 3 channels keep RGB with
/// alpha 1.0; 4 channels pass through unchanged.
pub fn expand_to_rgba(img: &DecodedImage) -> LuxelResult<Vec<f32>> {
    let channels = usize::from(img.channels);
    if !(1..=4).contains(&channels) {
        return Err(LuxelError::validation(format!(
            "unsupported channel count {} (expected 1 to 4)",
            img.channels
        )));
    }

    let pixels = (img.width as usize)
        .checked_mul(img.height as usize)
        .ok_or_else(|| LuxelError::invariant("decoded image size overflows usize"))?;
    if img.samples.len() != pixels * channels {
        return Err(LuxelError::validation(format!(
            "decoded buffer holds {} samples, expected {} for {}x{} with {} channels",
            img.samples.len(),
            pixels * channels,
            img.width,
            img.height,
            img.channels
        )));
    }

    if channels == 4 {
        return Ok(img.samples.clone());
    }

    let mut out = Vec::with_capacity(pixels * 4);
    match channels {
        1 => {
            for &l in &img.samples {
                out.extend_from_slice(&[l, l, l, 1.0]);
            }
        }
        2 => {
            for px in img.samples.chunks_exact(2) {
                out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
        }
        _ => {
            for px in img.samples.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 1.0]);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/decode.rs"]
mod tests;
