//! Luxel is the texture-resource subsystem of a CPU renderer.
//!
//! It turns image files into a uniform in-memory representation
//! ([`TextureRecord`]), caches them by identity ([`TextureCache`]), and derives
//! the precomputed representations a shading pipeline samples from: box-filtered
//! mipmap pyramids ([`MipmapPyramid`]), double-precision summed-area tables
//! ([`SummedAreaTable`]), and equirectangular reprojections of angular
//! light-probe maps ([`angular_to_longlat`]).
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `source string + SearchPaths -> on-disk path`
//! 2. **Decode**: `bytes -> DecodedImage -> RGBA f32 texels`
//! 3. **Cache**: one decode per distinct source; records are shared read-only
//! 4. **Derive**: `TextureRecord -> MipmapPyramid | SummedAreaTable | long-lat map`
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable records**: a [`TextureRecord`]'s texels never change after
//!   construction; derived representations copy, they do not alias.
//! - **Errors are values**: a missing or undecodable texture is a
//!   [`LuxelError`] carrying its diagnostics, never a process exit.
//! - **No hidden globals**: the cache is an explicit object whose lifetime the
//!   caller owns.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod envmap;
mod filter;
mod foundation;
mod texture;

pub use envmap::angular::angular_to_longlat;
pub use filter::mipmap::{MipLevel, MipmapPyramid};
pub use filter::sat::SummedAreaTable;
pub use foundation::error::{LuxelError, LuxelResult};
pub use texture::cache::{TextureCache, TextureId, normalize_source};
pub use texture::decode::{DecodedImage, DefaultDecoder, TextureDecoder, expand_to_rgba};
pub use texture::record::TextureRecord;
pub use texture::resolve::SearchPaths;
