use std::collections::HashMap;
use std::path::PathBuf;

use crate::{
    foundation::error::{LuxelError, LuxelResult},
    foundation::math::Fnv1a64,
    texture::decode::{DefaultDecoder, TextureDecoder, expand_to_rgba},
    texture::record::TextureRecord,
    texture::resolve::SearchPaths,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Stable hashed identifier for a cached texture source.
pub struct TextureId(u64);

impl TextureId {
    /// Construct a [`TextureId`] from a raw 64-bit value.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Identity-keyed store of loaded textures.
///
/// Each distinct source string is resolved and decoded at most once; repeat
/// [`TextureCache::load`] calls for the same source return the shared,
/// read-only [`TextureRecord`] without touching the filesystem. The cache is
/// an explicit object whose lifetime belongs to the owning render session;
/// dropping it releases every record no other owner still references.
///
/// Nothing evicts automatically: a session accumulates records for as long as
/// the cache lives. Growth is observable through [`TextureCache::len`] and
/// [`TextureCache::resident_bytes`] and boundable through
/// [`TextureCache::remove`] and [`TextureCache::clear`].
///
/// All mutation goes through `&mut self`, so wrapping the cache in a `Mutex`
/// makes lookup-plus-insert one atomic step: concurrent first-time requests
/// for the same source still decode exactly once. Records themselves are
/// immutable and cheaply cloneable, safe to read from any thread.
pub struct TextureCache {
    search: Option<SearchPaths>,
    decoder: Box<dyn TextureDecoder>,
    ids_by_source: HashMap<String, TextureId>,
    textures_by_id: HashMap<TextureId, TextureRecord>,
    decode_counts: HashMap<TextureId, u64>,
}

impl std::fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureCache")
            .field("textures", &self.textures_by_id.len())
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl TextureCache {
    /// Cache that resolves sources against the session's search paths.
    pub fn new(search: SearchPaths) -> Self {
        Self::with_decoder(Some(search), Box::new(DefaultDecoder))
    }

    /// Cache with no session context.
    ///
    /// Sources are used as verbatim filesystem paths and every first-time
    /// load emits a degraded-mode warning, mirroring a loader invoked before
    /// the renderer is initialized.
    pub fn detached() -> Self {
        Self::with_decoder(None, Box::new(DefaultDecoder))
    }

    /// Cache with a caller-supplied decoder; `None` search paths selects the
    /// detached mode of [`TextureCache::detached`].
    pub fn with_decoder(search: Option<SearchPaths>, decoder: Box<dyn TextureDecoder>) -> Self {
        Self {
            search,
            decoder,
            ids_by_source: HashMap::new(),
            textures_by_id: HashMap::new(),
            decode_counts: HashMap::new(),
        }
    }

    /// Load a texture, or return the already-cached record for its source.
    ///
    /// A cache hit performs no resolution, IO, or decode. On a miss the
    /// source is resolved (see [`SearchPaths::resolve`]), read, decoded, and
    /// expanded to RGBA; any failure propagates as a [`LuxelError`] value
    /// with its diagnostics intact.
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, source: &str) -> LuxelResult<TextureRecord> {
        let key = normalize_source(source)?;
        let id = Self::hash_source(&key);
        if let Some(record) = self.textures_by_id.get(&id) {
            return Ok(record.clone());
        }

        let resolved = self.resolve(&key)?;
        let resolved_display = resolved.display().to_string();
        let bytes = std::fs::read(&resolved)
            .map_err(|_| LuxelError::not_found(key.clone(), self.searched()))?;

        let decoded = self
            .decoder
            .decode(&bytes)
            .map_err(|e| LuxelError::decode(resolved_display.as_str(), e))?;
        let texels = expand_to_rgba(&decoded)
            .map_err(|e| LuxelError::decode(resolved_display.as_str(), e))?;
        let record = TextureRecord::from_rgba(decoded.width, decoded.height, texels)?;

        tracing::info!(
            source = %key,
            path = %resolved_display,
            width = decoded.width,
            height = decoded.height,
            "loaded texture"
        );

        self.ids_by_source.insert(key, id);
        self.textures_by_id.insert(id, record.clone());
        *self.decode_counts.entry(id).or_insert(0) += 1;
        Ok(record)
    }

    /// Identity key a source string maps to, without loading anything.
    pub fn id_for(&self, source: &str) -> LuxelResult<TextureId> {
        Ok(Self::hash_source(&normalize_source(source)?))
    }

    /// Cached record for an id, if one is resident.
    pub fn get(&self, id: TextureId) -> Option<&TextureRecord> {
        self.textures_by_id.get(&id)
    }

    /// Whether a source currently has a resident record.
    pub fn contains(&self, source: &str) -> bool {
        normalize_source(source)
            .map(|key| self.ids_by_source.contains_key(&key))
            .unwrap_or(false)
    }

    /// Times the decoder ran for an id, cumulative for the cache's lifetime.
    ///
    /// Stays at 1 for any number of repeat loads of a cached source; a load
    /// after [`TextureCache::remove`] or [`TextureCache::clear`] decodes
    /// again and increments it.
    pub fn decode_count(&self, id: TextureId) -> u64 {
        self.decode_counts.get(&id).copied().unwrap_or(0)
    }

    /// Number of resident records.
    pub fn len(&self) -> usize {
        self.textures_by_id.len()
    }

    /// Whether no records are resident.
    pub fn is_empty(&self) -> bool {
        self.textures_by_id.is_empty()
    }

    /// Heap bytes held by resident texel buffers.
    pub fn resident_bytes(&self) -> usize {
        self.textures_by_id.values().map(|r| r.byte_size()).sum()
    }

    /// Drop one record, returning it if it was resident.
    pub fn remove(&mut self, id: TextureId) -> Option<TextureRecord> {
        self.ids_by_source.retain(|_, v| *v != id);
        self.textures_by_id.remove(&id)
    }

    /// Drop every resident record. Decode counters are kept.
    pub fn clear(&mut self) {
        self.ids_by_source.clear();
        self.textures_by_id.clear();
    }

    /// Search paths in use, or `None` in detached mode.
    pub fn search_paths(&self) -> Option<&SearchPaths> {
        self.search.as_ref()
    }

    fn resolve(&self, key: &str) -> LuxelResult<PathBuf> {
        match &self.search {
            Some(paths) => paths
                .resolve(key)
                .ok_or_else(|| LuxelError::not_found(key, paths.display_list())),
            None => {
                tracing::warn!(
                    source = %key,
                    "no search paths configured; using texture source verbatim"
                );
                Ok(PathBuf::from(key))
            }
        }
    }

    fn searched(&self) -> Vec<String> {
        self.search
            .as_ref()
            .map(|s| s.display_list())
            .unwrap_or_default()
    }

    fn hash_source(key: &str) -> TextureId {
        let mut hasher = Fnv1a64::new_default();
        hasher.write_u8(b'T');
        hasher.write_bytes(key.as_bytes());
        TextureId(hasher.finish())
    }
}

/// Canonicalize a texture source string into its cache key.
///
/// Backslashes become `/` and redundant `.` or empty segments are dropped, so
/// the same file referenced with platform-specific separators maps to one
/// cache entry. Absolute paths stay absolute. An empty or segment-free source
/// is a validation error.
pub fn normalize_source(source: &str) -> LuxelResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(LuxelError::validation("texture source must be non-empty"));
    }

    let absolute = s.starts_with('/');
    let mut parts = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        parts.push(part);
    }

    if parts.is_empty() {
        return Err(LuxelError::validation(
            "texture source must contain a file name",
        ));
    }

    let joined = parts.join("/");
    Ok(if absolute { format!("/{joined}") } else { joined })
}

#[cfg(test)]
#[path = "../../tests/unit/texture/cache.rs"]
mod tests;
