use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;

use crate::font::{FontFace, Result, ScaledFont};

/// Key for identifying a font within the cache.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    /// Path to the font file on disk.
    pub path: PathBuf,
    /// Font index within the file (for collections).
    pub index: u32,
}

impl FontKey {
    pub fn new(path: impl AsRef<Path>, index: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            index: index as u32,
        }
    }
}

/// In-memory font cache keyed by file path and index.
///
/// Owned by whoever drives a batch of generation calls; the rendering
/// core itself never holds on to it.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: HashMap<FontKey, Arc<FontFace>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }

    /// Get a font face from the cache or load it from disk.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>, index: usize) -> Result<Arc<FontFace>> {
        let key = FontKey::new(&path, index);
        if let Some(face) = self.fonts.get(&key) {
            return Ok(face.clone());
        }

        log::debug!("loading font {}#{}", key.path.display(), key.index);
        let face = Arc::new(FontFace::from_path(&key.path, index)?);
        self.fonts.insert(key, face.clone());
        Ok(face)
    }

    /// Load (or reuse) the face at `path` and bind it to `size` pixels.
    pub fn scaled(&mut self, path: impl AsRef<Path>, size: f32) -> Result<ScaledFont> {
        Ok(ScaledFont::new(self.get_or_load(path, 0)?, size))
    }
}

/// Locate an installed font file through `fontdb`.
///
/// `families` are tried in order after the generic sans-serif family.
/// Only faces backed by a file are returned since coverage queries are
/// made against font paths.
pub fn find_system_font(families: &[&str]) -> Option<PathBuf> {
    use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};

    let mut db = Database::new();
    db.load_system_fonts();

    let mut wanted: Vec<Family<'_>> = families.iter().map(|name| Family::Name(name)).collect();
    wanted.push(Family::SansSerif);

    let id = db.query(&Query {
        families: &wanted,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
        ..Query::default()
    })?;

    match &db.face(id)?.source {
        Source::File(path) | Source::SharedFile(path, _) => Some(path.clone()),
        Source::Binary(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_distinguish_collection_index() {
        assert_ne!(FontKey::new("a.ttc", 0), FontKey::new("a.ttc", 1));
        assert_eq!(FontKey::new("a.ttf", 0), FontKey::new("a.ttf", 0));
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let mut cache = FontCache::new();
        assert!(cache.get_or_load("/nonexistent/trdg/missing.ttf", 0).is_err());
        assert!(cache.fonts.is_empty());
    }
}
