use std::{
    fs,
    path::{Path, PathBuf},
};

use ahash::AHashMap;
use glam::{uvec2, UVec2};

use crate::error::CompileError;

/// Pixel sizes of the textures a map can reference.
pub trait TextureSizes {
    fn size(&self, name: &str) -> Option<UVec2>;
}

impl TextureSizes for AHashMap<String, UVec2> {
    fn size(&self, name: &str) -> Option<UVec2> {
        self.get(name).copied()
    }
}

/// The `name width height` table kept in the data directory.
#[derive(Clone, Debug, Default)]
pub struct TextureCache {
    sizes: AHashMap<String, UVec2>,
}

impl TextureCache {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("textures").join("texturecache.txt")
    }

    pub fn load(data_dir: &Path) -> Result<Self, CompileError> {
        let path = Self::path(data_dir);
        let text = fs::read_to_string(&path).map_err(|source| CompileError::Io {
            path: path.clone(),
            source,
        })?;

        let cache = Self::parse(&text)?;
        log::debug!("Loaded {} texture sizes from {}", cache.len(), path.display());
        Ok(cache)
    }

    pub fn parse(text: &str) -> Result<Self, CompileError> {
        let mut cache = Self::default();

        for (index, line) in text.lines().enumerate() {
            let format_error = |message| CompileError::TextureCacheFormat {
                line: index + 1,
                message,
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            let [name @ .., width, height] = fields.as_slice() else {
                return Err(format_error("expected `name width height`"));
            };
            if name.is_empty() {
                return Err(format_error("expected `name width height`"));
            }

            let (Ok(width), Ok(height)) = (width.parse::<u32>(), height.parse::<u32>()) else {
                return Err(format_error("width and height must be whole numbers"));
            };
            if width == 0 || height == 0 {
                return Err(format_error("width and height must be positive"));
            }

            cache.insert(name.join(" "), uvec2(width, height));
        }

        Ok(cache)
    }

    pub fn insert(&mut self, name: impl Into<String>, size: UVec2) {
        self.sizes.insert(name.into(), size);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl TextureSizes for TextureCache {
    fn size(&self, name: &str) -> Option<UVec2> {
        self.sizes.size(name)
    }
}

#[cfg(test)]
mod texture_cache_tests {
    use super::*;

    #[test]
    fn parses_size_table() {
        let cache = TextureCache::parse("base/floor 64 64\n\nbase/wall 128 32\nsky/day one 256 256\n")
            .unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.size("base/floor"), Some(uvec2(64, 64)));
        assert_eq!(cache.size("base/wall"), Some(uvec2(128, 32)));
        assert_eq!(cache.size("sky/day one"), Some(uvec2(256, 256)));
        assert_eq!(cache.size("base/missing"), None);
    }

    #[test]
    fn rejects_bad_lines() {
        for (text, line) in [
            ("a 1 1\nb 2\n", 2),
            ("a 1 x\n", 1),
            ("a 0 16\n", 1),
            ("\n\na -1 16\n", 3),
        ] {
            match TextureCache::parse(text) {
                Err(CompileError::TextureCacheFormat { line: found, .. }) => {
                    assert_eq!(found, line, "{text:?}")
                }
                other => panic!("{text:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn missing_cache_file() {
        let dir = std::env::temp_dir().join(format!("mapc-no-cache-{}", std::process::id()));

        match TextureCache::load(&dir) {
            Err(CompileError::Io { path, .. }) => assert_eq!(path, TextureCache::path(&dir)),
            other => panic!("expected an io error, got {other:?}"),
        }
    }
}
