//! Asset path resolution
//!
//! Scene construction only needs "give me the bitmap behind this path, or
//! tell me it is not there". [`AssetResolver`] is that seam; the file
//! system implementation searches a list of root directories the same way
//! the shader and texture lookups of a game engine do.

use super::{image_loader, AssetError, Bitmap};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Turns a slot path string into a decoded bitmap
pub trait AssetResolver {
    /// Decode the bitmap behind `path`
    fn resolve(&self, path: &str) -> Result<Bitmap, AssetError>;

    /// Try candidates in order and return the first that decodes
    ///
    /// Every failure is logged at `warn` and otherwise swallowed: a missing
    /// asset degrades one element, it never aborts a session.
    fn resolve_first(&self, candidates: &[Option<&str>]) -> Option<(String, Bitmap)> {
        for candidate in candidates.iter().flatten() {
            if candidate.trim().is_empty() {
                continue;
            }
            match self.resolve(candidate) {
                Ok(bitmap) => return Some(((*candidate).to_string(), bitmap)),
                Err(e) => log::warn!("{}", e),
            }
        }
        None
    }
}

/// Resolves paths against the file system
#[derive(Debug, Clone, Default)]
pub struct FileResolver {
    search_paths: Vec<PathBuf>,
}

impl FileResolver {
    /// Resolver that only accepts paths as given (absolute or relative to the CWD)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory that relative paths are tried against, in insertion order
    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    /// Find the file a slot path refers to
    pub fn locate(&self, path: &str) -> Option<PathBuf> {
        let raw = Path::new(path);
        if raw.is_absolute() {
            return raw.is_file().then(|| raw.to_path_buf());
        }
        self.search_paths
            .iter()
            .map(|root| root.join(raw))
            .find(|candidate| candidate.is_file())
            .or_else(|| raw.is_file().then(|| raw.to_path_buf()))
    }
}

impl AssetResolver for FileResolver {
    fn resolve(&self, path: &str) -> Result<Bitmap, AssetError> {
        let located = self
            .locate(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        image_loader::from_file(located)
    }
}

/// In-memory resolver, handy for previews and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    bitmaps: HashMap<String, Bitmap>,
}

impl MemoryResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bitmap under a path
    pub fn with(mut self, path: impl Into<String>, bitmap: Bitmap) -> Self {
        self.bitmaps.insert(path.into(), bitmap);
        self
    }

    /// Register a bitmap under a path
    pub fn insert(&mut self, path: impl Into<String>, bitmap: Bitmap) {
        self.bitmaps.insert(path.into(), bitmap);
    }
}

impl AssetResolver for MemoryResolver {
    fn resolve(&self, path: &str) -> Result<Bitmap, AssetError> {
        self.bitmaps
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::image_loader::solid_color;

    #[test]
    fn test_resolve_first_skips_missing() {
        let resolver = MemoryResolver::new().with("fallback.png", solid_color(1, 1, [0, 0, 0, 255]));

        let (path, _) = resolver
            .resolve_first(&[Some("missing.png"), None, Some(""), Some("fallback.png")])
            .unwrap();
        assert_eq!(path, "fallback.png");

        assert!(resolver.resolve_first(&[Some("missing.png"), None]).is_none());
    }

    #[test]
    fn test_file_resolver_search_paths() {
        let root = std::env::temp_dir().join(format!("retro_art_resolver_{}", std::process::id()));
        std::fs::create_dir_all(root.join("covers")).unwrap();
        solid_color(4, 3, [1, 2, 3, 255])
            .save(root.join("covers").join("mario.png"))
            .unwrap();

        let resolver = FileResolver::new().with_search_path(&root);
        let bitmap = resolver.resolve("covers/mario.png").unwrap();
        assert_eq!(bitmap.dimensions(), (4, 3));
        assert!(matches!(
            resolver.resolve("covers/luigi.png"),
            Err(AssetError::NotFound(_))
        ));

        std::fs::remove_dir_all(&root).ok();
    }
}
