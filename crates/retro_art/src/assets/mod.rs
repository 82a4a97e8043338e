//! Asset management system
//!
//! Bitmaps are decoded once at scene construction and owned by a
//! [`BitmapStore`] for the rest of the session. Elements refer to them by
//! [`BitmapKey`], so the three star images of a rating widget are shared
//! rather than copied.

pub mod image_loader;
pub mod resolver;

pub use image_loader::Bitmap;
pub use resolver::{AssetResolver, FileResolver, MemoryResolver};

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    /// Handle to a bitmap owned by a [`BitmapStore`]
    pub struct BitmapKey;
}

/// Session-lifetime owner of decoded bitmaps
#[derive(Debug, Default)]
pub struct BitmapStore {
    bitmaps: SlotMap<BitmapKey, Bitmap>,
}

impl BitmapStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a bitmap and hand back its key
    pub fn insert(&mut self, bitmap: Bitmap) -> BitmapKey {
        self.bitmaps.insert(bitmap)
    }

    /// Look up a bitmap
    pub fn get(&self, key: BitmapKey) -> Option<&Bitmap> {
        self.bitmaps.get(key)
    }

    /// Number of bitmaps held
    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    /// True when no bitmap is held
    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// No file exists at any candidate location
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The file exists but could not be decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// IO error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_hands_out_distinct_keys() {
        let mut store = BitmapStore::new();
        let a = store.insert(image_loader::solid_color(2, 2, [255, 0, 0, 255]));
        let b = store.insert(image_loader::solid_color(3, 1, [0, 255, 0, 255]));

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a).map(|bmp| bmp.dimensions()), Some((2, 2)));
        assert_eq!(store.get(b).map(|bmp| bmp.dimensions()), Some((3, 1)));
    }
}
