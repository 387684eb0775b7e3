//! Emoji image sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{MosaicError, Result};
use crate::types::EmojiRecord;

/// Resolves an emoji to its decoded image.
pub trait EmojiImages {
    /// Load the image for an emoji. A missing or undecodable image is a
    /// [`MosaicError::MissingAsset`].
    fn load(&self, emoji: &EmojiRecord) -> Result<DynamicImage>;
}

/// Emoji images stored as `<id>.png` in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryImages {
    dir: PathBuf,
}

impl DirectoryImages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name for an emoji's image.
    pub fn file_name(emoji: &EmojiRecord) -> String {
        format!("{}.png", emoji.id)
    }

    pub fn path_for(&self, emoji: &EmojiRecord) -> PathBuf {
        self.dir.join(Self::file_name(emoji))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl EmojiImages for DirectoryImages {
    fn load(&self, emoji: &EmojiRecord) -> Result<DynamicImage> {
        let path = self.path_for(emoji);
        image::open(&path).map_err(|e| missing(emoji, format!("{}: {}", path.display(), e)))
    }
}

/// Images already decoded in memory, keyed by emoji id.
impl EmojiImages for HashMap<u64, DynamicImage> {
    fn load(&self, emoji: &EmojiRecord) -> Result<DynamicImage> {
        self.get(&emoji.id)
            .cloned()
            .ok_or_else(|| missing(emoji, "no image loaded".to_string()))
    }
}

fn missing(emoji: &EmojiRecord, message: String) -> MosaicError {
    MosaicError::MissingAsset {
        id: emoji.id,
        name: emoji.name.clone(),
        message,
    }
}
