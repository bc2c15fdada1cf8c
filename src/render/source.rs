use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CardforgeError, CardforgeResult};

/// Image-resource resolver: turns a storage-location token plus filename
/// into raw encoded image bytes.
///
/// `Sync` so the compositor may fetch independent layers in parallel.
pub trait ImageSource: Sync {
    fn load(&self, folder: &str, filename: &str) -> CardforgeResult<Vec<u8>>;
}

/// Filesystem-backed source: `root/<folder>/<filename>`.
#[derive(Clone, Debug)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory asset paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, folder: &str, filename: &str) -> CardforgeResult<Vec<u8>> {
        let path = self.root.join(folder).join(filename);
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(CardforgeError::from)
    }
}

/// In-memory source for blob-backed callers and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    entries: HashMap<(String, String), Vec<u8>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes under a folder/filename pair.
    pub fn insert(
        &mut self,
        folder: impl Into<String>,
        filename: impl Into<String>,
        bytes: Vec<u8>,
    ) {
        self.entries.insert((folder.into(), filename.into()), bytes);
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, folder: &str, filename: &str) -> CardforgeResult<Vec<u8>> {
        self.entries
            .get(&(folder.to_string(), filename.to_string()))
            .cloned()
            .ok_or_else(|| {
                CardforgeError::render(format!("no image registered for '{folder}/{filename}'"))
            })
    }
}

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> CardforgeResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}
