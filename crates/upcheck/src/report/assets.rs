//! Bundled icon and sound assets, and their extraction to a scoped
//! temporary directory.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

pub const UP_ICON: &str = "icons/up.png";
pub const DOWN_ICON: &str = "icons/down.png";
pub const NOTIFICATION_SOUND: &str = "sounds/notification.wav";

const BUNDLE: &[(&str, &[u8])] = &[
    (UP_ICON, include_bytes!("../../assets/icons/up.png")),
    (DOWN_ICON, include_bytes!("../../assets/icons/down.png")),
    (NOTIFICATION_SOUND, include_bytes!("../../assets/sounds/notification.wav")),
];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("failed to extract asset to {path}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read-only source of bundled resources
pub trait AssetStore: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Cow<'static, [u8]>, AssetError>;
}

/// Assets compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetStore for EmbeddedAssets {
    fn read_file(&self, path: &str) -> Result<Cow<'static, [u8]>, AssetError> {
        BUNDLE
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

/// Temporary directory holding extracted assets. The directory and
/// everything in it is removed when this value is dropped.
#[derive(Debug)]
pub struct ExtractedAssets {
    dir: TempDir,
}

impl ExtractedAssets {
    pub fn new() -> Result<Self, AssetError> {
        let dir = tempfile::Builder::new()
            .prefix("upcheck-")
            .tempdir()
            .map_err(|source| AssetError::Extract { path: std::env::temp_dir(), source })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `asset` from `store` into the directory and return its path.
    /// Assets already extracted are not written again.
    pub fn extract(&self, store: &dyn AssetStore, asset: &str) -> Result<PathBuf, AssetError> {
        let file_name = Path::new(asset)
            .file_name()
            .ok_or_else(|| AssetError::NotFound(asset.to_string()))?;
        let dest = self.dir.path().join(file_name);
        if dest.exists() {
            return Ok(dest);
        }

        let bytes = store.read_file(asset)?;
        fs::write(&dest, &bytes)
            .map_err(|source| AssetError::Extract { path: dest.clone(), source })?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets_present() {
        for asset in [UP_ICON, DOWN_ICON, NOTIFICATION_SOUND] {
            let bytes = EmbeddedAssets.read_file(asset).unwrap();
            assert!(!bytes.is_empty(), "{asset} is empty");
        }
        assert!(matches!(EmbeddedAssets.read_file("icons/sideways.png"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_extract_and_cleanup() {
        let extracted = ExtractedAssets::new().unwrap();
        let dir = extracted.path().to_path_buf();

        let icon = extracted.extract(&EmbeddedAssets, UP_ICON).unwrap();
        assert_eq!(icon, dir.join("up.png"));
        assert_eq!(fs::read(&icon).unwrap().as_slice(), &*EmbeddedAssets.read_file(UP_ICON).unwrap());

        drop(extracted);
        assert!(!dir.exists());
    }
}
