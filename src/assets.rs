//! Asset loading
//!
//! Every load returns a `Result`; callers pick a fallback. Nothing in `sim`
//! depends on whether assets were found.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Color;
use crate::audio::{SoundBank, SoundEffect};
use crate::consts::FALLBACK_BACKGROUND;

/// Background art file name inside the asset directory
pub const BACKGROUND_FILE: &str = "background.png";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read asset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads raw asset bytes from a directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(name);
        fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                AssetError::Missing(path)
            } else {
                AssetError::Io { path, source }
            }
        })
    }

    pub fn load_background(&self) -> Result<Vec<u8>, AssetError> {
        self.read(BACKGROUND_FILE)
    }

    /// Load the sound effects. A missing required clip fails the whole bank;
    /// optional clips are skipped when absent.
    pub fn load_sound_bank(&self) -> Result<SoundBank, AssetError> {
        let mut bank = SoundBank::default();
        for effect in SoundEffect::ALL {
            match self.read(effect.file_name()) {
                Ok(bytes) => bank.insert(effect, bytes),
                Err(AssetError::Missing(path)) if !effect.is_required() => {
                    log::debug!("Optional sound {} not found", path.display());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(bank)
    }
}

/// What to draw behind the balloons
#[derive(Debug, Clone, PartialEq)]
pub enum Backdrop {
    /// Encoded background image
    Image(Vec<u8>),
    Solid(Color),
}

impl Backdrop {
    /// Background art, or a solid fill when it can't be loaded
    pub fn load(loader: &AssetLoader) -> Self {
        match loader.load_background() {
            Ok(bytes) => Backdrop::Image(bytes),
            Err(e) => {
                log::warn!("{e} - using solid background");
                Backdrop::Solid(FALLBACK_BACKGROUND)
            }
        }
    }
}
