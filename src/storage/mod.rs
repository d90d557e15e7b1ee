use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbaImage};
use thiserror::Error;

use crate::config::AppConfig;

/// Raster exports always use this name.
pub const PNG_EXPORT_FILE_NAME: &str = "text-overlay-image.png";
const DEFAULT_EXPORT_SUBDIR: &str = "Pictures";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("{0} is not a recognised image file")]
    NotAnImage(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Filesystem side of export and import.
pub trait CaptionStorage {
    fn save_png(&self, image: &RgbaImage) -> StorageResult<PathBuf>;
    fn save_document(&self, file_name: &str, contents: &str) -> StorageResult<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct StorageService {
    export_dir: PathBuf,
}

impl StorageService {
    pub const fn with_paths(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }

    /// `$HOME/Pictures`, created if missing.
    pub fn with_default_paths() -> StorageResult<Self> {
        let home = std::env::var("HOME").map_err(|_| StorageError::MissingHomeDirectory)?;
        let mut export_dir = PathBuf::from(home);
        export_dir.push(DEFAULT_EXPORT_SUBDIR);
        fs::create_dir_all(&export_dir)?;
        Ok(Self::with_paths(export_dir))
    }

    /// Configured export directory, else the default one.
    pub fn from_config(config: &AppConfig) -> StorageResult<Self> {
        match &config.export_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                Ok(Self::with_paths(dir.clone()))
            }
            None => Self::with_default_paths(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn png_export_path(&self) -> PathBuf {
        self.export_dir.join(PNG_EXPORT_FILE_NAME)
    }

    pub fn save_png(&self, image: &RgbaImage) -> StorageResult<PathBuf> {
        let target = self.png_export_path();
        ensure_parent(&target)?;
        image.save_with_format(&target, ImageFormat::Png)?;
        tracing::info!(path = %target.display(), "image exported");
        Ok(target)
    }

    pub fn save_document(&self, file_name: &str, contents: &str) -> StorageResult<PathBuf> {
        let target = self.export_dir.join(file_name);
        ensure_parent(&target)?;
        fs::write(&target, contents)?;
        tracing::info!(path = %target.display(), "caption document exported");
        Ok(target)
    }
}

impl CaptionStorage for StorageService {
    fn save_png(&self, image: &RgbaImage) -> StorageResult<PathBuf> {
        self.save_png(image)
    }

    fn save_document(&self, file_name: &str, contents: &str) -> StorageResult<PathBuf> {
        self.save_document(file_name, contents)
    }
}

fn ensure_parent(path: &Path) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn read_document(path: impl AsRef<Path>) -> StorageResult<String> {
    Ok(fs::read_to_string(path)?)
}

/// Picker path: every failure is reported.
pub fn load_image_file(path: impl AsRef<Path>) -> StorageResult<RgbaImage> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    if reader.format().is_none() {
        return Err(StorageError::NotAnImage(path.to_path_buf()));
    }
    let image = reader.decode()?.to_rgba8();
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "image loaded"
    );
    Ok(image)
}

/// Drop path: anything that does not decode as an image is ignored.
pub fn accept_dropped_file(path: impl AsRef<Path>) -> Option<RgbaImage> {
    let path = path.as_ref();
    match load_image_file(path) {
        Ok(image) => Some(image),
        Err(err) => {
            tracing::debug!(path = %path.display(), ?err, "ignoring dropped file");
            None
        }
    }
}
