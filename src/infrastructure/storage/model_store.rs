//! On-disk model layout
//!
//! `<models_dir>/whisper/<model>.pt` holds a finished checkpoint. Downloads
//! write to `<model>.pt.part` first, so a partial file never counts as
//! downloaded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::models::{Feature, ModelCatalog, ModelInfo, WhisperModel};
use crate::shared::errors::Result;
use crate::shared::logging::{log_catalog_listed, log_model_deleted};

#[derive(Debug, Clone)]
pub struct ModelStore {
    models_dir: PathBuf,
}

impl ModelStore {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn whisper_dir(&self) -> PathBuf {
        self.models_dir.join("whisper")
    }

    /// Create the directory tree used by downloads
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.whisper_dir())?;
        Ok(())
    }

    /// Delete `.part` files left behind by a process that died mid-download.
    /// Only safe before any download starts.
    pub fn remove_partials(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(self.whisper_dir())? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "part") && path.is_file() {
                fs::remove_file(&path)?;
                tracing::info!(path = %path.display(), "Removed stale partial download");
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn model_path(&self, model: WhisperModel) -> PathBuf {
        self.whisper_dir().join(model.file_name())
    }

    pub fn is_downloaded(&self, model: WhisperModel) -> bool {
        self.model_path(model).is_file()
    }

    /// Every known model with its download state and size
    pub fn catalog(&self) -> Result<ModelCatalog> {
        self.ensure_layout()?;

        let mut transcribe = Vec::with_capacity(WhisperModel::ALL.len());
        for model in WhisperModel::ALL {
            let info = match fs::metadata(self.model_path(model)) {
                Ok(meta) if meta.is_file() => ModelInfo {
                    downloaded: true,
                    size: meta.len(),
                    ..ModelInfo::not_downloaded(model)
                },
                Ok(_) => ModelInfo::not_downloaded(model),
                Err(e) if e.kind() == io::ErrorKind::NotFound => ModelInfo::not_downloaded(model),
                Err(e) => return Err(e.into()),
            };
            transcribe.push(info);
        }

        let mut catalog = ModelCatalog::default();
        catalog.models.insert(Feature::Transcribe, transcribe);
        log_catalog_listed(&self.models_dir, catalog.downloaded().count());
        Ok(catalog)
    }

    /// Remove a checkpoint. Returns whether a file was there.
    pub fn delete(&self, model: WhisperModel) -> Result<bool> {
        let path = self.model_path(model);
        let existed = match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        log_model_deleted(&path, existed);
        Ok(existed)
    }
}
