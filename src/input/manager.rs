//! Upload manager for resume files

use crate::error::{IntakeError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{PdfExtractor, TextExtractor};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

const SIZE_GUIDANCE_BYTES: u64 = 10 * 1024 * 1024;

pub struct UploadManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl UploadManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(IntakeError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        // 10 MB is guidance only, never a hard limit
        if let Ok(meta) = std::fs::metadata(path) {
            if meta.len() > SIZE_GUIDANCE_BYTES {
                warn!(
                    "Resume {} exceeds the 10 MB size guidance ({} bytes)",
                    path.display(),
                    meta.len()
                );
            }
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(IntakeError::UnsupportedFormat(format!(
                    "Only PDF resumes are accepted: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                IntakeError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for UploadManager {
    fn default() -> Self {
        Self::new()
    }
}
