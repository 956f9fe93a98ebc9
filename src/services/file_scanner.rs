//! Audio file scanner
//!
//! Recursive audio file discovery by extension. Classification is
//! filename-only, so no file contents are ever read; discovery order is
//! irrelevant because the manifest builder sorts everything before output.

use std::collections::HashMap;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;
use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;
use crate::types::AudioFile;

/// Audio file scanner
pub struct FileScanner {
    ignore_patterns: Vec<String>,
}

impl FileScanner {
    /// Create new file scanner with default ignore patterns
    ///
    /// Ignores system files like .DS_Store, Thumbs.db, .git, etc.
    pub fn new() -> Self {
        Self {
            ignore_patterns: vec![
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
                ".git".to_string(),
                ".svn".to_string(),
                "node_modules".to_string(),
            ],
        }
    }

    /// Scan directory recursively for audio files
    ///
    /// Per-entry access errors are logged and skipped; only a missing or
    /// non-directory root is fatal.
    pub fn scan(&self, root: &Path) -> Result<Vec<AudioFile>, ScanError> {
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut files = Vec::new();
        let mut by_format: HashMap<String, usize> = HashMap::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let ext = match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => ext.to_lowercase(),
                None => continue,
            };
            if !Self::is_audio_extension(&ext) {
                continue;
            }

            if let Some(file) = Self::to_audio_file(path, root) {
                *by_format.entry(ext).or_insert(0) += 1;
                files.push(file);
            }
        }

        tracing::info!("Discovered {} audio files", files.len());
        tracing::debug!("By format: {:?}", by_format);

        Ok(files)
    }

    /// Check if extension is in the audio allow-set
    pub fn is_audio_extension(ext: &str) -> bool {
        matches!(ext, "wav" | "aif" | "aiff" | "flac" | "mp3" | "ogg")
    }

    /// Check if entry should be processed
    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| file_name.contains(pattern.as_str()))
    }

    /// Build the `AudioFile` value for a discovered path.
    ///
    /// The relative path uses POSIX separators and is NFC-composed so the
    /// same tree produces the same manifest on any filesystem; the stem is
    /// taken from the on-disk filename. Non-UTF-8 paths cannot appear in a
    /// UTF-8 JSON manifest and are skipped with a warning.
    fn to_audio_file(path: &Path, root: &Path) -> Option<AudioFile> {
        let relative = match path.strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => return None,
        };

        let mut segments: Vec<&str> = Vec::new();
        for component in relative.components() {
            match component.as_os_str().to_str() {
                Some(segment) => segments.push(segment),
                None => {
                    tracing::warn!("Skipping non-UTF-8 path: {}", path.display());
                    return None;
                }
            }
        }

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => return None,
        };

        Some(AudioFile {
            relative_path: segments.join("/").nfc().collect(),
            stem,
        })
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
