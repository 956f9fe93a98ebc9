//! Service modules for manifest construction
//!
//! Leaves first: text normalization, then the filename feature extractors
//! and path classifiers, then the builder that combines them into buckets.

pub mod feature_extractor;
pub mod file_scanner;
pub mod manifest_builder;
pub mod path_classifier;
pub mod text_normalizer;

pub use feature_extractor::{extract_key, extract_tempo};
pub use file_scanner::FileScanner;
pub use manifest_builder::ManifestBuilder;
pub use path_classifier::{
    detect_drum_group, guess_instrument, has_path_segment, is_drum_loop, is_loop_folder,
};
pub use text_normalizer::{normalize_note, slugify};
