//! strudel-manifest library interface
//!
//! Classifies audio sample files by filename and path heuristics and
//! assembles a deterministic Strudel-style JSON manifest (`_base` plus
//! bucket entries). The binary in `main.rs` is a thin CLI wrapper around
//! these modules.

pub mod error;
pub mod services;
pub mod types;

pub use crate::error::ScanError;
pub use crate::types::{AudioFile, Bucket, KeySignature};
