//! Shared value types for manifest construction
//!
//! All types here are derived, immutable-once-built values: a discovered
//! audio file, an extracted key signature, and the polymorphic bucket that
//! accumulates relative paths either as a plain list or as a pitch-map.

use std::collections::BTreeMap;

use serde_json::Value;

/// Pitch label used for files without an extractable key inside a
/// pitch-mapped bucket.
pub const UNPITCHED: &str = "unpitched";

/// A discovered audio file, reduced to the two strings classification
/// operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    /// Path relative to the scan root, POSIX separators, NFC-composed
    pub relative_path: String,
    /// Filename without extension, as found on disk
    pub stem: String,
}

/// Musical key extracted from a filename stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySignature {
    /// Canonical pitch root (flats preferred, `f#` kept sharp)
    pub root: String,
    /// True for minor quality (`m`/`min` suffix)
    pub minor: bool,
    /// Octave digit when the octave-qualified grammar matched
    pub octave: Option<u8>,
}

impl KeySignature {
    /// Pitch label for keymapped one-shot buckets, e.g. `c3`.
    ///
    /// Files named without an octave default to octave 4.
    pub fn pitch_label(&self) -> String {
        format!("{}{}", self.root, self.octave.unwrap_or(4))
    }

    /// Key label for loop bucket keys, e.g. `c` or `cm`.
    pub fn loop_label(&self) -> String {
        if self.minor {
            format!("{}m", self.root)
        } else {
            self.root.clone()
        }
    }
}

/// A named aggregate of relative paths, polymorphic in shape.
///
/// A bucket starts in whichever shape its first contribution requires. The
/// only shape change allowed afterward is `PlainList` -> `PitchMap`, which
/// happens the first time a pitched contribution arrives for a key that so
/// far only received unpitched ones; existing entries move under the
/// `"unpitched"` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    PlainList(Vec<String>),
    PitchMap(BTreeMap<String, Vec<String>>),
}

impl Bucket {
    /// Append a path without pitch information.
    ///
    /// Plain lists take it directly; pitch-mapped buckets file it under
    /// `"unpitched"`. Duplicate paths are never appended twice.
    pub fn push(&mut self, relative_path: &str) {
        match self {
            Bucket::PlainList(paths) => push_unique(paths, relative_path),
            Bucket::PitchMap(map) => {
                push_unique(map.entry(UNPITCHED.to_string()).or_default(), relative_path)
            }
        }
    }

    /// Append a path under a pitch label, promoting a plain list to a
    /// pitch-map first if needed.
    pub fn push_pitched(&mut self, pitch: &str, relative_path: &str) {
        if let Bucket::PlainList(paths) = self {
            let mut map = BTreeMap::new();
            if !paths.is_empty() {
                map.insert(UNPITCHED.to_string(), std::mem::take(paths));
            }
            *self = Bucket::PitchMap(map);
        }
        if let Bucket::PitchMap(map) = self {
            push_unique(map.entry(pitch.to_string()).or_default(), relative_path);
        }
    }

    /// Render the bucket as a JSON value with every list sorted.
    pub fn into_value(self) -> Value {
        match self {
            Bucket::PlainList(paths) => sorted_array(paths),
            Bucket::PitchMap(map) => {
                let mut obj = serde_json::Map::new();
                for (pitch, paths) in map {
                    obj.insert(pitch, sorted_array(paths));
                }
                Value::Object(obj)
            }
        }
    }
}

fn push_unique(paths: &mut Vec<String>, relative_path: &str) {
    if !paths.iter().any(|p| p == relative_path) {
        paths.push(relative_path.to_string());
    }
}

fn sorted_array(mut paths: Vec<String>) -> Value {
    paths.sort();
    Value::Array(paths.into_iter().map(Value::String).collect())
}
