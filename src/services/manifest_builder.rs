//! Manifest builder
//!
//! Combines the filename feature extractors and path classifiers into a
//! per-file bucket decision, accumulates buckets, and assembles the final
//! sorted manifest. Output is fully deterministic: every list, every
//! pitch-map and the top-level key space are sorted before rendering, so
//! discovery order never leaks into the document.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::services::feature_extractor::{extract_key, extract_tempo};
use crate::services::path_classifier::{
    detect_drum_group, guess_instrument, is_drum_loop, is_loop_folder,
};
use crate::types::{AudioFile, Bucket};

/// Accumulates per-file classification decisions into named buckets.
pub struct ManifestBuilder {
    prefix: String,
    buckets: BTreeMap<String, Bucket>,
}

impl ManifestBuilder {
    /// Create a builder for the given bucket-key prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            buckets: BTreeMap::new(),
        }
    }

    /// Classify one audio file and record its bucket contribution.
    ///
    /// A file is a loop if it lives under a loop folder, or if its stem
    /// carries both a tempo and a key (tempo+key co-occurrence is loop-style
    /// naming even without a loops folder). Everything else is a one-shot
    /// filed under an inferred instrument bucket.
    pub fn add(&mut self, file: &AudioFile) {
        let rel = file.relative_path.as_str();
        let tempo = extract_tempo(&file.stem);
        let key = extract_key(&file.stem);

        if is_loop_folder(rel) || (tempo.is_some() && key.is_some()) {
            if is_drum_loop(rel) {
                if let Some(group) = detect_drum_group(rel) {
                    let bucket_key = match tempo {
                        Some(bpm) => format!("{}_{}_{}", self.prefix, group, bpm),
                        None => format!("{}_{}", self.prefix, group),
                    };
                    self.push_plain(bucket_key, rel);
                    return;
                }
            }

            // Generic loop: most specific key shape available
            let bucket_key = match (tempo, &key) {
                (Some(bpm), Some(k)) => {
                    format!("{}_{}_{}", self.prefix, bpm, k.loop_label())
                }
                (Some(bpm), None) => format!("{}_{}", self.prefix, bpm),
                (None, _) => format!("{}_loops", self.prefix),
            };
            self.push_plain(bucket_key, rel);
            return;
        }

        let instrument = guess_instrument(rel);
        let bucket_key = format!("{}_{}", self.prefix, instrument);
        match key {
            Some(k) => {
                // Keymapped one-shot; promotes an existing plain list
                self.buckets
                    .entry(bucket_key)
                    .or_insert_with(|| Bucket::PitchMap(BTreeMap::new()))
                    .push_pitched(&k.pitch_label(), rel);
            }
            None => self.push_plain(bucket_key, rel),
        }
    }

    /// Assemble the final manifest: `_base` plus every bucket, all keys and
    /// all lists lexicographically sorted.
    pub fn build(self, base: &str) -> Value {
        let mut manifest = serde_json::Map::new();
        manifest.insert("_base".to_string(), Value::String(base.to_string()));
        for (bucket_key, bucket) in self.buckets {
            manifest.insert(bucket_key, bucket.into_value());
        }
        Value::Object(manifest)
    }

    fn push_plain(&mut self, bucket_key: String, rel: &str) {
        self.buckets
            .entry(bucket_key)
            .or_insert_with(|| Bucket::PlainList(Vec::new()))
            .push(rel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(relative_path: &str) -> AudioFile {
        let name = relative_path.rsplit('/').next().unwrap();
        let stem = match name.rfind('.') {
            Some(i) if i > 0 => &name[..i],
            _ => name,
        };
        AudioFile {
            relative_path: relative_path.to_string(),
            stem: stem.to_string(),
        }
    }

    fn build(paths: &[&str]) -> Value {
        let mut builder = ManifestBuilder::new("pack");
        for path in paths {
            builder.add(&file(path));
        }
        builder.build("https://cdn.example/pack/")
    }

    #[test]
    fn drum_loop_with_group_and_tempo() {
        let manifest = build(&["drums/loops/Breaks_120.wav"]);
        assert_eq!(
            manifest["pack_breaks_120"],
            serde_json::json!(["drums/loops/Breaks_120.wav"])
        );
    }

    #[test]
    fn drum_loop_group_without_tempo_omits_suffix() {
        let manifest = build(&["drums/loops/claps/tight.wav"]);
        assert_eq!(
            manifest["pack_claps"],
            serde_json::json!(["drums/loops/claps/tight.wav"])
        );
    }

    #[test]
    fn drum_loop_without_group_falls_through_to_generic() {
        let manifest = build(&["drums/loops/toms/Toms_95.wav"]);
        assert_eq!(
            manifest["pack_95"],
            serde_json::json!(["drums/loops/toms/Toms_95.wav"])
        );
    }

    #[test]
    fn generic_loop_with_tempo_and_key() {
        let manifest = build(&["loops/Piano_120_cm.wav"]);
        assert_eq!(
            manifest["pack_120_cm"],
            serde_json::json!(["loops/Piano_120_cm.wav"])
        );
    }

    #[test]
    fn tempo_and_key_outside_loop_folder_is_still_a_loop() {
        let manifest = build(&["melodic/Piano_120_cm.wav"]);
        assert_eq!(
            manifest["pack_120_cm"],
            serde_json::json!(["melodic/Piano_120_cm.wav"])
        );
    }

    #[test]
    fn loop_without_tempo_or_key_lands_in_loops_bucket() {
        let manifest = build(&["loops/amen.wav"]);
        assert_eq!(manifest["pack_loops"], serde_json::json!(["loops/amen.wav"]));
    }

    #[test]
    fn keymapped_one_shot() {
        let manifest = build(&["one shots/Bass/Bass_C3.wav"]);
        assert_eq!(
            manifest["pack_bass"],
            serde_json::json!({ "c3": ["one shots/Bass/Bass_C3.wav"] })
        );
    }

    #[test]
    fn pitched_one_shot_without_octave_defaults_to_4() {
        let manifest = build(&["Keys/pad_gm.wav"]);
        assert_eq!(
            manifest["pack_key"],
            serde_json::json!({ "g4": ["Keys/pad_gm.wav"] })
        );
    }

    #[test]
    fn unpitched_one_shot_stays_a_plain_list() {
        let manifest = build(&["Custom/Snares/Snare_Hit.wav"]);
        assert_eq!(
            manifest["pack_snare"],
            serde_json::json!(["Custom/Snares/Snare_Hit.wav"])
        );
    }

    #[test]
    fn mixed_bucket_promotes_and_files_unpitched() {
        // plain contribution first, pitched second: list is promoted and the
        // early file moves under "unpitched"
        let manifest = build(&["Bass/growl.wav", "Bass/Bass_C3.wav"]);
        assert_eq!(
            manifest["pack_bass"],
            serde_json::json!({
                "c3": ["Bass/Bass_C3.wav"],
                "unpitched": ["Bass/growl.wav"]
            })
        );
    }

    #[test]
    fn unpitched_after_pitched_files_under_unpitched() {
        let manifest = build(&["Bass/Bass_C3.wav", "Bass/growl.wav"]);
        assert_eq!(
            manifest["pack_bass"],
            serde_json::json!({
                "c3": ["Bass/Bass_C3.wav"],
                "unpitched": ["Bass/growl.wav"]
            })
        );
    }

    #[test]
    fn duplicate_contributions_are_dropped() {
        let manifest = build(&["loops/amen.wav", "loops/amen.wav"]);
        assert_eq!(manifest["pack_loops"], serde_json::json!(["loops/amen.wav"]));
    }

    #[test]
    fn index_number_is_not_a_tempo() {
        let manifest = build(&["loops/acid_313.wav"]);
        assert!(manifest.get("pack_313").is_none());
        assert_eq!(
            manifest["pack_loops"],
            serde_json::json!(["loops/acid_313.wav"])
        );
    }

    #[test]
    fn top_level_keys_are_sorted_with_base() {
        let manifest = build(&["loops/amen.wav", "Kicks/kick.wav"]);
        let keys: Vec<&String> = manifest.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["_base", "pack_kick", "pack_loops"]);
        assert_eq!(manifest["_base"], "https://cdn.example/pack/");
    }

    #[test]
    fn lists_are_sorted_regardless_of_insertion_order() {
        let forward = build(&["loops/b.wav", "loops/a.wav", "loops/c.wav"]);
        let reverse = build(&["loops/c.wav", "loops/a.wav", "loops/b.wav"]);
        assert_eq!(forward, reverse);
        assert_eq!(
            forward["pack_loops"],
            serde_json::json!(["loops/a.wav", "loops/b.wav", "loops/c.wav"])
        );
    }
}
