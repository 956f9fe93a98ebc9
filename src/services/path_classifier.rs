//! Path-based classification
//!
//! Predicates over the `/`-delimited segments of a file's relative path:
//! loop-folder detection, drum-loop grouping, and instrument-name
//! inference for one-shots.

use crate::services::text_normalizer::slugify;

/// Folder names (slug form, underscores as spaces) that say nothing about
/// the instrument a sample belongs to.
const GENERIC_FOLDERS: [&str; 16] = [
    "loops",
    "loop",
    "one shots",
    "oneshots",
    "one_shots",
    "samples",
    "audio",
    "stems",
    "custom",
    "customs",
    "sounds",
    "sound",
    "fx",
    "sfx",
    "effects",
    "drums",
];

/// Recognized drum-loop sub-groups, with spelling aliases mapped to their
/// canonical name.
const DRUM_LOOP_GROUPS: [(&str, &str); 5] = [
    ("breaks", "breaks"),
    ("claps", "claps"),
    ("shakers", "shakers"),
    ("woodblock", "woodblock"),
    ("woodblck", "woodblock"),
];

/// True if any `/`-delimited segment of `relative_path` slugifies to `name`.
pub fn has_path_segment(relative_path: &str, name: &str) -> bool {
    relative_path.split('/').any(|seg| slugify(seg) == name)
}

/// True if the path passes through a `loop`/`loops` folder.
pub fn is_loop_folder(relative_path: &str) -> bool {
    has_path_segment(relative_path, "loop") || has_path_segment(relative_path, "loops")
}

/// True if the path is both under a `drums` segment and under a loop folder.
pub fn is_drum_loop(relative_path: &str) -> bool {
    has_path_segment(relative_path, "drums") && is_loop_folder(relative_path)
}

/// Scan segments for a known drum-loop group and return its canonical name.
pub fn detect_drum_group(relative_path: &str) -> Option<&'static str> {
    for seg in relative_path.split('/') {
        let slug = slugify(seg);
        for (alias, canonical) in DRUM_LOOP_GROUPS {
            if slug == alias {
                return Some(canonical);
            }
        }
    }
    None
}

/// Infer an instrument name for a one-shot from its parent directories.
///
/// Walks parent segments from the one nearest the file back toward the
/// root, skipping generic folders; the first survivor is singularized by
/// stripping one trailing `s` (but not `ss`). When every parent is generic
/// or there are no parents, falls back to the first underscore token of the
/// slugged filename stem, and finally to the literal `"inst"`.
pub fn guess_instrument(relative_path: &str) -> String {
    let segments: Vec<String> = relative_path.split('/').map(slugify).collect();
    for seg in segments[..segments.len() - 1].iter().rev() {
        if GENERIC_FOLDERS.contains(&seg.replace('_', " ").as_str()) {
            continue;
        }
        let singular = if seg.ends_with('s') && !seg.ends_with("ss") {
            &seg[..seg.len() - 1]
        } else {
            seg.as_str()
        };
        return if singular.is_empty() {
            "inst".to_string()
        } else {
            singular.to_string()
        };
    }

    let filename = relative_path.rsplit('/').next().unwrap_or(relative_path);
    let stem = match filename.rfind('.') {
        Some(i) if i > 0 => &filename[..i],
        _ => filename,
    };
    let slug = slugify(stem);
    match slug.split('_').next() {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => "inst".to_string(),
    }
}
