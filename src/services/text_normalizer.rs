//! Text normalization
//!
//! Lowercasing, slugging and enharmonic pitch-name canonicalization. These
//! are the leaf utilities every classifier above builds on.

/// Canonicalize a pitch name: lowercase, and map sharp spellings to their
/// flat equivalents. `f#` is the one sharp kept as-is.
pub fn normalize_note(note: &str) -> String {
    let n = note.to_lowercase();
    if n.ends_with('#') {
        match n.as_str() {
            "c#" => "db".to_string(),
            "d#" => "eb".to_string(),
            "g#" => "ab".to_string(),
            "a#" => "bb".to_string(),
            _ => n,
        }
    } else {
        n
    }
}

/// Lowercase `text` and collapse every run of characters outside `[a-z0-9]`
/// into a single underscore, with leading/trailing underscores stripped.
///
/// Used to compare path segments case- and punctuation-insensitively.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharps_map_to_flats_except_f_sharp() {
        assert_eq!(normalize_note("C#"), "db");
        assert_eq!(normalize_note("d#"), "eb");
        assert_eq!(normalize_note("F#"), "f#");
        assert_eq!(normalize_note("g#"), "ab");
        assert_eq!(normalize_note("A#"), "bb");
    }

    #[test]
    fn flats_and_naturals_pass_through() {
        assert_eq!(normalize_note("Eb"), "eb");
        assert_eq!(normalize_note("c"), "c");
        assert_eq!(normalize_note("G"), "g");
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("One Shots"), "one_shots");
        assert_eq!(slugify("  Drum--Loops!! "), "drum_loops");
        assert_eq!(slugify("808s"), "808s");
    }

    #[test]
    fn slugify_strips_leading_and_trailing_separators() {
        assert_eq!(slugify("__kick__"), "kick");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_replaces_non_ascii() {
        assert_eq!(slugify("Pérc"), "p_rc");
    }
}
