//! Filename feature extraction
//!
//! Two independent detectors over a filename stem: a tempo token and a
//! musical-key token. Both are small explicit grammars implemented as
//! single scans so the tie-break rules stay visible and testable:
//!
//! - tempo: every delimited 2-3 digit run in range is a candidate, the
//!   last one wins (sample indexes tend to lead, tempo tends to trail);
//! - key: the octave-qualified grammar is tried over the whole stem first
//!   (more specific, fewer false positives), then the bare pitch-quality
//!   grammar; within a grammar the first match wins.

use crate::services::text_normalizer::normalize_note;
use crate::types::KeySignature;

/// Extract a tempo (BPM) from a filename stem.
///
/// A candidate is a maximal 2-3 digit run delimited on both sides by
/// start/end of string, space, underscore or hyphen, with a value in
/// `40..200`. Longer digit runs (e.g. a `1234` take number) never match.
pub fn extract_tempo(stem: &str) -> Option<u32> {
    let chars: Vec<char> = stem.to_lowercase().chars().collect();
    let mut tempo = None;

    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let delimited = (start == 0 || is_token_delimiter(chars[start - 1]))
            && (i == chars.len() || is_token_delimiter(chars[i]));
        if delimited && (2..=3).contains(&(i - start)) {
            if let Ok(value) = chars[start..i].iter().collect::<String>().parse::<u32>() {
                if (40..200).contains(&value) {
                    tempo = Some(value);
                }
            }
        }
    }

    tempo
}

/// Extract a musical key from a filename stem.
///
/// Tries the pitch-with-octave grammar first (`c#3`, `Bb2`), then the bare
/// pitch-quality grammar (`c`, `cm`, `Fmaj`, `a_min`). Returns `None` when
/// neither grammar matches anywhere in the stem.
pub fn extract_key(stem: &str) -> Option<KeySignature> {
    let chars: Vec<char> = stem.to_lowercase().chars().collect();
    find_pitch_with_octave(&chars).or_else(|| find_bare_pitch(&chars))
}

fn is_token_delimiter(c: char) -> bool {
    matches!(c, ' ' | '_' | '-')
}

fn is_pitch_letter(c: char) -> bool {
    ('a'..='g').contains(&c)
}

/// Grammar: pitch letter, optional accidental, one octave digit.
///
/// The letter must not follow another ASCII letter (so `pad_c3` matches but
/// the `c` in `orch` does not), and the digit must not be followed by an
/// alphanumeric (so `c34` is a sample index, not C octave 34).
fn find_pitch_with_octave(chars: &[char]) -> Option<KeySignature> {
    for i in 0..chars.len() {
        if !is_pitch_letter(chars[i]) {
            continue;
        }
        if i > 0 && chars[i - 1].is_ascii_alphabetic() {
            continue;
        }
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '#' || chars[j] == 'b') {
            j += 1;
        }
        if j >= chars.len() || !chars[j].is_ascii_digit() {
            continue;
        }
        if j + 1 < chars.len() && chars[j + 1].is_ascii_alphanumeric() {
            continue;
        }
        let root: String = chars[i..j].iter().collect();
        let octave = chars[j].to_digit(10).map(|d| d as u8);
        return Some(KeySignature {
            root: normalize_note(&root),
            minor: false,
            octave,
        });
    }
    None
}

/// Grammar: delimited pitch letter, optional accidental, optional quality
/// suffix (`maj`, `min` or `m`), bounded on the right by end of string, a
/// delimiter, or a digit (so `cm90` is C minor at 90).
///
/// Suffixes are tried longest-first and each candidate parse must satisfy
/// the right boundary, so `cmin_90` is C minor while `cminx` matches
/// nothing at all.
fn find_bare_pitch(chars: &[char]) -> Option<KeySignature> {
    for i in 0..chars.len() {
        if !is_pitch_letter(chars[i]) {
            continue;
        }
        if i > 0 && !is_token_delimiter(chars[i - 1]) {
            continue;
        }
        let accidental = i + 1 < chars.len() && (chars[i + 1] == '#' || chars[i + 1] == 'b');
        let mut root_ends = Vec::with_capacity(2);
        if accidental {
            root_ends.push(i + 2);
        }
        root_ends.push(i + 1);

        for root_end in root_ends {
            for quality in ["maj", "min", "m", ""] {
                if !tail_starts_with(chars, root_end, quality) {
                    continue;
                }
                let after = root_end + quality.len();
                if after < chars.len()
                    && !is_token_delimiter(chars[after])
                    && !chars[after].is_ascii_digit()
                {
                    continue;
                }
                let root: String = chars[i..root_end].iter().collect();
                return Some(KeySignature {
                    root: normalize_note(&root),
                    minor: matches!(quality, "m" | "min"),
                    octave: None,
                });
            }
        }
    }
    None
}

fn tail_starts_with(chars: &[char], at: usize, token: &str) -> bool {
    let token: Vec<char> = token.chars().collect();
    chars.len() >= at + token.len() && chars[at..at + token.len()] == token[..]
}
