//! Compiled card-text patterns.
//!
//! Every grammar used by the segmenter lives here as a compiled static so
//! capture semantics are documented in one place and each grammar function
//! stays unit-testable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Saga chapter line: roman-numeral icon list followed by a spaced em-dash,
/// e.g. `I, II — Draw a card.`.
pub static SAGA_CHAPTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ ,IVXLCDM]+ — ").expect("valid chapter pattern"));

/// Leveler body, anchored over the whole rules text. Captures in order:
/// level-up cost text, middle level range, middle power/toughness, middle
/// ability text, bottom level range, bottom power/toughness, bottom
/// ability text.
pub static LEVELER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^(.*?)\nLEVEL (\d+-\d+)\n(\d+/\d+)\n(.*?)\nLEVEL (\d+\+)\n(\d+/\d+)\n(.*)$",
    )
    .expect("valid leveler pattern")
});

/// Class level pair: a cost line `"{2}{W}: Level 2"` followed by the level
/// ability text. Captures: cost, level, text.
pub static CLASS_LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(.+): Level (\d+)\n(.+)$").expect("valid class pattern"));

/// Prototype announcement line, e.g. `Prototype {1}{W} — 2/3 (...)`.
/// Captures: mana cost, power/toughness.
pub static PROTOTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Prototype (\S+) — (\d+/\d+)").expect("valid prototype pattern"));

/// Reminder text closing the rules text. Captures the final parenthesized
/// paragraph, used to detect a reminder shared by both split halves.
pub static REMINDER_ENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^.*(\(.+\))$").expect("valid reminder pattern"));

/// Power/toughness line prefix, e.g. `4/4`. Captures: power, toughness.
pub static POWER_TOUGHNESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)/(\d+)").expect("valid power/toughness pattern"));
