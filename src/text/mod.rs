//! Rules-text segmentation.
//!
//! Pure string-to-structure transforms that decompose a card's rules text
//! into the typed sub-fields its layout variant renders. Optional structure
//! degrades to empty or default values; only grammars a variant cannot
//! render without (leveler body, station markers, prototype announcement,
//! planeswalker abilities) report failure, as `Option`s escalated by the
//! classifier.

pub mod class_levels;
pub mod leveler;
pub mod patterns;
pub mod planeswalker;
pub mod saga;
pub mod split;
pub mod station;

pub use class_levels::{parse_class, ClassLevel, ClassText};
pub use leveler::{parse_leveler, LevelerText};
pub use planeswalker::{parse_abilities, PlaneswalkerAbility};
pub use saga::{parse_saga, SagaChapter, SagaText};
pub use split::{process_split_texts, shared_reminder};
pub use station::{parse_station, StationLevel, StationText};

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

/// First line of a text, empty for empty input.
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

/// Text with the first `count` lines removed.
pub fn drop_lines(text: &str, count: usize) -> String {
    text.split('\n').skip(count).collect::<Vec<_>>().join("\n")
}

/// First `count` lines of a text, joined back with newlines.
pub fn first_lines(text: &str, count: usize) -> String {
    text.split('\n').take(count).collect::<Vec<_>>().join("\n")
}

/// Replace the typographic minus used in loyalty costs with ASCII `-`.
pub fn normalize_minus(text: &str) -> String {
    text.replace('\u{2212}', "-")
}

// ---------------------------------------------------------------------------
// Mutate
// ---------------------------------------------------------------------------

/// Mutate text split: first line announces the mutate ability, the rest is
/// the effective rules text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutateText {
    pub mutate_text: String,
    pub oracle_text: String,
}

pub fn split_mutate(text: &str) -> MutateText {
    MutateText {
        mutate_text: first_line(text).to_string(),
        oracle_text: drop_lines(text, 1),
    }
}

// ---------------------------------------------------------------------------
// Prototype
// ---------------------------------------------------------------------------

/// Prototype sub-cost split off the announcement line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrototypeText {
    pub mana_cost: String,
    pub power_toughness: String,
    /// Rules text with the announcement line removed.
    pub oracle_text: String,
}

/// Parse a prototype card's rules text.
///
/// Returns `None` when the text has no announcement line or the line does
/// not match the prototype grammar; prototype cards cannot render without
/// their sub-cost, so the classifier escalates this.
pub fn parse_prototype(text: &str) -> Option<PrototypeText> {
    let (announcement, rest) = text.split_once('\n')?;
    let caps = patterns::PROTOTYPE.captures(announcement)?;
    Some(PrototypeText {
        mana_cost: caps[1].to_string(),
        power_toughness: caps[2].to_string(),
        oracle_text: rest.to_string(),
    })
}
