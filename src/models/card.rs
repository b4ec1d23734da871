//! Card database record models.
//!
//! Shaped after the JSON returned by the card lookup collaborator. Records
//! are read-only inputs to classification; every derived value lives on
//! [`crate::layouts::CardLayout`] instead.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CardFace — one printed side of a (possibly multi-sided) card
// ---------------------------------------------------------------------------

/// One face of a card.
///
/// Single-faced cards carry these fields at the record's top level, which
/// [`RawCardRecord`] exposes through a flattened root face. Multi-faced
/// cards repeat them per entry in `card_faces`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFace {
    pub name: String,
    pub printed_name: Option<String>,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub printed_type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub printed_text: Option<String>,
    pub flavor_text: Option<String>,
    pub flavor_name: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub defense: Option<String>,
    pub watermark: Option<String>,
    pub artist: Option<String>,
    pub color_identity: Vec<String>,
    pub color_indicator: Vec<String>,
    pub image_uris: Option<serde_json::Value>,
}

impl CardFace {
    /// Rules text, preferring the localized print when `alt_lang` is set.
    pub fn oracle_text_localized(&self, alt_lang: bool) -> String {
        let raw = self.oracle_text.clone().unwrap_or_default();
        if alt_lang {
            self.printed_text.clone().unwrap_or(raw)
        } else {
            raw
        }
    }

    /// Card name, preferring the localized print when `alt_lang` is set.
    pub fn name_localized(&self, alt_lang: bool) -> String {
        if alt_lang {
            self.printed_name.clone().unwrap_or_else(|| self.name.clone())
        } else {
            self.name.clone()
        }
    }

    /// Type line, preferring the localized print when `alt_lang` is set.
    pub fn type_line_localized(&self, alt_lang: bool) -> String {
        let raw = self.type_line.clone().unwrap_or_default();
        if alt_lang {
            self.printed_type_line.clone().unwrap_or(raw)
        } else {
            raw
        }
    }
}

// ---------------------------------------------------------------------------
// RawCardRecord — the full printing record returned by the lookup
// ---------------------------------------------------------------------------

/// A card printing as returned by [`crate::lookup::CardLookup::resolve`].
///
/// The root face is flattened into the record, so single-faced JSON with
/// top-level `name` / `oracle_text` / ... deserializes directly. The lookup
/// collaborator is expected to postprocess layout tags the upstream database
/// does not distinguish natively (`planeswalker`, `planeswalker_tf`,
/// `planeswalker_mdfc`, `station`) and to set `front` on face records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCardRecord {
    #[serde(flatten)]
    pub face: CardFace,
    pub layout: Option<String>,
    pub set: Option<String>,
    pub set_type: Option<String>,
    pub collector_number: Option<String>,
    pub rarity: Option<String>,
    pub released_at: Option<String>,
    pub lang: Option<String>,
    pub oracle_id: Option<String>,
    pub promo: bool,
    pub promo_types: Vec<String>,
    pub keywords: Vec<String>,
    pub frame_effects: Vec<String>,
    pub card_faces: Vec<CardFace>,
    /// True when this record describes the front face of a two-sided card.
    /// Synthesized by the lookup collaborator; absent means front.
    pub front: Option<bool>,
}

impl RawCardRecord {
    /// The face most relevant data should be read from.
    ///
    /// Multi-faced cards return the face whose name matches `input_name`
    /// (the name declared in the art file); single-faced cards and
    /// unmatched names return the flattened root face.
    pub fn face_for(&self, input_name: &str) -> &CardFace {
        let wanted = normalize_name(input_name);
        self.card_faces
            .iter()
            .find(|face| normalize_name(&face.name) == wanted)
            .unwrap_or(&self.face)
    }

    /// The opposing face of a two-sided card, if any.
    pub fn other_face(&self, name_raw: &str) -> Option<&CardFace> {
        self.card_faces.iter().find(|face| face.name != name_raw)
    }

    /// Whether this record describes a front face. Defaults to true.
    pub fn is_front(&self) -> bool {
        self.front.unwrap_or(true)
    }

    /// Uppercase set code, falling back to `MTG` when absent.
    pub fn set_code(&self) -> String {
        self.set
            .as_deref()
            .unwrap_or("MTG")
            .to_uppercase()
    }
}

// ---------------------------------------------------------------------------
// SetData — per-set metadata injected into the engine
// ---------------------------------------------------------------------------

/// Release-set metadata used by the collector resolver, keyed by lowercase
/// set code in [`crate::LayoutEngineBuilder::set_data`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetData {
    /// Parent set code for sub-sets (e.g. a token set's parent expansion).
    pub code_parent: Option<String>,
    /// Number of cards as printed on the collector line.
    pub count_printed: Option<u32>,
    /// Total number of cards in the set.
    pub count_cards: Option<u32>,
    /// Number of tokens in the set, used for token collector lines.
    pub count_tokens: Option<u32>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalize a card name for comparisons: trimmed, lowercased, inner
/// whitespace collapsed.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
