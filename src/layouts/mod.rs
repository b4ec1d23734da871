//! Classified card layouts.
//!
//! A classification produces one [`CardLayout`]: the common accessor set
//! every renderer consumes, plus a [`LayoutVariant`] tag whose payload
//! carries the fields only that variant renders. The tag is a pure
//! function of the record's raw layout tag, its face count, and its
//! front/back flag.

pub(crate) mod classify;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::filename::ArtFileDescriptor;
use crate::models::{CollectorInfo, FrameDetails, WatermarkSelection};
use crate::text::{ClassText, LevelerText, PlaneswalkerAbility, SagaText, StationText};

// ---------------------------------------------------------------------------
// Variant payloads
// ---------------------------------------------------------------------------

/// Which side of a two-sided card a layout describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSide {
    Front,
    Back,
}

/// Sub-kind of a planeswalker layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneswalkerKind {
    Standard,
    Transform(CardSide),
    ModalDoubleFaced(CardSide),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneswalkerDetails {
    /// Starting loyalty.
    pub loyalty: String,
    pub abilities: Vec<PlaneswalkerAbility>,
    pub kind: PlaneswalkerKind,
}

/// The adventure half of an adventure card, read from the second face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureDetails {
    pub name: String,
    pub mana_cost: String,
    pub type_line: String,
    pub oracle_text: String,
    pub flavor_text: String,
}

/// Per-half data of a split card. Index 0 is the primary half as recorded
/// by the database, not necessarily the half the art file declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitDetails {
    pub names: Vec<String>,
    pub mana_costs: Vec<String>,
    pub type_lines: Vec<String>,
    pub oracle_texts: Vec<String>,
    pub flavor_texts: Vec<String>,
    pub watermarks: Vec<WatermarkSelection>,
    pub frames: Vec<FrameDetails>,
}

/// Opposing-face data for two-sided layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherFaceDetails {
    pub name: String,
    pub mana_cost: String,
    pub type_line: String,
    pub oracle_text: String,
    pub power: String,
    pub toughness: String,
    /// Name/title box identity of the opposing face.
    pub twins: String,
    /// Abridged opposing type shown on the MDFC bottom bar.
    pub left: String,
    /// Opposing mana cost, or a land face's `{T}` activation sentence.
    pub right: String,
}

// ---------------------------------------------------------------------------
// LayoutVariant
// ---------------------------------------------------------------------------

/// The structural category of a classified card. Exactly one tag is active
/// per instance; variant-specific fields exist only on that tag's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutVariant {
    Normal,
    Transform { side: CardSide },
    ModalDoubleFaced { side: CardSide },
    Adventure(AdventureDetails),
    Leveler(LevelerText),
    Saga(SagaText),
    Mutate { mutate_text: String },
    Prototype { mana_cost: String, power_toughness: String },
    Class(ClassText),
    Case { sections: Vec<String> },
    Battle { side: CardSide, defense: String },
    Split(SplitDetails),
    Planar,
    Token,
    Planeswalker(PlaneswalkerDetails),
    Station(StationText),
}

impl LayoutVariant {
    /// Stable lowercase name of the active tag.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutVariant::Normal => "normal",
            LayoutVariant::Transform { .. } => "transform",
            LayoutVariant::ModalDoubleFaced { .. } => "modal_dfc",
            LayoutVariant::Adventure(_) => "adventure",
            LayoutVariant::Leveler(_) => "leveler",
            LayoutVariant::Saga(_) => "saga",
            LayoutVariant::Mutate { .. } => "mutate",
            LayoutVariant::Prototype { .. } => "prototype",
            LayoutVariant::Class(_) => "class",
            LayoutVariant::Case { .. } => "case",
            LayoutVariant::Battle { .. } => "battle",
            LayoutVariant::Split(_) => "split",
            LayoutVariant::Planar => "planar",
            LayoutVariant::Token => "token",
            LayoutVariant::Planeswalker(_) => "planeswalker",
            LayoutVariant::Station(_) => "station",
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, LayoutVariant::Split(_))
    }
}

// ---------------------------------------------------------------------------
// CardLayout
// ---------------------------------------------------------------------------

/// A fully classified card: every derived field the renderer needs.
///
/// All fields are populated eagerly during classification and never
/// mutated afterwards; the dual-face merge produces new instances rather
/// than editing these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    /// Parsed art file details this classification started from.
    pub file: ArtFileDescriptor,
    /// Art image files; split layouts gain a second entry during merging.
    pub art_files: Vec<PathBuf>,

    // -- Text info ---------------------------------------------------------
    pub name: String,
    /// Card name, English representation enforced.
    pub name_raw: String,
    /// Display-appropriate name, e.g. `Fire // Ice` or `Goblin Token`.
    pub display_name: String,
    pub mana_cost: String,
    pub type_line: String,
    pub type_line_raw: String,
    pub oracle_text: String,
    pub oracle_text_raw: String,
    pub flavor_text: String,
    pub power: String,
    pub toughness: String,

    // -- Set and collector info --------------------------------------------
    pub set: String,
    pub set_type: String,
    pub released_at: Option<String>,
    pub lang: String,
    pub rarity: String,
    pub artist: String,
    pub collector: CollectorInfo,

    // -- Frame and watermark -----------------------------------------------
    pub frame: FrameDetails,
    pub watermark: WatermarkSelection,
    pub color_identity: Vec<String>,
    /// Color indicator identity in canonical order, e.g. `WU`.
    pub color_indicator: String,

    // -- Card collections --------------------------------------------------
    pub keywords: Vec<String>,
    pub frame_effects: Vec<String>,
    pub promo_types: Vec<String>,

    // -- Two-sided data ----------------------------------------------------
    pub transform_icon: Option<String>,
    pub other_face: Option<OtherFaceDetails>,

    // -- Bool properties ---------------------------------------------------
    pub is_creature: bool,
    pub is_land: bool,
    pub is_basic_land: bool,
    pub is_legendary: bool,
    pub is_artifact: bool,
    pub is_vehicle: bool,
    pub is_promo: bool,
    pub is_front: bool,
    pub is_alt_lang: bool,
    pub is_token: bool,
    pub is_emblem: bool,
    pub is_nyx: bool,
    pub is_companion: bool,
    pub is_snow: bool,
    pub is_transform: bool,
    pub is_mdfc: bool,
    pub is_colorless: bool,
    pub is_hybrid: bool,

    pub variant: LayoutVariant,
}

impl CardLayout {
    /// First letter of the card rarity, uppercase enforced.
    pub fn rarity_letter(&self) -> char {
        self.collector.rarity_letter
    }

    /// Grouping key used by the dual-face merge.
    pub fn display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)?;
        if !self.set.is_empty() {
            write!(f, " [{}]", self.set)?;
        }
        if let Some(raw) = self.collector.number_raw.as_deref() {
            write!(f, " {{{raw}}}")?;
        }
        Ok(())
    }
}
