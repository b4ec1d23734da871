//! Frame, collector and watermark value types copied into classified layouts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FrameDetails
// ---------------------------------------------------------------------------

/// Frame color identity of one face, produced by
/// [`crate::lookup::FrameResolver::resolve`] and copied into the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDetails {
    /// Identity of the name and title boxes.
    pub twins: String,
    /// Identity of the pinlines.
    pub pinlines: String,
    /// Identity of the background.
    pub background: String,
    /// Frame-appropriate color identity of the face.
    pub identity: String,
    pub is_colorless: bool,
    pub is_hybrid: bool,
}

// ---------------------------------------------------------------------------
// CollectorInfo
// ---------------------------------------------------------------------------

/// Resolved collector line data, e.g. `050/230 M`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorInfo {
    /// Collector number with non-digit characters removed, 0 when absent.
    pub number: u32,
    /// Raw collector number string, preserving non-digit characters.
    pub number_raw: Option<String>,
    pub set_code: String,
    pub rarity_letter: char,
    /// Number of cards in the release set, populated only in the `Normal`
    /// collector mode when a trustworthy count exists.
    pub card_count: Option<u32>,
    /// Formatted collector line; empty when no collector number exists.
    pub formatted_line: String,
}

impl Default for CollectorInfo {
    fn default() -> Self {
        Self {
            number: 0,
            number_raw: None,
            set_code: String::new(),
            rarity_letter: 'C',
            card_count: None,
            formatted_line: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// WatermarkSelection
// ---------------------------------------------------------------------------

/// Opaque handle to a watermark asset, returned by
/// [`crate::lookup::WatermarkAssetStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Identifier stem of the asset, e.g. `phyrexian`.
    pub stem: String,
    /// Parent grouping the asset is nested under, e.g. a folder name.
    pub parent: String,
    /// Optional backing location for the renderer.
    pub path: Option<PathBuf>,
}

/// Outcome of the watermark policy for one face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkSelection {
    /// Watermark name from the raw card data, if any.
    pub raw_name: Option<String>,
    /// Key actually looked up, after `set`/`symbol` sentinel substitution.
    pub resolved_key: Option<String>,
    pub asset: Option<AssetRef>,
}

impl WatermarkSelection {
    /// Selection that resolves to no watermark.
    pub fn none(raw_name: Option<String>) -> Self {
        Self {
            raw_name,
            resolved_key: None,
            asset: None,
        }
    }

    /// Display name of the selected watermark.
    ///
    /// Generic `WM` placeholder assets take their name from the parent
    /// grouping instead of their own stem.
    pub fn name(&self) -> Option<String> {
        let asset = self.asset.as_ref()?;
        if asset.stem.eq_ignore_ascii_case("WM") {
            Some(asset.parent.to_lowercase())
        } else {
            Some(asset.stem.to_lowercase())
        }
    }
}

// ---------------------------------------------------------------------------
// PowerToughness
// ---------------------------------------------------------------------------

/// Power/toughness pair attached to a station level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerToughness {
    pub power: String,
    pub toughness: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Order a color array into canonical WUBRG order, e.g. `[U, W]` -> `WU`.
pub fn ordered_colors(colors: &[String]) -> String {
    ["W", "U", "B", "R", "G"]
        .iter()
        .filter(|color| colors.iter().any(|c| c == **color))
        .copied()
        .collect()
}
