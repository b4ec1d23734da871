use serde::{Deserialize, Serialize};

/// Watermark policy applied to each classified face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkMode {
    /// Never select a watermark, even when the card data provides one.
    Disabled,
    /// Always select the configured default watermark, ignoring card data.
    Forced,
    /// Select the card's own watermark only; no asset means no watermark.
    Automatic,
    /// Select the card's own watermark, falling back to the configured
    /// default when the card has none or the asset cannot be found.
    #[default]
    Fallback,
}

/// Collector line display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectorMode {
    /// Full `number/count rarity` line when the set card count is known.
    #[default]
    Normal,
    /// Short `rarity number` line, never resolving the set card count.
    Minimal,
}

/// User-facing settings consumed during classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub watermark_mode: WatermarkMode,
    /// Watermark key used by the `Forced` and `Fallback` modes.
    pub watermark_default: String,
    pub collector_mode: CollectorMode,
    /// Fallback print language when the record carries none.
    pub language: String,
    /// Drop the leading reminder/description line of Saga and Class text.
    pub remove_reminder: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watermark_mode: WatermarkMode::default(),
            watermark_default: "wotc".to_string(),
            collector_mode: CollectorMode::default(),
            language: "en".to_string(),
            remove_reminder: false,
        }
    }
}
