//! Leveler stage segmentation.

use serde::{Deserialize, Serialize};

use super::patterns::LEVELER;

/// The three text boxes of a leveler card: the level-up cost plus two
/// higher stages, each with a level range, power/toughness, and rules text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelerText {
    pub level_up_cost: String,
    pub middle_level: String,
    pub middle_power_toughness: String,
    pub middle_text: String,
    pub bottom_level: String,
    pub bottom_power_toughness: String,
    pub bottom_text: String,
}

/// Match leveler rules text against the anchored seven-group grammar.
///
/// An empty middle ability is normalized to a single space so the rendered
/// box never collapses. Returns `None` when the body does not match;
/// leveler cards cannot render without their stages, so the classifier
/// escalates this.
pub fn parse_leveler(text: &str) -> Option<LevelerText> {
    let caps = LEVELER.captures(text)?;
    let middle_text = if caps[4].is_empty() {
        " ".to_string()
    } else {
        caps[4].to_string()
    };
    Some(LevelerText {
        level_up_cost: caps[1].to_string(),
        middle_level: caps[2].to_string(),
        middle_power_toughness: caps[3].to_string(),
        middle_text,
        bottom_level: caps[5].to_string(),
        bottom_power_toughness: caps[6].to_string(),
        bottom_text: caps[7].to_string(),
    })
}
