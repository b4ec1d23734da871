//! Station level segmentation.

use serde::{Deserialize, Serialize};

use super::patterns::POWER_TOUGHNESS;
use crate::models::PowerToughness;

/// One station level: unlock requirement, ability text, and the
/// power/toughness granted at that level when one is printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLevel {
    pub requirement: String,
    pub ability: String,
    pub power_toughness: Option<PowerToughness>,
}

/// Decomposed station rules text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationText {
    /// Rules text preceding the first station marker.
    pub oracle_text: String,
    pub levels: Vec<StationLevel>,
}

const STATION_MARKER: &str = "\nSTATION ";

/// Split station rules text at its `STATION` markers.
///
/// Returns `None` when the text carries no station marker; station cards
/// cannot render without their levels, so the classifier escalates this.
pub fn parse_station(text: &str) -> Option<StationText> {
    let start = text.find(STATION_MARKER)?;
    let mut levels = Vec::new();

    for block in text[start..].split("STATION ") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        let mut lines = block.split('\n');
        let mut level = StationLevel {
            requirement: lines.next().unwrap_or("").to_string(),
            ..StationLevel::default()
        };
        for line in lines {
            if let Some(caps) = POWER_TOUGHNESS.captures(line) {
                level.power_toughness = Some(PowerToughness {
                    power: caps[1].to_string(),
                    toughness: caps[2].to_string(),
                });
            } else {
                level.ability.push_str(line);
                level.ability.push('\n');
            }
        }
        level.ability = level.ability.trim_end().to_string();
        levels.push(level);
    }

    Some(StationText {
        oracle_text: text[..start].to_string(),
        levels,
    })
}
