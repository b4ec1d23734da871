//! Planeswalker ability segmentation.

use serde::{Deserialize, Serialize};

use super::normalize_minus;

/// One planeswalker ability.
///
/// Activated abilities carry the loyalty cost and its leading icon
/// character; static abilities carry neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneswalkerAbility {
    pub text: String,
    pub icon: Option<char>,
    pub cost: Option<String>,
}

/// Length of a cost prefix that marks an activated ability, in characters.
/// Anything longer is a static ability that happens to contain `": "`.
const COST_RANGE: std::ops::RangeInclusive<usize> = 1..=4;

/// Segment planeswalker rules text into abilities.
///
/// An ability starts at a line whose `": "` separator sits after a short
/// loyalty-cost prefix (1 to 4 characters); any other line is a static
/// ability occupying its own paragraph. When `localized` text is present
/// its lines are re-partitioned to match the line count of each
/// English-derived ability, so icon and cost metadata (always read from
/// the English text) stay aligned with translated prose. If the partition
/// counts cannot be reconciled the English lines are used entirely —
/// upstream localized data is known to be occasionally inconsistent.
pub fn parse_abilities(english: &str, localized: Option<&str>) -> Vec<PlaneswalkerAbility> {
    let english = normalize_minus(english);
    let en_chunks: Vec<String> = english
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let chunks = match localized {
        Some(alt) if !alt.is_empty() => {
            repartition(&en_chunks, &normalize_minus(alt)).unwrap_or_else(|| en_chunks.clone())
        }
        _ => en_chunks.clone(),
    };

    en_chunks
        .iter()
        .zip(&chunks)
        .map(|(en, chunk)| build_ability(en, chunk))
        .collect()
}

/// Partition localized lines so each slot mirrors the line-break count of
/// the English ability at the same index. `None` when the localized text
/// runs out of lines before every ability is covered.
fn repartition(en_chunks: &[String], localized: &str) -> Option<Vec<String>> {
    let alt_lines: Vec<&str> = localized.split('\n').collect();
    let mut taken = 0;
    let mut out = Vec::with_capacity(en_chunks.len());
    for chunk in en_chunks {
        let breaks = chunk.matches('\n').count() + 1;
        if alt_lines.len() < taken + breaks {
            return None;
        }
        out.push(alt_lines[taken..taken + breaks].join("\n"));
        taken += breaks;
    }
    Some(out)
}

fn build_ability(en: &str, chunk: &str) -> PlaneswalkerAbility {
    if let Some(sep) = en.find(": ") {
        let cost_len = en[..sep].chars().count();
        if COST_RANGE.contains(&cost_len) {
            // Slice the (possibly localized) text at the English cost
            // boundary; printed text repeats the cost prefix verbatim.
            let text: String = chunk.chars().skip(cost_len + 1).collect();
            return PlaneswalkerAbility {
                text: text.trim_start().to_string(),
                icon: en.chars().next(),
                cost: Some(en[..sep].to_string()),
            };
        }
    }
    PlaneswalkerAbility {
        text: chunk.to_string(),
        icon: None,
        cost: None,
    }
}
