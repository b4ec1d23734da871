//! Collector line resolution.

use crate::config::CollectorMode;
use crate::models::{CollectorInfo, SetData};

/// Inputs to [`resolve_collector_info`], gathered by the classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectorRequest<'a> {
    /// Raw collector number string from the record, non-digits allowed.
    pub number_raw: Option<&'a str>,
    /// Display set code (already parent-substituted for sub-set tokens).
    pub set_code: &'a str,
    /// Full rarity word, e.g. `mythic` or a special/bonus tier.
    pub rarity: &'a str,
    pub set_data: Option<&'a SetData>,
    pub mode: CollectorMode,
    /// Token layouts print a fixed `T` rarity letter and count tokens
    /// instead of cards.
    pub is_token: bool,
}

/// Compute the numeric collector number, set card count, rarity letter,
/// and formatted collector line.
pub fn resolve_collector_info(request: CollectorRequest<'_>) -> CollectorInfo {
    let number = request
        .number_raw
        .map(|raw| raw.chars().filter(char::is_ascii_digit).collect::<String>())
        .and_then(|digits| digits.parse::<u32>().ok())
        .unwrap_or(0);

    let rarity_letter = if request.is_token {
        'T'
    } else {
        request
            .rarity
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('C')
    };

    let card_count = resolve_card_count(&request, number);

    let formatted_line = if let Some(count) = card_count {
        format!("{number:03}/{count:03} {rarity_letter}")
    } else if request.number_raw.is_some() {
        format!("{rarity_letter} {number:04}")
    } else {
        String::new()
    };

    CollectorInfo {
        number,
        number_raw: request.number_raw.map(str::to_string),
        set_code: request.set_code.to_string(),
        rarity_letter,
        card_count,
        formatted_line,
    }
}

/// Set card count for the collector line.
///
/// Only the `Normal` collector mode resolves a count, and only when a raw
/// collector number exists. The printed count is preferred over the total
/// card count; token layouts use the token count instead. A count smaller
/// than the collector number indicates inconsistent set data and is
/// suppressed.
fn resolve_card_count(request: &CollectorRequest<'_>, number: u32) -> Option<u32> {
    if request.mode != CollectorMode::Normal || request.number_raw.is_none() {
        return None;
    }
    let data = request.set_data?;
    let count = if request.is_token {
        data.count_tokens
    } else {
        data.count_printed.or(data.count_cards)
    }?;
    (count >= number).then_some(count)
}
