//! Split-card text processing.

use super::patterns::REMINDER_ENDING;

/// Reminder suffix shared by every given rules text.
///
/// Each text is matched against the reminder-ending grammar; the captured
/// paragraph is returned only when every text ends with the identical
/// reminder. Any non-match or disagreement yields an empty string.
pub fn shared_reminder(texts: &[String]) -> String {
    let mut previous = String::new();
    for text in texts {
        let current = match REMINDER_ENDING.captures(text) {
            Some(caps) => caps[1].to_string(),
            None => return String::new(),
        };
        if !previous.is_empty() && previous != current {
            return String::new();
        }
        previous = current;
    }
    previous
}

/// Process the per-half rules texts of a split card.
///
/// Fuse cards drop the final line of each half (the Fuse reminder);
/// otherwise a reminder suffix shared by both halves is stripped from each
/// half independently.
pub fn process_split_texts(texts: &[String], has_fuse: bool) -> Vec<String> {
    if has_fuse {
        return texts
            .iter()
            .map(|text| {
                let lines: Vec<&str> = text.split('\n').collect();
                lines[..lines.len().saturating_sub(1)].join("\n")
            })
            .collect();
    }

    let reminder = shared_reminder(texts);
    if reminder.is_empty() {
        return texts.to_vec();
    }
    texts
        .iter()
        .map(|text| text[..text.len() - reminder.len()].trim_end().to_string())
        .collect()
}
