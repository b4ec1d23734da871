//! Class level segmentation.

use serde::{Deserialize, Serialize};

use super::patterns::CLASS_LEVEL;
use super::{drop_lines, first_line};

/// One class level ability. Level 1 is always present and carries no cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub text: String,
    pub cost: Option<String>,
    pub level: Option<String>,
}

/// Decomposed class rules text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassText {
    /// Reminder line at the top of the card.
    pub description: String,
    pub levels: Vec<ClassLevel>,
}

/// Segment class rules text into its level ladder.
///
/// The first body line is the mandatory uncosted level-1 ability. The
/// remaining lines are grouped in pairs; a pair matching the
/// `cost: Level n` grammar starts a new level, any other pair continues
/// the previous level's text. When `remove_reminder` is set the upstream
/// text is assumed pre-stripped and is used whole.
pub fn parse_class(text: &str, remove_reminder: bool) -> ClassText {
    let (description, body) = if remove_reminder {
        (String::new(), text.to_string())
    } else {
        (first_line(text).to_string(), drop_lines(text, 1))
    };

    let mut lines = body.split('\n');
    let initial = lines.next().unwrap_or("").to_string();
    let mut levels = vec![ClassLevel {
        text: initial,
        cost: None,
        level: Some("1".to_string()),
    }];

    let rest: Vec<&str> = lines.collect();
    for pair in rest.chunks(2) {
        let joined = pair.join("\n");
        match CLASS_LEVEL.captures(&joined) {
            Some(caps) => levels.push(ClassLevel {
                cost: Some(caps[1].to_string()),
                level: Some(caps[2].to_string()),
                text: caps[3].to_string(),
            }),
            None => {
                if let Some(last) = levels.last_mut() {
                    last.text.push('\n');
                    last.text.push_str(&joined);
                }
            }
        }
    }

    ClassText {
        description,
        levels,
    }
}
