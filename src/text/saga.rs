//! Saga chapter segmentation.

use serde::{Deserialize, Serialize};

use super::patterns::SAGA_CHAPTER;
use super::{drop_lines, first_line};

/// One chapter ability with its roman-numeral icons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SagaChapter {
    pub text: String,
    pub icons: Vec<String>,
}

/// Decomposed saga rules text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SagaText {
    /// Reminder line at the top of the card, empty when the first line is
    /// already a chapter.
    pub description: String,
    /// Chapter lines only, re-joined with newlines.
    pub chapter_text: String,
    /// Trailing non-chapter rules, e.g. on saga creatures.
    pub ability_text: String,
    pub chapters: Vec<SagaChapter>,
}

/// Segment saga rules text into description, chapters, and trailing
/// abilities. `remove_reminder` forces the description empty, matching the
/// setting that strips reminder text upstream.
pub fn parse_saga(text: &str, remove_reminder: bool) -> SagaText {
    let chapter_lines: Vec<&str> = text
        .split('\n')
        .filter(|line| SAGA_CHAPTER.is_match(line))
        .collect();
    let chapter_text = chapter_lines.join("\n");

    let description = if remove_reminder {
        String::new()
    } else {
        let line = first_line(text);
        if SAGA_CHAPTER.is_match(line) {
            String::new()
        } else {
            line.to_string()
        }
    };

    SagaText {
        description,
        ability_text: trailing_ability_text(text),
        chapters: group_chapters(&chapter_lines),
        chapter_text,
    }
}

/// Rules text that is separate from the chapters.
///
/// The first line (reminder or first chapter) is dropped, then everything
/// from the first non-chapter line onward is returned.
fn trailing_ability_text(text: &str) -> String {
    let stripped = drop_lines(text, 1);
    let lines: Vec<&str> = stripped.split('\n').collect();
    for (index, line) in lines.iter().enumerate() {
        if !SAGA_CHAPTER.is_match(line) {
            return lines[index..].join("\n");
        }
    }
    String::new()
}

/// Group chapter lines into [`SagaChapter`] records.
///
/// Each line splits on its first em-dash into icons and text. A dashless
/// line at index 0 becomes a standalone static heading; later dashless
/// lines continue the previous chapter's text.
fn group_chapters(lines: &[&str]) -> Vec<SagaChapter> {
    let mut chapters: Vec<SagaChapter> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        match line.split_once('—') {
            Some((icons, text)) => chapters.push(SagaChapter {
                text: text.trim().to_string(),
                icons: icons
                    .trim()
                    .split(", ")
                    .map(str::to_string)
                    .collect(),
            }),
            None if index == 0 => chapters.push(SagaChapter {
                text: line.to_string(),
                icons: Vec::new(),
            }),
            None => {
                if let Some(last) = chapters.last_mut() {
                    last.text.push('\n');
                    last.text.push_str(line);
                }
            }
        }
    }
    chapters
}
