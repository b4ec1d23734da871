//! Art filename tag grammar.
//!
//! Art files declare the card they render through their filename stem:
//!
//! ```text
//! Name (artist) [set] {number} $creator
//! ```
//!
//! | Tag        | Description                                              |
//! | ---------- | -------------------------------------------------------- |
//! | `(artist)` | Forces a different artist name.                          |
//! | `[set]`    | Uses a specific set printing during lookup.              |
//! | `{number}` | Uses a specific collector number during lookup.          |
//! | `$creator` | Must trail the filename, names the proxy creator.        |
//!
//! Tags are optional and order-independent except for `$creator`, which is
//! only recognized as a suffix. The untagged remainder is the card name.
//!
//! # Example
//!
//! ```rust
//! use cardlayout::filename::parse_art_filename;
//!
//! let d = parse_art_filename("Lightning Bolt (John Doe)[LEA]{1}$me").unwrap();
//! assert_eq!(d.name, "Lightning Bolt");
//! assert_eq!(d.artist.as_deref(), Some("John Doe"));
//! assert_eq!(d.set.as_deref(), Some("LEA"));
//! assert_eq!(d.number.as_deref(), Some("1"));
//! assert_eq!(d.creator.as_deref(), Some("me"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ArtFileDescriptor
// ---------------------------------------------------------------------------

/// Parsed art filename details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtFileDescriptor {
    /// Path to the art file, when parsed from a path.
    pub file: Option<PathBuf>,
    /// Card name declared by the filename.
    pub name: String,
    /// Artist override from an `(artist)` tag.
    pub artist: Option<String>,
    /// Set override from a `[set]` tag.
    pub set: Option<String>,
    /// Collector number override from a `{number}` tag.
    pub number: Option<String>,
    /// Creator string from a trailing `$creator` tag.
    pub creator: Option<String>,
}

impl ArtFileDescriptor {
    /// Parse a descriptor from an art file path, keeping the path.
    pub fn from_path(path: &Path) -> Result<Self, TagParseError> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut descriptor = parse_art_filename(&stem)?;
        descriptor.file = Some(path.to_path_buf());
        Ok(descriptor)
    }

    /// Descriptor for a bare card name with no tags.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// TagParseError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagParseError {
    #[error("unterminated '{open}' tag")]
    Unterminated { open: char },

    #[error("unexpected '{close}' with no open tag")]
    UnmatchedClose { close: char },

    #[error("'{inner}' delimiter nested inside '{outer}' tag")]
    Nested { outer: char, inner: char },

    #[error("filename contains no card name")]
    MissingName,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Parse a filename stem into an [`ArtFileDescriptor`].
///
/// Tag delimiters must be well-formed and non-nested; any delimiter
/// character inside an open tag other than its matching closer is an
/// error. Empty tags are treated as absent.
pub fn parse_art_filename(stem: &str) -> Result<ArtFileDescriptor, TagParseError> {
    // The creator tag is only recognized as a suffix.
    let (body, creator) = match stem.rsplit_once('$') {
        Some((body, creator)) => (body, non_empty(creator)),
        None => (stem, None),
    };

    let mut descriptor = ArtFileDescriptor {
        creator,
        ..ArtFileDescriptor::default()
    };

    let mut name = String::new();
    let mut open: Option<(char, String)> = None;

    for ch in body.chars() {
        match &mut open {
            Some((tag, value)) => {
                if ch == closer_for(*tag) {
                    let value = non_empty(value);
                    match *tag {
                        '(' => descriptor.artist = value,
                        '[' => descriptor.set = value,
                        _ => descriptor.number = value,
                    }
                    open = None;
                } else if matches!(ch, '(' | '[' | '{' | ')' | ']' | '}') {
                    return Err(TagParseError::Nested {
                        outer: *tag,
                        inner: ch,
                    });
                } else {
                    value.push(ch);
                }
            }
            None => match ch {
                '(' | '[' | '{' => open = Some((ch, String::new())),
                ')' | ']' | '}' => return Err(TagParseError::UnmatchedClose { close: ch }),
                _ => name.push(ch),
            },
        }
    }

    if let Some((tag, _)) = open {
        return Err(TagParseError::Unterminated { open: tag });
    }

    descriptor.name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if descriptor.name.is_empty() {
        return Err(TagParseError::MissingName);
    }
    Ok(descriptor)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
