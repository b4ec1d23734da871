//! Dual-face merging for split cards classified from two art files.
//!
//! Each half of a split card can arrive as its own art file, classifying
//! into two instances of the same printing. This barrier pass runs after
//! the whole batch has completed and joins such pairs into one instance
//! carrying both art files.

use crate::error::{LayoutError, Result};
use crate::layouts::{CardLayout, LayoutVariant};
use crate::models::normalize_name;

/// Join split-tagged layouts that describe the same printing.
///
/// Non-split layouts pass through unchanged. Split layouts group by their
/// display string (name, set, and collector number must match exactly);
/// a group of two single-file instances merges into a new instance whose
/// art files are ordered so the file declaring the record's first face
/// comes first. Lone instances and already-merged instances pass through,
/// making the pass idempotent. Three or more colliding instances are a
/// [`LayoutError::MergeAmbiguity`] rather than a guess.
pub fn merge_dual_faced(layouts: Vec<CardLayout>) -> Result<Vec<CardLayout>> {
    let mut out: Vec<CardLayout> = Vec::with_capacity(layouts.len());
    let mut groups: Vec<(String, Vec<CardLayout>)> = Vec::new();

    for layout in layouts {
        if !layout.variant.is_split() {
            out.push(layout);
            continue;
        }
        let key = layout.display_string();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(layout),
            None => groups.push((key, vec![layout])),
        }
    }

    for (key, mut members) in groups {
        match members.len() {
            1 => out.push(members.remove(0)),
            2 => {
                // A member already carrying both files was merged by an
                // earlier pass; joining again would duplicate art files.
                if members.iter().any(|m| m.art_files.len() > 1) {
                    out.append(&mut members);
                } else {
                    let second = members.remove(1);
                    let first = members.remove(0);
                    out.push(merge_pair(first, second));
                }
            }
            count => {
                return Err(LayoutError::MergeAmbiguity { key, count });
            }
        }
    }

    Ok(out)
}

/// Merge two halves into a new instance.
///
/// The instance whose art file declares the record's first face
/// contributes its file first; the other instance's files follow.
fn merge_pair(first: CardLayout, second: CardLayout) -> CardLayout {
    let first_face = match &first.variant {
        LayoutVariant::Split(details) => details.names.first().cloned().unwrap_or_default(),
        _ => first.name.clone(),
    };
    let first_leads = normalize_name(&first_face) == normalize_name(&first.file.name);

    let (mut base, tail) = if first_leads {
        (first, second)
    } else {
        (second, first)
    };
    base.art_files.extend(tail.art_files);
    base
}
