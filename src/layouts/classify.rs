//! Layout construction: raw record + art file descriptor -> [`CardLayout`].

use std::collections::HashMap;

use crate::collector::{resolve_collector_info, CollectorRequest};
use crate::config::Config;
use crate::filename::ArtFileDescriptor;
use crate::lookup::{FirstPrintingLookup, FrameResolver, WatermarkAssetStore};
use crate::models::{ordered_colors, CardFace, FrameDetails, RawCardRecord, SetData};
use crate::text;
use crate::watermark::WatermarkResolver;

use super::{
    AdventureDetails, CardLayout, CardSide, LayoutVariant, OtherFaceDetails, PlaneswalkerDetails,
    PlaneswalkerKind, SplitDetails,
};

// ---------------------------------------------------------------------------
// Raw tag mapping
// ---------------------------------------------------------------------------

/// Internal construction target selected from the record's raw layout tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VariantTag {
    Normal,
    Split,
    Transform,
    ModalDoubleFaced,
    Adventure,
    Leveler,
    Saga,
    Mutate,
    Prototype,
    Class,
    Case,
    Battle,
    Planar,
    Token,
    Planeswalker,
    PlaneswalkerTransform,
    PlaneswalkerMdfc,
    Station,
}

/// Map a raw database layout tag to its construction target.
///
/// Several raw tags share one target: `meld` and `double_faced_token`
/// render as transforms, `emblem` as a token, and a handful of legacy
/// layouts fall back to `normal` or `token` as a best effort.
pub(crate) fn variant_tag(raw: &str) -> Option<VariantTag> {
    Some(match raw {
        // Tags the upstream database distinguishes natively.
        "normal" => VariantTag::Normal,
        "split" => VariantTag::Split,
        "transform" => VariantTag::Transform,
        "modal_dfc" => VariantTag::ModalDoubleFaced,
        "meld" => VariantTag::Transform,
        "leveler" => VariantTag::Leveler,
        "case" => VariantTag::Case,
        "class" => VariantTag::Class,
        "saga" => VariantTag::Saga,
        "adventure" => VariantTag::Adventure,
        "mutate" => VariantTag::Mutate,
        "prototype" => VariantTag::Prototype,
        "battle" => VariantTag::Battle,
        "planar" => VariantTag::Planar,
        "token" => VariantTag::Token,
        "emblem" => VariantTag::Token,
        // Tags synthesized by the lookup collaborator's postprocessing.
        "planeswalker" => VariantTag::Planeswalker,
        "planeswalker_mdfc" => VariantTag::PlaneswalkerMdfc,
        "planeswalker_tf" => VariantTag::PlaneswalkerTransform,
        "station" => VariantTag::Station,
        // Legacy layouts, rendered as their closest supported relative.
        "flip" => VariantTag::Transform,
        "scheme" => VariantTag::Normal,
        "vanguard" => VariantTag::Normal,
        "double_faced_token" => VariantTag::Transform,
        "augment" => VariantTag::Normal,
        "host" => VariantTag::Normal,
        "art_series" => VariantTag::Token,
        "reversible_card" => VariantTag::Transform,
        _ => return None,
    })
}

// ---------------------------------------------------------------------------
// ClassifyContext
// ---------------------------------------------------------------------------

/// Engine internals the construction pass borrows.
pub(crate) struct ClassifyContext<'a> {
    pub config: &'a Config,
    pub frames: &'a dyn FrameResolver,
    pub assets: &'a dyn WatermarkAssetStore,
    pub first_prints: &'a dyn FirstPrintingLookup,
    pub set_data: &'a HashMap<String, SetData>,
}

impl ClassifyContext<'_> {
    fn set_data_for(&self, record: &RawCardRecord) -> Option<&SetData> {
        let key = record.set.as_deref().unwrap_or("mtg").to_lowercase();
        self.set_data.get(&key)
    }

    fn watermark_resolver<'b>(
        &'b self,
        set_code: &'b str,
        record: &'b RawCardRecord,
    ) -> WatermarkResolver<'b> {
        WatermarkResolver {
            mode: self.config.watermark_mode,
            default_key: &self.config.watermark_default,
            set_code,
            oracle_id: record.oracle_id.as_deref().unwrap_or(""),
            assets: self.assets,
            first_prints: self.first_prints,
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build a classified layout. Errors are reason strings the engine wraps
/// into `LayoutError::ConstructionFailed`.
pub(crate) fn build_layout(
    ctx: &ClassifyContext<'_>,
    tag: VariantTag,
    record: &RawCardRecord,
    file: ArtFileDescriptor,
) -> Result<CardLayout, String> {
    if tag == VariantTag::Split {
        return build_split(ctx, record, file);
    }

    let lang = record
        .lang
        .clone()
        .unwrap_or_else(|| ctx.config.language.clone())
        .to_uppercase();
    let alt_lang = lang != "EN";

    let face = record.face_for(&file.name);
    let name_raw = face.name.clone();
    let name = face.name_localized(alt_lang);
    let type_line_raw = face.type_line.clone().unwrap_or_default();
    let type_line = face.type_line_localized(alt_lang);
    let mut oracle_text_raw = face.oracle_text.clone().unwrap_or_default();
    let mut oracle_text = face.oracle_text_localized(alt_lang);
    let power = face.power.clone().unwrap_or_default();
    let toughness = face.toughness.clone().unwrap_or_default();
    let side = if record.is_front() {
        CardSide::Front
    } else {
        CardSide::Back
    };

    // Variant payloads; several also reshape the common rules text.
    let variant = match tag {
        VariantTag::Normal => LayoutVariant::Normal,
        VariantTag::Planar => LayoutVariant::Planar,
        VariantTag::Token => LayoutVariant::Token,
        VariantTag::Transform => LayoutVariant::Transform { side },
        VariantTag::Battle => LayoutVariant::Battle {
            side,
            defense: face.defense.clone().unwrap_or_default(),
        },
        VariantTag::ModalDoubleFaced => {
            // Localized MDFC text carries both sides; keep this side's share.
            if alt_lang && face.printed_text.is_some() {
                let count = oracle_text_raw.matches('\n').count() + 1;
                oracle_text = text::first_lines(&oracle_text, count);
            }
            LayoutVariant::ModalDoubleFaced { side }
        }
        VariantTag::Mutate => {
            let mutate = text::split_mutate(&oracle_text);
            oracle_text = mutate.oracle_text;
            LayoutVariant::Mutate {
                mutate_text: mutate.mutate_text,
            }
        }
        VariantTag::Prototype => {
            let proto = text::parse_prototype(&oracle_text_raw)
                .ok_or("prototype announcement did not match")?;
            oracle_text = proto.oracle_text;
            LayoutVariant::Prototype {
                mana_cost: proto.mana_cost,
                power_toughness: proto.power_toughness,
            }
        }
        VariantTag::Leveler => {
            let stages = text::parse_leveler(&oracle_text)
                .ok_or("rules text did not match the leveler stage grammar")?;
            LayoutVariant::Leveler(stages)
        }
        VariantTag::Saga => LayoutVariant::Saga(text::parse_saga(
            &oracle_text,
            ctx.config.remove_reminder,
        )),
        VariantTag::Class => LayoutVariant::Class(text::parse_class(
            &oracle_text,
            ctx.config.remove_reminder,
        )),
        VariantTag::Case => LayoutVariant::Case {
            sections: oracle_text.split('\n').map(str::to_string).collect(),
        },
        VariantTag::Station => {
            let station =
                text::parse_station(&oracle_text).ok_or("no station markers in rules text")?;
            oracle_text = station.oracle_text.clone();
            LayoutVariant::Station(station)
        }
        VariantTag::Adventure => {
            let adventure = record
                .card_faces
                .get(1)
                .ok_or("adventure face missing from record")?;
            LayoutVariant::Adventure(AdventureDetails {
                name: adventure.name_localized(alt_lang),
                mana_cost: adventure.mana_cost.clone().unwrap_or_default(),
                type_line: adventure.type_line_localized(alt_lang),
                oracle_text: adventure.oracle_text_localized(alt_lang),
                flavor_text: adventure.flavor_text.clone().unwrap_or_default(),
            })
        }
        VariantTag::Planeswalker
        | VariantTag::PlaneswalkerTransform
        | VariantTag::PlaneswalkerMdfc => {
            oracle_text_raw = text::normalize_minus(&oracle_text_raw);
            oracle_text = text::normalize_minus(&oracle_text);
            let localized = (alt_lang && face.printed_text.is_some())
                .then_some(oracle_text.as_str());
            let abilities = text::parse_abilities(&oracle_text_raw, localized);
            if abilities.is_empty() {
                return Err("no planeswalker abilities parsed".to_string());
            }
            let kind = match tag {
                VariantTag::PlaneswalkerTransform => PlaneswalkerKind::Transform(side),
                VariantTag::PlaneswalkerMdfc => PlaneswalkerKind::ModalDoubleFaced(side),
                _ => PlaneswalkerKind::Standard,
            };
            LayoutVariant::Planeswalker(PlaneswalkerDetails {
                loyalty: face.loyalty.clone().unwrap_or_default(),
                abilities,
                kind,
            })
        }
        VariantTag::Split => unreachable!("split handled above"),
    };

    let (is_transform, is_mdfc) = match tag {
        VariantTag::Transform
        | VariantTag::Battle
        | VariantTag::PlaneswalkerTransform => (true, false),
        VariantTag::ModalDoubleFaced | VariantTag::PlaneswalkerMdfc => (false, true),
        VariantTag::Saga => (!record.card_faces.is_empty(), false),
        _ => (false, false),
    };

    let set_data = ctx.set_data_for(record);
    let is_token_variant = tag == VariantTag::Token;
    let set = if is_token_variant {
        set_data
            .and_then(|data| data.code_parent.clone())
            .map(|code| code.to_uppercase())
            .unwrap_or_else(|| record.set_code())
    } else {
        record.set_code()
    };
    let set_type = record.set_type.clone().unwrap_or_default();
    let rarity = record.rarity.clone().unwrap_or_else(|| "common".to_string());

    let collector = resolve_collector_info(CollectorRequest {
        number_raw: record.collector_number.as_deref(),
        set_code: &set,
        rarity: &rarity,
        set_data,
        mode: ctx.config.collector_mode,
        is_token: is_token_variant,
    });

    let frame = ctx.frames.resolve(face);
    let watermark = ctx
        .watermark_resolver(&set, record)
        .resolve(face.watermark.as_deref());

    let display_name = if is_token_variant {
        format!("{name} Token")
    } else {
        name.clone()
    };

    let is_creature = !power.is_empty() && !toughness.is_empty();
    let is_emblem = type_line_raw.contains("Emblem");
    let has_effect = |effect: &str| record.frame_effects.iter().any(|e| e == effect);

    Ok(CardLayout {
        art_files: file.file.clone().into_iter().collect(),
        name,
        name_raw: name_raw.clone(),
        display_name,
        mana_cost: face.mana_cost.clone().unwrap_or_default(),
        type_line,
        oracle_text,
        oracle_text_raw,
        flavor_text: face.flavor_text.clone().unwrap_or_default(),
        power,
        toughness,
        set,
        set_type: set_type.clone(),
        released_at: record.released_at.clone(),
        lang,
        rarity,
        artist: resolve_artist(&file, face.artist.as_deref()),
        collector,
        watermark,
        color_identity: face.color_identity.clone(),
        color_indicator: ordered_colors(&face.color_indicator),
        keywords: record.keywords.clone(),
        frame_effects: record.frame_effects.clone(),
        promo_types: record.promo_types.clone(),
        transform_icon: (is_transform || is_mdfc).then(|| transform_icon(record)),
        other_face: record
            .other_face(&name_raw)
            .map(|other| build_other_face(ctx, other, alt_lang)),
        is_creature,
        is_land: type_line_raw.contains("Land"),
        is_basic_land: type_line_raw.starts_with("Basic"),
        is_legendary: type_line_raw.contains("Legendary"),
        is_artifact: type_line_raw.contains("Artifact"),
        is_vehicle: type_line_raw.contains("Vehicle"),
        is_promo: record.promo || set_type == "promo" || !record.promo_types.is_empty(),
        is_front: record.is_front(),
        is_alt_lang: alt_lang,
        is_token: type_line_raw.contains("Token") || is_emblem,
        is_emblem,
        is_nyx: has_effect("nyxtouched")
            || (is_creature && type_line_raw.contains("Enchantment")),
        is_companion: has_effect("companion"),
        is_snow: type_line_raw.contains("Snow"),
        is_transform,
        is_mdfc,
        is_colorless: frame.is_colorless,
        is_hybrid: frame.is_hybrid,
        frame,
        type_line_raw,
        file,
        variant,
    })
}

// ---------------------------------------------------------------------------
// Split construction
// ---------------------------------------------------------------------------

/// Split cards derive every textual attribute per half; shared values
/// (color identity, artist, collector info) come from the record root.
fn build_split(
    ctx: &ClassifyContext<'_>,
    record: &RawCardRecord,
    file: ArtFileDescriptor,
) -> Result<CardLayout, String> {
    let faces = &record.card_faces;
    if faces.len() != 2 {
        return Err(format!("split card has {} faces, expected 2", faces.len()));
    }

    let lang = record
        .lang
        .clone()
        .unwrap_or_else(|| ctx.config.language.clone())
        .to_uppercase();
    let alt_lang = lang != "EN";

    let names: Vec<String> = faces.iter().map(|f| f.name_localized(alt_lang)).collect();
    let type_lines: Vec<String> = faces
        .iter()
        .map(|f| f.type_line_localized(alt_lang))
        .collect();
    let mana_costs: Vec<String> = faces
        .iter()
        .map(|f| f.mana_cost.clone().unwrap_or_default())
        .collect();
    let flavor_texts: Vec<String> = faces
        .iter()
        .map(|f| f.flavor_text.clone().unwrap_or_default())
        .collect();

    let raw_texts: Vec<String> = faces
        .iter()
        .map(|f| f.oracle_text_localized(alt_lang))
        .collect();
    let has_fuse = record.keywords.iter().any(|k| k == "Fuse");
    let oracle_texts = text::process_split_texts(&raw_texts, has_fuse);

    let frames: Vec<FrameDetails> = faces.iter().map(|f| ctx.frames.resolve(f)).collect();

    let set = record.set_code();
    let set_data = ctx.set_data_for(record);
    let resolver = ctx.watermark_resolver(&set, record);
    let watermarks: Vec<_> = faces
        .iter()
        .map(|f| resolver.resolve(f.watermark.as_deref()))
        .collect();

    let rarity = record.rarity.clone().unwrap_or_else(|| "common".to_string());
    let collector = resolve_collector_info(CollectorRequest {
        number_raw: record.collector_number.as_deref(),
        set_code: &set,
        rarity: &rarity,
        set_data,
        mode: ctx.config.collector_mode,
        is_token: false,
    });

    // Both halves share one frame identity drawn from the card's full
    // color identity.
    let identity = ordered_colors(&record.face.color_identity);
    let frame = FrameDetails {
        twins: identity.clone(),
        pinlines: identity.clone(),
        background: identity.clone(),
        identity,
        is_colorless: frames[0].is_colorless,
        is_hybrid: frames[0].is_hybrid,
    };

    let set_type = record.set_type.clone().unwrap_or_default();

    Ok(CardLayout {
        art_files: file.file.clone().into_iter().collect(),
        name: names[0].clone(),
        name_raw: format!("{} _ {}", names[0], names[1]),
        display_name: format!("{} // {}", names[0], names[1]),
        mana_cost: mana_costs[0].clone(),
        type_line: type_lines[0].clone(),
        type_line_raw: faces[0].type_line.clone().unwrap_or_default(),
        oracle_text: oracle_texts[0].clone(),
        oracle_text_raw: faces[0].oracle_text.clone().unwrap_or_default(),
        flavor_text: flavor_texts[0].clone(),
        power: String::new(),
        toughness: String::new(),
        set,
        set_type: set_type.clone(),
        released_at: record.released_at.clone(),
        lang,
        rarity,
        artist: resolve_artist(&file, record.face.artist.as_deref()),
        collector,
        frame,
        watermark: watermarks[0].clone(),
        color_identity: record.face.color_identity.clone(),
        color_indicator: ordered_colors(&record.face.color_indicator),
        keywords: record.keywords.clone(),
        frame_effects: record.frame_effects.clone(),
        promo_types: record.promo_types.clone(),
        transform_icon: None,
        other_face: None,
        is_creature: false,
        is_land: false,
        is_basic_land: false,
        is_legendary: false,
        is_artifact: false,
        is_vehicle: false,
        is_promo: record.promo || set_type == "promo" || !record.promo_types.is_empty(),
        is_front: record.is_front(),
        is_alt_lang: alt_lang,
        is_token: false,
        is_emblem: false,
        is_nyx: false,
        is_companion: false,
        is_snow: false,
        is_transform: false,
        is_mdfc: false,
        is_colorless: frames[0].is_colorless,
        is_hybrid: frames[0].is_hybrid,
        file,
        variant: LayoutVariant::Split(SplitDetails {
            names,
            mana_costs,
            type_lines,
            oracle_texts,
            flavor_texts,
            watermarks,
            frames,
        }),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Frame effects that double as transform icons.
const TRANSFORM_ICONS: [&str; 8] = [
    "sunmoondfc",
    "compasslanddfc",
    "upsidedowndfc",
    "mooneldrazidfc",
    "originpwdfc",
    "convertdfc",
    "fandfc",
    "meld",
];

/// Havengul Lab flips upside down but carries no icon frame effect.
const UPSIDE_DOWN_ORACLE_ID: &str = "e71ac446-02a4-4468-8d29-f28b21617665";

fn transform_icon(record: &RawCardRecord) -> String {
    if let Some(effect) = record
        .frame_effects
        .iter()
        .find(|e| TRANSFORM_ICONS.contains(&e.as_str()))
    {
        return effect.clone();
    }
    if record.oracle_id.as_deref() == Some(UPSIDE_DOWN_ORACLE_ID) {
        return "upsidedowndfc".to_string();
    }
    "convertdfc".to_string()
}

/// Artist name, preferring the filename override. Joint credits with `&`
/// drop duplicate words, keeping the last occurrence.
fn resolve_artist(file: &ArtFileDescriptor, raw: Option<&str>) -> String {
    if let Some(artist) = &file.artist {
        return artist.clone();
    }
    let artist = raw.unwrap_or("Unknown");
    if !artist.contains('&') {
        return artist.to_string();
    }
    let mut words: Vec<&str> = Vec::new();
    for word in artist.split(' ') {
        if let Some(position) = words.iter().position(|w| *w == word) {
            words.remove(position);
        }
        words.push(word);
    }
    words.join(" ")
}

fn build_other_face(
    ctx: &ClassifyContext<'_>,
    other: &CardFace,
    alt_lang: bool,
) -> OtherFaceDetails {
    let type_line = other.type_line.clone().unwrap_or_default();
    let mana_cost = other.mana_cost.clone().unwrap_or_default();
    let oracle_text = other.oracle_text_localized(alt_lang);

    // The MDFC bottom bar shows the opposing cost, or for land faces the
    // first tap-ability sentence.
    let right = if !type_line.contains("Land") {
        mana_cost.clone()
    } else {
        oracle_text
            .split('\n')
            .find(|line| line.starts_with("{T}"))
            .map(|line| format!("{}.", line.split('.').next().unwrap_or(line)))
            .unwrap_or_else(|| oracle_text.clone())
    };
    let left = type_line
        .split(' ')
        .next_back()
        .unwrap_or_default()
        .to_string();

    OtherFaceDetails {
        name: other.name.clone(),
        power: other.power.clone().unwrap_or_default(),
        toughness: other.toughness.clone().unwrap_or_default(),
        twins: ctx.frames.resolve(other).twins,
        mana_cost,
        type_line,
        oracle_text,
        left,
        right,
    }
}
