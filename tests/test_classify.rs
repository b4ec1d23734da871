//! End-to-end classification tests against stub collaborators.

mod common;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cardlayout::filename::ArtFileDescriptor;
use cardlayout::layouts::{CardSide, LayoutVariant, PlaneswalkerKind};
use cardlayout::lookup::CardLookup;
use cardlayout::models::{RawCardRecord, SetData};
use cardlayout::LayoutError;
use pretty_assertions::assert_eq;
use serde_json::json;

// ---------------------------------------------------------------------------
// Normal cards
// ---------------------------------------------------------------------------

fn bolt() -> RawCardRecord {
    common::record(json!({
        "name": "Lightning Bolt",
        "layout": "normal",
        "set": "lea",
        "collector_number": "161",
        "rarity": "common",
        "mana_cost": "{R}",
        "type_line": "Instant",
        "oracle_text": "Lightning Bolt deals 3 damage to any target.",
        "color_identity": ["R"],
        "artist": "Christopher Rush",
        "lang": "en"
    }))
}

#[test]
fn normal_card_populates_common_fields() {
    let engine = common::engine(vec![bolt()]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Lightning Bolt"))
        .unwrap();

    assert_eq!(layout.variant, LayoutVariant::Normal);
    assert_eq!(layout.name, "Lightning Bolt");
    assert_eq!(layout.set, "LEA");
    assert_eq!(layout.mana_cost, "{R}");
    assert_eq!(layout.artist, "Christopher Rush");
    assert_eq!(layout.rarity_letter(), 'C');
    assert_eq!(layout.frame.identity, "R");
    assert!(!layout.is_creature);
    assert_eq!(layout.to_string(), "Lightning Bolt [LEA] {161}");
}

#[test]
fn filename_artist_override_wins() {
    let engine = common::engine(vec![bolt()]);
    let layout = engine
        .classify_file(Path::new("art/Lightning Bolt (John Doe).png"))
        .unwrap();

    assert_eq!(layout.artist, "John Doe");
    assert_eq!(layout.art_files, vec![PathBuf::from("art/Lightning Bolt (John Doe).png")]);
}

#[test]
fn joint_artist_credit_drops_duplicate_words() {
    let mut record = bolt();
    record.face.artist = Some("Jesper Ejsing & Kev Ejsing".to_string());
    let engine = common::engine(vec![record]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Lightning Bolt"))
        .unwrap();

    assert_eq!(layout.artist, "Jesper & Kev Ejsing");
}

#[test]
fn alternate_language_prefers_printed_text() {
    let mut record = bolt();
    record.lang = Some("fr".to_string());
    record.face.printed_name = Some("Foudre".to_string());
    let engine = common::engine(vec![record]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Lightning Bolt"))
        .unwrap();

    assert!(layout.is_alt_lang);
    assert_eq!(layout.name, "Foudre");
    assert_eq!(layout.name_raw, "Lightning Bolt");
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[test]
fn unknown_card_is_lookup_failed() {
    let engine = common::engine(vec![]);
    let err = engine
        .classify(ArtFileDescriptor::named("No Such Card"))
        .unwrap_err();
    assert!(matches!(err, LayoutError::LookupFailed { name } if name == "No Such Card"));
}

#[test]
fn unmapped_layout_tag_is_unsupported() {
    let mut record = bolt();
    record.layout = Some("hologram".to_string());
    let engine = common::engine(vec![record]);
    let err = engine
        .classify(ArtFileDescriptor::named("Lightning Bolt"))
        .unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedLayout { layout, .. } if layout == "hologram"));
}

#[test]
fn malformed_filename_is_tag_parse() {
    let engine = common::engine(vec![bolt()]);
    let err = engine
        .classify_file(Path::new("art/Lightning Bolt (John.png"))
        .unwrap_err();
    assert!(matches!(err, LayoutError::TagParse { .. }));
}

#[test]
fn planeswalker_without_abilities_is_construction_failed() {
    let record = common::record(json!({
        "name": "Blank Walker",
        "layout": "planeswalker",
        "set": "one",
        "oracle_text": ""
    }));
    let engine = common::engine(vec![record]);
    let err = engine
        .classify(ArtFileDescriptor::named("Blank Walker"))
        .unwrap_err();
    assert!(matches!(err, LayoutError::ConstructionFailed { layout, .. } if layout == "planeswalker"));
}

#[test]
fn leveler_with_unparseable_body_is_construction_failed() {
    let record = common::record(json!({
        "name": "Broken Leveler",
        "layout": "leveler",
        "set": "roe",
        "oracle_text": "Flying"
    }));
    let engine = common::engine(vec![record]);
    let err = engine
        .classify(ArtFileDescriptor::named("Broken Leveler"))
        .unwrap_err();
    assert!(matches!(err, LayoutError::ConstructionFailed { .. }));
}

// ---------------------------------------------------------------------------
// Variant payloads
// ---------------------------------------------------------------------------

#[test]
fn saga_record_classifies_with_chapters() {
    let record = common::record(json!({
        "name": "Triumphant Tale",
        "layout": "saga",
        "set": "dom",
        "type_line": "Enchantment — Saga",
        "oracle_text": "Read ahead.\nI — Draw a card.\nII — Deal 2 damage.\nIII — Gain 3 life."
    }));
    let engine = common::engine(vec![record]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Triumphant Tale"))
        .unwrap();

    let LayoutVariant::Saga(saga) = &layout.variant else {
        panic!("expected a saga variant");
    };
    assert_eq!(saga.description, "Read ahead.");
    assert_eq!(saga.chapters.len(), 3);
    assert_eq!(saga.chapters[0].icons, vec!["I"]);
    assert!(!layout.is_transform);
}

#[test]
fn planeswalker_record_parses_abilities_and_loyalty() {
    let record = common::record(json!({
        "name": "Test Walker",
        "layout": "planeswalker",
        "set": "war",
        "type_line": "Legendary Planeswalker — Test",
        "loyalty": "3",
        "oracle_text": "+1: Draw a card.\n\u{2212}6: Deal 6 damage to any target."
    }));
    let engine = common::engine(vec![record]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Test Walker"))
        .unwrap();

    let LayoutVariant::Planeswalker(details) = &layout.variant else {
        panic!("expected a planeswalker variant");
    };
    assert_eq!(details.loyalty, "3");
    assert_eq!(details.kind, PlaneswalkerKind::Standard);
    assert_eq!(details.abilities.len(), 2);
    assert_eq!(details.abilities[1].cost.as_deref(), Some("-6"));
    // Minus normalization reaches the stored rules text too.
    assert!(layout.oracle_text.contains("-6:"));
}

#[test]
fn transform_faces_resolve_front_and_back() {
    let faces = json!([
        {
            "name": "Delver of Secrets",
            "type_line": "Creature — Human Wizard",
            "oracle_text": "At the beginning of your upkeep, look at the top card.",
            "power": "1",
            "toughness": "1"
        },
        {
            "name": "Insectile Aberration",
            "type_line": "Creature — Human Insect",
            "oracle_text": "Flying",
            "power": "3",
            "toughness": "2"
        }
    ]);
    let front = common::record(json!({
        "name": "Delver of Secrets // Insectile Aberration",
        "layout": "transform",
        "set": "isd",
        "frame_effects": ["sunmoondfc"],
        "card_faces": faces,
        "front": true
    }));
    let mut back = front.clone();
    back.front = Some(false);

    let engine = common::engine(vec![front]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Delver of Secrets"))
        .unwrap();
    assert_eq!(
        layout.variant,
        LayoutVariant::Transform {
            side: CardSide::Front
        }
    );
    assert!(layout.is_transform);
    assert_eq!(layout.transform_icon.as_deref(), Some("sunmoondfc"));
    assert_eq!(layout.name, "Delver of Secrets");
    let other = layout.other_face.as_ref().unwrap();
    assert_eq!(other.name, "Insectile Aberration");
    assert_eq!(other.power, "3");

    let engine = common::engine(vec![back]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Insectile Aberration"))
        .unwrap();
    assert_eq!(
        layout.variant,
        LayoutVariant::Transform {
            side: CardSide::Back
        }
    );
}

#[test]
fn mdfc_back_land_fills_the_bottom_bar() {
    let record = common::record(json!({
        "name": "Shatterskull Smashing // Shatterskull, the Hanging Pass",
        "layout": "modal_dfc",
        "set": "znr",
        "card_faces": [
            {
                "name": "Shatterskull Smashing",
                "mana_cost": "{X}{R}{R}",
                "type_line": "Sorcery",
                "oracle_text": "Shatterskull Smashing deals X damage."
            },
            {
                "name": "Shatterskull, the Hanging Pass",
                "type_line": "Land",
                "oracle_text": "As this land enters, you may pay 3 life.\n{T}: Add {R}. Spend it wisely."
            }
        ]
    }));
    let engine = common::engine(vec![record]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Shatterskull Smashing"))
        .unwrap();

    assert!(layout.is_mdfc);
    let other = layout.other_face.as_ref().unwrap();
    assert_eq!(other.left, "Land");
    assert_eq!(other.right, "{T}: Add {R}.");
}

#[test]
fn adventure_payload_reads_the_second_face() {
    let record = common::record(json!({
        "name": "Bonecrusher Giant // Stomp",
        "layout": "adventure",
        "set": "eld",
        "card_faces": [
            {
                "name": "Bonecrusher Giant",
                "mana_cost": "{2}{R}",
                "type_line": "Creature — Giant",
                "oracle_text": "Whenever this creature becomes the target of a spell, deal 2 damage.",
                "power": "4",
                "toughness": "3"
            },
            {
                "name": "Stomp",
                "mana_cost": "{1}{R}",
                "type_line": "Instant — Adventure",
                "oracle_text": "Damage can't be prevented this turn. Stomp deals 2 damage."
            }
        ]
    }));
    let engine = common::engine(vec![record]);
    let layout = engine
        .classify(ArtFileDescriptor::named("Bonecrusher Giant"))
        .unwrap();

    let LayoutVariant::Adventure(adventure) = &layout.variant else {
        panic!("expected an adventure variant");
    };
    assert_eq!(adventure.name, "Stomp");
    assert_eq!(adventure.mana_cost, "{1}{R}");
    assert_eq!(adventure.type_line, "Instant — Adventure");
    assert_eq!(layout.name, "Bonecrusher Giant");
    assert_eq!(layout.power, "4");
}

#[test]
fn token_substitutes_parent_set_and_token_count() {
    let record = common::record(json!({
        "name": "Goblin",
        "layout": "token",
        "set": "tone",
        "collector_number": "4",
        "type_line": "Token Creature — Goblin"
    }));
    let engine = common::builder(vec![record])
        .set_data(common::set_data(
            "tone",
            SetData {
                code_parent: Some("ONE".to_string()),
                count_tokens: Some(12),
                ..SetData::default()
            },
        ))
        .build()
        .unwrap();
    let layout = engine.classify(ArtFileDescriptor::named("Goblin")).unwrap();

    assert_eq!(layout.variant, LayoutVariant::Token);
    assert_eq!(layout.set, "ONE");
    assert_eq!(layout.display_name, "Goblin Token");
    assert!(layout.is_token);
    assert_eq!(layout.collector.formatted_line, "004/012 T");
}

#[test]
fn meld_and_emblem_tags_share_variants() {
    let meld = common::record(json!({
        "name": "Gisela, the Broken Blade",
        "layout": "meld",
        "set": "emn",
        "front": true
    }));
    let emblem = common::record(json!({
        "name": "Chandra",
        "layout": "emblem",
        "set": "temn",
        "type_line": "Emblem — Chandra"
    }));
    let engine = common::engine(vec![meld, emblem]);

    let layout = engine
        .classify(ArtFileDescriptor::named("Gisela, the Broken Blade"))
        .unwrap();
    assert!(matches!(layout.variant, LayoutVariant::Transform { .. }));

    let layout = engine.classify(ArtFileDescriptor::named("Chandra")).unwrap();
    assert_eq!(layout.variant, LayoutVariant::Token);
    assert!(layout.is_emblem);
}

#[test]
fn split_halves_carry_paired_text_fields() {
    let record = common::record(json!({
        "name": "Fire // Ice",
        "layout": "split",
        "set": "mh2",
        "collector_number": "290",
        "rarity": "uncommon",
        "color_identity": ["U", "R"],
        "card_faces": [
            {
                "name": "Fire",
                "mana_cost": "{1}{R}",
                "type_line": "Instant",
                "oracle_text": "Fire deals 2 damage divided as you choose."
            },
            {
                "name": "Ice",
                "mana_cost": "{1}{U}",
                "type_line": "Instant",
                "oracle_text": "Tap target permanent.\nDraw a card."
            }
        ]
    }));
    let engine = common::engine(vec![record]);
    let layout = engine.classify(ArtFileDescriptor::named("Fire")).unwrap();

    let LayoutVariant::Split(details) = &layout.variant else {
        panic!("expected a split variant");
    };
    assert_eq!(details.names, vec!["Fire", "Ice"]);
    assert_eq!(details.mana_costs, vec!["{1}{R}", "{1}{U}"]);
    assert_eq!(details.frames.len(), 2);
    assert_eq!(layout.display_name, "Fire // Ice");
    // Both halves share one identity from the full color identity.
    assert_eq!(layout.frame.pinlines, "UR");
    assert_eq!(layout.to_string(), "Fire // Ice [MH2] {290}");
}

// ---------------------------------------------------------------------------
// Batch classification
// ---------------------------------------------------------------------------

/// Lookup wrapper that counts upstream resolves.
struct CountingLookup {
    inner: common::MapLookup,
    calls: Arc<AtomicUsize>,
}

impl CardLookup for CountingLookup {
    fn resolve(&self, descriptor: &ArtFileDescriptor) -> Option<RawCardRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(descriptor)
    }
}

#[test]
fn batch_preserves_input_order_and_reports_per_file_errors() {
    let engine = common::engine(vec![bolt()]);
    let files = vec![
        PathBuf::from("art/Lightning Bolt.png"),
        PathBuf::from("art/No Such Card.png"),
        PathBuf::from("art/Lightning Bolt (Other Artist).png"),
    ];
    let results = engine.classify_batch(&files, 3);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().name, "Lightning Bolt");
    assert!(matches!(
        results[1],
        Err(LayoutError::LookupFailed { .. })
    ));
    assert_eq!(results[2].as_ref().unwrap().artist, "Other Artist");
}

#[test]
fn batch_memoizes_duplicate_lookups() {
    let calls = Arc::new(AtomicUsize::new(0));
    let lookup = CountingLookup {
        inner: common::MapLookup::new(vec![bolt()]),
        calls: calls.clone(),
    };
    let engine = cardlayout::LayoutEngine::builder()
        .card_lookup(Arc::new(lookup))
        .frame_resolver(Arc::new(common::EchoFrames))
        .build()
        .unwrap();

    let files: Vec<PathBuf> = (0..8)
        .map(|_| PathBuf::from("art/Lightning Bolt.png"))
        .collect();
    let results = engine.classify_batch(&files, 4);

    assert!(results.iter().all(|r| r.is_ok()));
    // Eight identical files resolve upstream exactly once.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
