//! Watermark policy tests.

mod common;

use cardlayout::watermark::WatermarkResolver;
use cardlayout::WatermarkMode;
use common::{MapAssets, MapFirstPrints};
use pretty_assertions::assert_eq;

fn resolver<'a>(
    mode: WatermarkMode,
    assets: &'a MapAssets,
    first_prints: &'a MapFirstPrints,
) -> WatermarkResolver<'a> {
    WatermarkResolver {
        mode,
        default_key: "wotc",
        set_code: "ONE",
        oracle_id: "oracle-1",
        assets,
        first_prints,
    }
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

#[test]
fn disabled_mode_always_resolves_to_none() {
    let assets = MapAssets::new(&["wotc", "phyrexian"], &[]);
    let prints = MapFirstPrints::new(&[]);
    let r = resolver(WatermarkMode::Disabled, &assets, &prints);

    let selection = r.resolve(Some("phyrexian"));
    assert_eq!(selection.raw_name.as_deref(), Some("phyrexian"));
    assert_eq!(selection.asset, None);
    assert_eq!(selection.name(), None);
}

#[test]
fn forced_mode_ignores_the_card_watermark() {
    let assets = MapAssets::new(&["wotc", "phyrexian"], &[]);
    let prints = MapFirstPrints::new(&[]);
    let r = resolver(WatermarkMode::Forced, &assets, &prints);

    let selection = r.resolve(Some("phyrexian"));
    assert_eq!(selection.resolved_key.as_deref(), Some("wotc"));
    assert_eq!(selection.name().as_deref(), Some("wotc"));
}

#[test]
fn automatic_mode_resolves_card_watermark_only() {
    let assets = MapAssets::new(&["phyrexian"], &[]);
    let prints = MapFirstPrints::new(&[]);
    let r = resolver(WatermarkMode::Automatic, &assets, &prints);

    assert_eq!(
        r.resolve(Some("phyrexian")).name().as_deref(),
        Some("phyrexian")
    );
    // Unknown key resolves to nothing, no fallback.
    assert_eq!(r.resolve(Some("unknown")).asset, None);
    // No raw key resolves to nothing.
    assert_eq!(r.resolve(None).asset, None);
}

#[test]
fn fallback_mode_prefers_the_card_watermark() {
    let assets = MapAssets::new(&["wotc", "phyrexian"], &[]);
    let prints = MapFirstPrints::new(&[]);
    let r = resolver(WatermarkMode::Fallback, &assets, &prints);

    assert_eq!(
        r.resolve(Some("phyrexian")).name().as_deref(),
        Some("phyrexian")
    );
}

#[test]
fn fallback_mode_uses_default_when_raw_is_missing_or_unresolvable() {
    let assets = MapAssets::new(&["wotc"], &[]);
    let prints = MapFirstPrints::new(&[]);
    let r = resolver(WatermarkMode::Fallback, &assets, &prints);

    // No raw watermark at all.
    assert_eq!(r.resolve(None).name().as_deref(), Some("wotc"));
    // Raw watermark exists but has no asset.
    let selection = r.resolve(Some("unknown"));
    assert_eq!(selection.raw_name.as_deref(), Some("unknown"));
    assert_eq!(selection.name().as_deref(), Some("wotc"));
}

// ---------------------------------------------------------------------------
// Sentinel keys
// ---------------------------------------------------------------------------

#[test]
fn set_sentinel_resolves_the_first_printing_set() {
    let assets = MapAssets::new(&[], &["lea", "one"]);
    let prints = MapFirstPrints::new(&[("oracle-1", "LEA")]);
    let r = resolver(WatermarkMode::Automatic, &assets, &prints);

    let selection = r.resolve(Some("set"));
    assert_eq!(selection.resolved_key.as_deref(), Some("lea"));
    // The set symbol asset is a generic WM file named by its parent.
    assert_eq!(selection.name().as_deref(), Some("lea"));
}

#[test]
fn set_sentinel_falls_back_to_current_set_without_first_print() {
    let assets = MapAssets::new(&[], &["one"]);
    let prints = MapFirstPrints::new(&[]);
    let r = resolver(WatermarkMode::Automatic, &assets, &prints);

    let selection = r.resolve(Some("set"));
    assert_eq!(selection.resolved_key.as_deref(), Some("one"));
}

#[test]
fn symbol_sentinel_resolves_the_current_set() {
    let assets = MapAssets::new(&[], &["one"]);
    let prints = MapFirstPrints::new(&[("oracle-1", "LEA")]);
    let r = resolver(WatermarkMode::Automatic, &assets, &prints);

    let selection = r.resolve(Some("symbol"));
    assert_eq!(selection.resolved_key.as_deref(), Some("one"));
    assert_eq!(selection.name().as_deref(), Some("one"));
}
