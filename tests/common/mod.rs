//! Shared stub collaborators and record fixtures for integration tests.
//!
//! Provides `engine()` / `builder()` which wire a [`LayoutEngine`] to a
//! map-backed card lookup, an echoing frame resolver, and a fixed-key
//! watermark asset store, plus `record()` for building records from
//! `serde_json::json!` fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use cardlayout::filename::ArtFileDescriptor;
use cardlayout::lookup::{CardLookup, FirstPrintingLookup, FrameResolver, WatermarkAssetStore};
use cardlayout::models::{
    normalize_name, ordered_colors, AssetRef, CardFace, FrameDetails, RawCardRecord, SetData,
};
use cardlayout::{LayoutEngine, LayoutEngineBuilder};

// ---------------------------------------------------------------------------
// Record fixtures
// ---------------------------------------------------------------------------

/// Deserialize a `json!` fixture into a record.
pub fn record(value: serde_json::Value) -> RawCardRecord {
    serde_json::from_value(value).unwrap()
}

/// Set data map with one entry, keyed by lowercase set code.
pub fn set_data(code: &str, data: SetData) -> HashMap<String, SetData> {
    HashMap::from([(code.to_lowercase(), data)])
}

// ---------------------------------------------------------------------------
// Stub collaborators
// ---------------------------------------------------------------------------

/// Card lookup serving records from a fixed map, keyed by the record's
/// root name and every face name.
pub struct MapLookup {
    records: HashMap<String, RawCardRecord>,
}

impl MapLookup {
    pub fn new(records: Vec<RawCardRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            for face in &record.card_faces {
                map.insert(normalize_name(&face.name), record.clone());
            }
            map.insert(normalize_name(&record.face.name), record.clone());
        }
        Self { records: map }
    }
}

impl CardLookup for MapLookup {
    fn resolve(&self, descriptor: &ArtFileDescriptor) -> Option<RawCardRecord> {
        self.records.get(&normalize_name(&descriptor.name)).cloned()
    }
}

/// Frame resolver echoing the face's ordered color identity into every
/// identity slot.
pub struct EchoFrames;

impl FrameResolver for EchoFrames {
    fn resolve(&self, face: &CardFace) -> FrameDetails {
        let identity = ordered_colors(&face.color_identity);
        FrameDetails {
            twins: identity.clone(),
            pinlines: identity.clone(),
            background: identity.clone(),
            identity,
            is_colorless: false,
            is_hybrid: false,
        }
    }
}

/// Asset store with fixed watermark keys and per-set symbol assets.
pub struct MapAssets {
    pub keys: Vec<String>,
    pub sets: Vec<String>,
}

impl MapAssets {
    pub fn new(keys: &[&str], sets: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_lowercase()).collect(),
            sets: sets.iter().map(|s| s.to_lowercase()).collect(),
        }
    }
}

impl WatermarkAssetStore for MapAssets {
    fn find(&self, key: &str) -> Option<AssetRef> {
        let key = key.to_lowercase();
        self.keys.contains(&key).then(|| AssetRef {
            stem: key,
            parent: "watermark".to_string(),
            path: None,
        })
    }

    fn find_for_set(&self, set_code: &str) -> Option<AssetRef> {
        let set_code = set_code.to_lowercase();
        // Set symbol assets are generic `WM` files nested under the set.
        self.sets.contains(&set_code).then(|| AssetRef {
            stem: "WM".to_string(),
            parent: set_code,
            path: None,
        })
    }
}

/// First-printing lookup with a fixed oracle-id -> set code table.
pub struct MapFirstPrints {
    pub prints: HashMap<String, String>,
}

impl MapFirstPrints {
    pub fn new(prints: &[(&str, &str)]) -> Self {
        Self {
            prints: prints
                .iter()
                .map(|(oracle_id, set)| (oracle_id.to_string(), set.to_string()))
                .collect(),
        }
    }
}

impl FirstPrintingLookup for MapFirstPrints {
    fn first_print(&self, oracle_id: &str) -> Option<RawCardRecord> {
        self.prints.get(oracle_id).map(|set| RawCardRecord {
            set: Some(set.clone()),
            ..RawCardRecord::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Engine wiring
// ---------------------------------------------------------------------------

/// Pre-wired builder tests can extend with config overrides.
pub fn builder(records: Vec<RawCardRecord>) -> LayoutEngineBuilder {
    LayoutEngine::builder()
        .card_lookup(Arc::new(MapLookup::new(records)))
        .frame_resolver(Arc::new(EchoFrames))
}

/// Engine with default configuration and the standard stubs.
pub fn engine(records: Vec<RawCardRecord>) -> LayoutEngine {
    builder(records).build().unwrap()
}
