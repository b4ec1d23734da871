//! Layout classification core for Magic: The Gathering proxy rendering.
//!
//! Given a card record (fetched through an injected lookup) and an art
//! file descriptor, classifies the card into one of a closed set of layout
//! variants and derives every field a downstream renderer needs: name and
//! type line, mana cost, rules text, collector line, frame color identity,
//! watermark selection, and per-variant structured text (planeswalker
//! abilities, saga chapters, class levels, station levels, leveler stages,
//! adventure/mutate/prototype sub-costs).
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use cardlayout::filename::ArtFileDescriptor;
//! use cardlayout::models::{CardFace, FrameDetails, RawCardRecord};
//! use cardlayout::{CardLookup, FrameResolver, LayoutEngine};
//!
//! struct Db;
//! impl CardLookup for Db {
//!     fn resolve(&self, _descriptor: &ArtFileDescriptor) -> Option<RawCardRecord> {
//!         Some(RawCardRecord {
//!             layout: Some("normal".to_string()),
//!             ..RawCardRecord::default()
//!         })
//!     }
//! }
//!
//! struct Frames;
//! impl FrameResolver for Frames {
//!     fn resolve(&self, _face: &CardFace) -> FrameDetails {
//!         FrameDetails::default()
//!     }
//! }
//!
//! let engine = LayoutEngine::builder()
//!     .card_lookup(Arc::new(Db))
//!     .frame_resolver(Arc::new(Frames))
//!     .build()
//!     .unwrap();
//!
//! let layout = engine
//!     .classify(ArtFileDescriptor::named("Lightning Bolt"))
//!     .unwrap();
//! assert_eq!(layout.variant.name(), "normal");
//! ```

#[cfg(feature = "async")]
pub mod async_engine;
pub mod collector;
pub mod config;
pub mod error;
pub mod filename;
pub mod layouts;
pub mod lookup;
pub mod merge;
pub mod models;
pub mod text;
pub mod watermark;

#[cfg(feature = "async")]
pub use async_engine::AsyncLayoutEngine;
pub use config::{CollectorMode, Config, WatermarkMode};
pub use error::{LayoutError, Result};
pub use filename::{parse_art_filename, ArtFileDescriptor};
pub use layouts::{CardLayout, LayoutVariant};
pub use lookup::{CardLookup, FirstPrintingLookup, FrameResolver, WatermarkAssetStore};
pub use merge::merge_dual_faced;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

use layouts::classify::{self, ClassifyContext};
use lookup::{MemoizedLookup, NoFirstPrints, NoWatermarkAssets};
use models::{RawCardRecord, SetData};

// ---------------------------------------------------------------------------
// LayoutEngineBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`LayoutEngine`].
///
/// The card lookup and frame resolver collaborators are required; the
/// watermark asset store and first-printing lookup default to null
/// implementations that resolve nothing.
#[derive(Default)]
pub struct LayoutEngineBuilder {
    config: Config,
    lookup: Option<Arc<dyn CardLookup>>,
    frames: Option<Arc<dyn FrameResolver>>,
    assets: Option<Arc<dyn WatermarkAssetStore>>,
    first_prints: Option<Arc<dyn FirstPrintingLookup>>,
    set_data: HashMap<String, SetData>,
}

impl LayoutEngineBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the watermark policy mode.
    pub fn watermark_mode(mut self, mode: WatermarkMode) -> Self {
        self.config.watermark_mode = mode;
        self
    }

    /// Set the default watermark key for `Forced` and `Fallback` modes.
    pub fn watermark_default(mut self, key: &str) -> Self {
        self.config.watermark_default = key.to_string();
        self
    }

    /// Set the collector line display mode.
    pub fn collector_mode(mut self, mode: CollectorMode) -> Self {
        self.config.collector_mode = mode;
        self
    }

    /// Set the fallback print language.
    pub fn language(mut self, language: &str) -> Self {
        self.config.language = language.to_string();
        self
    }

    /// Drop the leading reminder line of Saga and Class text.
    pub fn remove_reminder(mut self, remove: bool) -> Self {
        self.config.remove_reminder = remove;
        self
    }

    /// Set the card lookup collaborator. Required.
    pub fn card_lookup(mut self, lookup: Arc<dyn CardLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Set the frame resolver collaborator. Required.
    pub fn frame_resolver(mut self, frames: Arc<dyn FrameResolver>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Set the watermark asset store collaborator.
    pub fn watermark_assets(mut self, assets: Arc<dyn WatermarkAssetStore>) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Set the first-printing lookup collaborator.
    pub fn first_printings(mut self, first_prints: Arc<dyn FirstPrintingLookup>) -> Self {
        self.first_prints = Some(first_prints);
        self
    }

    /// Provide per-set metadata, keyed by lowercase set code.
    pub fn set_data(mut self, set_data: HashMap<String, SetData>) -> Self {
        self.set_data = set_data;
        self
    }

    /// Build the engine.
    pub fn build(self) -> Result<LayoutEngine> {
        let lookup = self
            .lookup
            .ok_or_else(|| LayoutError::Config("a card lookup is required".to_string()))?;
        let frames = self
            .frames
            .ok_or_else(|| LayoutError::Config("a frame resolver is required".to_string()))?;
        Ok(LayoutEngine {
            config: self.config,
            lookup: MemoizedLookup::new(lookup),
            frames,
            assets: self.assets.unwrap_or_else(|| Arc::new(NoWatermarkAssets)),
            first_prints: self
                .first_prints
                .unwrap_or_else(|| Arc::new(NoFirstPrints)),
            set_data: self.set_data,
        })
    }
}

// ---------------------------------------------------------------------------
// LayoutEngine
// ---------------------------------------------------------------------------

/// The classification entry point.
///
/// Holds the configuration, the injected collaborators, and the per-key
/// lookup memo shared by batch workers. Classification of one art file is
/// a pure, synchronous computation whose only suspension point is the card
/// record lookup.
pub struct LayoutEngine {
    config: Config,
    lookup: MemoizedLookup,
    frames: Arc<dyn FrameResolver>,
    assets: Arc<dyn WatermarkAssetStore>,
    first_prints: Arc<dyn FirstPrintingLookup>,
    set_data: HashMap<String, SetData>,
}

impl LayoutEngine {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> LayoutEngineBuilder {
        LayoutEngineBuilder::default()
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn context(&self) -> ClassifyContext<'_> {
        ClassifyContext {
            config: &self.config,
            frames: self.frames.as_ref(),
            assets: self.assets.as_ref(),
            first_prints: self.first_prints.as_ref(),
            set_data: &self.set_data,
        }
    }

    // -- Classification ----------------------------------------------------

    /// Classify one art file, parsing its filename tags first.
    pub fn classify_file(&self, path: &Path) -> Result<CardLayout> {
        let descriptor = ArtFileDescriptor::from_path(path).map_err(|source| {
            LayoutError::TagParse {
                file: path.to_string_lossy().into_owned(),
                source,
            }
        })?;
        self.classify(descriptor)
    }

    /// Classify an already-parsed art file descriptor.
    pub fn classify(&self, descriptor: ArtFileDescriptor) -> Result<CardLayout> {
        let record = self
            .lookup
            .resolve(&descriptor)
            .ok_or_else(|| LayoutError::LookupFailed {
                name: descriptor.name.clone(),
            })?;
        self.classify_record(&record, descriptor)
    }

    /// Classify a record fetched elsewhere.
    ///
    /// Escape hatch for callers that already hold the card data; skips the
    /// lookup collaborator entirely.
    pub fn classify_record(
        &self,
        record: &RawCardRecord,
        descriptor: ArtFileDescriptor,
    ) -> Result<CardLayout> {
        let raw_tag = record.layout.clone().unwrap_or_default();
        let tag = classify::variant_tag(&raw_tag).ok_or_else(|| {
            LayoutError::UnsupportedLayout {
                layout: raw_tag.clone(),
                name: descriptor.name.clone(),
            }
        })?;
        let name = descriptor.name.clone();
        classify::build_layout(&self.context(), tag, record, descriptor).map_err(|reason| {
            LayoutError::ConstructionFailed {
                layout: raw_tag,
                name,
                reason,
            }
        })
    }

    // -- Batch classification ----------------------------------------------

    /// Classify a batch of art files on a fixed-size worker pool.
    ///
    /// Files are independent, so the batch is a parallel map; results come
    /// back in input order, one per file. A failed file reports its own
    /// error and never aborts the rest of the batch. Workers share the
    /// engine's lookup memo, so duplicate printings resolve upstream once.
    pub fn classify_batch(&self, files: &[PathBuf], workers: usize) -> Vec<Result<CardLayout>> {
        if files.is_empty() {
            return Vec::new();
        }
        let workers = workers.clamp(1, files.len());
        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel();
        let mut slots: Vec<Option<Result<CardLayout>>> = Vec::new();
        slots.resize_with(files.len(), || None);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let cursor = &cursor;
                scope.spawn(move || loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    if index >= files.len() {
                        break;
                    }
                    let result = self.classify_file(&files[index]);
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                });
            }
            drop(tx);
            for (index, result) in rx {
                slots[index] = Some(result);
            }
        });

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(LayoutError::Config(
                        "classification worker dropped a file".to_string(),
                    ))
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LayoutEngine(watermarks={:?}, collector={:?}, lang={}, sets={}, resolved={})",
            self.config.watermark_mode,
            self.config.collector_mode,
            self.config.language,
            self.set_data.len(),
            self.lookup.len(),
        )
    }
}
