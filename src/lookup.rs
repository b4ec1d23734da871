//! Collaborator interfaces consumed during classification.
//!
//! The engine never talks to a card database, frame logic, or asset
//! catalog directly; it consumes these traits. Implementations live in the
//! host application (network clients, local catalogs, test stubs).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::filename::ArtFileDescriptor;
use crate::models::{normalize_name, AssetRef, CardFace, FrameDetails, RawCardRecord};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Resolves an art file descriptor to the best-matching card printing.
///
/// Implementations must apply any record-level postprocessing needed to
/// synthesize layout tags the upstream database does not distinguish
/// natively (e.g. separating `planeswalker` and `station` from `normal`
/// based on field presence) before returning. Returning `None` means no
/// printing matched.
pub trait CardLookup: Send + Sync {
    fn resolve(&self, descriptor: &ArtFileDescriptor) -> Option<RawCardRecord>;
}

/// Computes the frame color identity of one card face.
pub trait FrameResolver: Send + Sync {
    fn resolve(&self, face: &CardFace) -> FrameDetails;
}

/// Locates watermark assets by key or by set code.
pub trait WatermarkAssetStore: Send + Sync {
    fn find(&self, key: &str) -> Option<AssetRef>;
    fn find_for_set(&self, set_code: &str) -> Option<AssetRef>;
}

/// Finds the first printing of a card by its oracle id.
pub trait FirstPrintingLookup: Send + Sync {
    fn first_print(&self, oracle_id: &str) -> Option<RawCardRecord>;
}

// ---------------------------------------------------------------------------
// Null implementations
// ---------------------------------------------------------------------------

/// Asset store with no assets; every watermark resolves to none.
pub struct NoWatermarkAssets;

impl WatermarkAssetStore for NoWatermarkAssets {
    fn find(&self, _key: &str) -> Option<AssetRef> {
        None
    }

    fn find_for_set(&self, _set_code: &str) -> Option<AssetRef> {
        None
    }
}

/// First-printing lookup that never finds one.
pub struct NoFirstPrints;

impl FirstPrintingLookup for NoFirstPrints {
    fn first_print(&self, _oracle_id: &str) -> Option<RawCardRecord> {
        None
    }
}

// ---------------------------------------------------------------------------
// MemoizedLookup
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Eq, Hash)]
struct LookupKey {
    name: String,
    set: Option<String>,
    number: Option<String>,
}

impl LookupKey {
    fn from_descriptor(descriptor: &ArtFileDescriptor) -> Self {
        Self {
            name: normalize_name(&descriptor.name),
            set: descriptor.set.as_deref().map(|s| s.to_lowercase()),
            number: descriptor.number.clone(),
        }
    }
}

/// Per-key single-flight memo over a shared [`CardLookup`].
///
/// Batch workers share one instance; concurrent requests for the same
/// `(name, set, number)` key block on a single upstream resolve instead of
/// issuing duplicate fetches, and later requests reuse the memoized record.
pub struct MemoizedLookup {
    inner: Arc<dyn CardLookup>,
    memo: Mutex<HashMap<LookupKey, Arc<OnceLock<Option<RawCardRecord>>>>>,
}

impl MemoizedLookup {
    pub fn new(inner: Arc<dyn CardLookup>) -> Self {
        Self {
            inner,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve through the memo, fetching at most once per key.
    pub fn resolve(&self, descriptor: &ArtFileDescriptor) -> Option<RawCardRecord> {
        let key = LookupKey::from_descriptor(descriptor);
        let cell = {
            let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
            memo.entry(key).or_default().clone()
        };
        // The map lock is released before fetching; OnceLock serializes
        // duplicate concurrent initializers behind the first fetch.
        cell.get_or_init(|| self.inner.resolve(descriptor)).clone()
    }

    /// Number of distinct keys resolved so far.
    pub fn len(&self) -> usize {
        self.memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
