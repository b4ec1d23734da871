//! Watermark selection policy.
//!
//! A four-mode policy evaluated once per face. Key resolution special-cases
//! two sentinel values: `set` maps to the watermark keyed by the card's
//! first-printing set code, `symbol` to the current set code; anything else
//! is a direct key lookup against the asset store.

use crate::config::WatermarkMode;
use crate::lookup::{FirstPrintingLookup, WatermarkAssetStore};
use crate::models::WatermarkSelection;

/// Per-card watermark resolver, borrowing the engine's collaborators.
pub struct WatermarkResolver<'a> {
    pub mode: WatermarkMode,
    /// Default key used by the `Forced` and `Fallback` modes.
    pub default_key: &'a str,
    /// Set code of the printing being classified.
    pub set_code: &'a str,
    /// Oracle id used to resolve the `set` sentinel's first printing.
    pub oracle_id: &'a str,
    pub assets: &'a dyn WatermarkAssetStore,
    pub first_prints: &'a dyn FirstPrintingLookup,
}

impl WatermarkResolver<'_> {
    /// Apply the policy to one face's raw watermark value.
    pub fn resolve(&self, raw: Option<&str>) -> WatermarkSelection {
        let raw_name = raw.map(str::to_string);
        match self.mode {
            WatermarkMode::Disabled => WatermarkSelection::none(raw_name),
            WatermarkMode::Forced => self.find(self.default_key, raw_name),
            WatermarkMode::Automatic => match raw {
                Some(key) => self.find(key, raw_name),
                None => WatermarkSelection::none(raw_name),
            },
            WatermarkMode::Fallback => {
                if let Some(key) = raw {
                    let selection = self.find(key, raw_name.clone());
                    if selection.asset.is_some() {
                        return selection;
                    }
                }
                self.find(self.default_key, raw_name)
            }
        }
    }

    /// Resolve one key against the asset store, applying sentinel
    /// substitution. The substituted key is recorded even when no asset
    /// is found.
    fn find(&self, key: &str, raw_name: Option<String>) -> WatermarkSelection {
        let key = key.to_lowercase();
        if key.is_empty() {
            return WatermarkSelection::none(raw_name);
        }

        let (resolved_key, asset) = match key.as_str() {
            "set" => {
                let set = self.first_print_set();
                let asset = self.assets.find_for_set(&set);
                (set, asset)
            }
            "symbol" => (
                self.set_code.to_lowercase(),
                self.assets.find_for_set(self.set_code),
            ),
            _ => {
                let asset = self.assets.find(&key);
                (key, asset)
            }
        };

        WatermarkSelection {
            raw_name,
            resolved_key: Some(resolved_key),
            asset,
        }
    }

    /// Set code of the card's first printing, falling back to the current
    /// set when the lookup finds nothing.
    fn first_print_set(&self) -> String {
        self.first_prints
            .first_print(self.oracle_id)
            .and_then(|record| record.set)
            .unwrap_or_else(|| self.set_code.to_string())
            .to_lowercase()
    }
}
