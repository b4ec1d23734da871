pub mod card;
pub mod frame;

pub use card::{normalize_name, CardFace, RawCardRecord, SetData};
pub use frame::{
    ordered_colors, AssetRef, CollectorInfo, FrameDetails, PowerToughness, WatermarkSelection,
};
