use crate::filename::TagParseError;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("malformed filename '{file}': {source}")]
    TagParse {
        file: String,
        #[source]
        source: TagParseError,
    },

    #[error("no card match found for '{name}'")]
    LookupFailed { name: String },

    #[error("unsupported layout '{layout}' for '{name}'")]
    UnsupportedLayout { layout: String, name: String },

    #[error("failed to build '{layout}' layout for '{name}': {reason}")]
    ConstructionFailed {
        layout: String,
        name: String,
        reason: String,
    },

    #[error("{count} split halves share the collector key '{key}'")]
    MergeAmbiguity { key: String, count: usize },

    #[error("invalid engine configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
