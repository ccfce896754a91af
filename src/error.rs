pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Video link could not be turned into an embeddable player URL
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    #[error("Invalid URL {raw:?}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Watch URL has no `v` parameter: {0}")]
    MissingVideoParam(String),

    #[error("No video id found in {0:?}")]
    EmptyId(String),
}

/// A content pool could not produce an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Content pool is empty")]
    EmptyPool,

    /// Every item is permanently excluded, clearing the history cannot help
    #[error("No eligible item in a pool of {0} (all excluded)")]
    NoEligible(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid origin instant {value:?}: {reason}")]
    InvalidOrigin { value: String, reason: String },

    #[error("Origin instant {0} is in the future")]
    OriginInFuture(String),

    #[error("Interval `{0}` must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("Invalid page origin {0:?}")]
    InvalidPageOrigin(String),
}
