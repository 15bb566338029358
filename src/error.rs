use thiserror::Error;

/// Failures on the page's outer edges. None of these reach the user; callers
/// log them and fall back.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("window is not available")]
    NoWindow,

    #[error("element not mounted: {0}")]
    MissingElement(&'static str),

    #[error("supporter fetch failed: {0}")]
    Fetch(#[from] gloo_net::Error),

    #[error("supporter fetch returned status {0}")]
    FetchStatus(u16),

    #[error("local storage: {0}")]
    Storage(#[from] gloo_storage::errors::StorageError),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Why a submitted handle was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
    #[error("handle is empty")]
    Empty,

    #[error("Enter a valid X handle (letters, numbers, underscores)")]
    Invalid,
}
