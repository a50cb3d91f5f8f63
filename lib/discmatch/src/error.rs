use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscmatchError {
    #[error("Invalid local metadata: {0}")]
    InvalidLocalMetadata(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Ambiguous input: {0}")]
    AmbiguousInput(String),

    #[error("Operator input was interrupted")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DiscmatchError {
    /// Whether retrying later could succeed, as opposed to input that needs correcting.
    pub fn is_transient(&self) -> bool {
        matches!(self, DiscmatchError::CatalogUnavailable(_))
    }
}

impl From<reqwest::Error> for DiscmatchError {
    fn from(e: reqwest::Error) -> Self {
        DiscmatchError::CatalogUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for DiscmatchError {
    fn from(e: serde_json::Error) -> Self {
        DiscmatchError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for DiscmatchError {
    fn from(e: serde_yaml::Error) -> Self {
        DiscmatchError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiscmatchError>;
