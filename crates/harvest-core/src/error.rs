use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Unknown parser module: {0}")]
    UnknownParser(String),

    #[error("Parser {module} failed to initialise: {reason}")]
    ParserInit { module: String, reason: String },

    #[error("Parser {module} failed to extract: {reason}")]
    Extraction { module: String, reason: String },

    #[error("Parser {module} panicked")]
    ParserPanic { module: String },

    #[error("Fact pool lock poisoned")]
    PoolPoisoned,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
