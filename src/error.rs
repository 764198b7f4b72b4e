use thiserror::Error;

use crate::datatype::KindTag;

#[derive(Error, Debug)]
pub enum IdentifierError {
    #[error("Unrecognized kind {kind}: {detail}")]
    UnrecognizedKind { kind: KindTag, detail: String },
    #[error("Malformed identifier stream: {0}")]
    MalformedStream(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Detached {kind} entity: not stored in its world collection")]
    Detached { kind: KindTag },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IdentifierError>;

// Helper conversions
impl From<config::ConfigError> for IdentifierError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
