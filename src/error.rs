use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcorouteError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EcorouteError>;
