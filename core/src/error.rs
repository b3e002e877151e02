use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot load config from '{path}': {reason}")]
    Config { path: String, reason: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type CartResult<T> = Result<T, CartError>;
