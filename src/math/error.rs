// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Settings file could not be accessed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GridError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GridError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type GridResult<T> = Result<T, GridError>;
