use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainsmithError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    Toml(String),

    #[error("Service '{service}' has no files to anchor a finding chain")]
    EmptyService { service: String },

    #[error("Service catalogue is empty")]
    EmptyCatalog,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChainsmithError>;
