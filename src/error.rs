use thiserror::Error;

#[derive(Error, Debug)]
pub enum PianoError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Configuration: {0}")]
    InvalidConfiguration(String),
}

pub type PkResult<T> = Result<T, PianoError>;
