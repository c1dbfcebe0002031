use thiserror::Error;

#[derive(Error, Debug)]
pub enum TarjomanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid translation direction: {0}")]
    InvalidDirection(String),

    #[error("Could not connect to translation server: {0}")]
    RemoteUnavailable(String),

    #[error("Translation server rejected the request: {0}")]
    RemoteRejected(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Speech playback error: {0}")]
    Speech(String),
}

pub type Result<T> = std::result::Result<T, TarjomanError>;
