use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpectatorError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SpectatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for SpectatorError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<reqwest::Error> for SpectatorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<std::io::Error> for SpectatorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
