use thiserror::Error;

/// Failures talking to the remote conversational model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model response contained no candidates")]
    NoCandidates,
}

/// Reasons a user turn is refused before it starts
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TurnError {
    #[error("A turn is already in progress")]
    Busy,

    #[error("Message is empty")]
    EmptyMessage,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(String),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
