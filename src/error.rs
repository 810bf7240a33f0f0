use thiserror::Error;

/// Errors from turning strokes into CSV and back
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("no strokes with points to export")]
    NothingToExport,

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

/// Errors from the exchange with the auto-correct service
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("service answered with HTTP {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response: {0}")]
    Io(#[from] std::io::Error),

    #[error("response is not a stroke table: {0}")]
    UnexpectedBody(String),

    #[error("response exceeds {0} bytes")]
    TooLarge(u64),
}

impl From<ureq::Error> for TransportError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, _) => TransportError::Status(code),
            ureq::Error::Transport(transport) => TransportError::Request(transport.to_string()),
        }
    }
}

/// Errors that end one encode/upload/decode cycle
#[derive(Debug, Error)]
pub enum RoundTripError {
    /// Nothing on the canvas; no request was made
    #[error("nothing to send")]
    Nothing,

    #[error("an auto-correct request is already running")]
    Busy,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Codec(CodecError),

    #[error("worker thread ended without a result")]
    WorkerGone,
}

impl From<CodecError> for RoundTripError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::NothingToExport => RoundTripError::Nothing,
            other => RoundTripError::Codec(other),
        }
    }
}

/// Errors while loading [`crate::AppConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
