use thiserror::Error;

/// Why a single coin's market chart could not be retrieved. Always recovered per coin.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {source}")]
    NetworkError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status}")]
    StatusError { status: u16 },

    #[error("Malformed market chart payload: {0}")]
    MalformedPayload(String),

    #[error("Market chart contained no prices")]
    EmptySeries,
}

/// Missing or unusable interactive input. Terminal for the run.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("No coin identifiers were given")]
    MissingCoins,

    #[error("No day count was given")]
    MissingDays,

    #[error("Day count must be positive, got {0}")]
    NonPositiveDays(i64),

    #[error("Input could not be read: {0}")]
    ReadError(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Fetch error: {source}")]
    FetchError {
        #[from]
        source: FetchError,
    },

    #[error("Invalid input: {source}")]
    InputError {
        #[from]
        source: InputError,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Indicator calculation error: {0}")]
    IndicatorError(String),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),
}
