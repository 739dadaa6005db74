use thiserror::Error;

/// Hard failures only. The engine's routine "no signal" outcomes are modeled
/// as `types::Verdict::NoSignal`, never as a variant here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed candle for {pair}: {detail}")]
    MalformedCandle { pair: String, detail: String },

    #[error("Unknown trading pair: {0}")]
    UnknownPair(String),

    #[error("Candle provider error: {0}")]
    Provider(String),

    #[error("Signal delivery error: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
