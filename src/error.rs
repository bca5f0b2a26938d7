use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode config: {0}")]
    ConfigEncode(#[from] serde_json::Error),

    #[error("invalid log filter {filter:?}: {source}")]
    LogFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;
