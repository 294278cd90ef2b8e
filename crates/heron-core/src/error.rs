use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(
        "Error rate too high: {rate_percent:.2}% ({unmatched} of {total} lines unmatched), which exceeds the threshold of 50%"
    )]
    ParseQuality {
        unmatched: usize,
        total: usize,
        rate_percent: f64,
    },

    #[error("Invalid report template: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, Error>;
