use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("Invalid dose '{0}'. Enter a positive number of mg")]
    InvalidDoseAmount(String),

    #[error("Invalid time '{0}'. Use HH:MM (24h)")]
    InvalidTimeFormat(String),

    #[error("Invalid effect profile: {0}")]
    InvalidProfile(String),

    #[error("Day '{0}' not found in store")]
    DayNotFound(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse JSON from '{0}': {1}")]
    JsonParsing(String, #[source] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
