///! Error types, one enum per pipeline stage

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a query, attributed to the stage that raised it
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching the body or parsing it as JSON failed
    #[error("Error downloading '{uri}'")]
    Download {
        uri: String,
        #[source]
        source: TransportError,
    },
    /// The response body itself declared an error; message is verbatim
    #[error("{0}")]
    Api(String),
    /// The parsed document did not map onto the expected result schema
    #[error("Error decoding result")]
    Decode(#[source] DecodeError),
}

/// Failure while fetching a response body over HTTP
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error {0}")]
    Status(reqwest::StatusCode),
    #[error("response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Failure while mapping a parsed JSON document into typed results
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Schema(#[from] serde_json::Error),
    /// The response metadata promised a different number of entries
    /// than its array actually holds
    #[error("declared count {declared} does not match {actual} decoded entries")]
    CountMismatch { declared: usize, actual: usize },
    #[error("epoch {0} is outside the representable time range")]
    EpochOutOfRange(i64),
}
