use thiserror::Error;

/// Top-level error type for the forwarding pipeline.
///
/// None of these are fatal: every variant ends in a dropped message plus a
/// log line, never a crash visible to whoever feeds the stream.
#[derive(Error, Debug)]
pub enum ForwarderError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Timestamp error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transmission error: {0}")]
    Transmission(#[from] std::io::Error),
}
