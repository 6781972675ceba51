//! Error types for the benchmark pipeline

use thiserror::Error;

/// Errors raised while profiling the host or benchmarking the inference server.
///
/// Everything except a failed submission is fatal to the run: callers
/// propagate these to the top level and abandon the partial report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// The model was not resident and the pull did not report success.
    #[error("failed to pull model {model} (status: {status})")]
    Provisioning { model: String, status: String },

    /// The HTTP request could not be sent or its body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("{url} returned HTTP {status}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected schema.
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// Unsupported platform or invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The host inspection collaborator failed.
    #[error("host query failed: {0}")]
    HostQuery(String),
}

impl BenchError {
    /// True for failures that happened on the wire or at the response boundary.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BenchError::Transport(_)
                | BenchError::HttpStatus { .. }
                | BenchError::MalformedResponse { .. }
        )
    }
}

pub type BenchResult<T> = Result<T, BenchError>;
