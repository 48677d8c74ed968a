//! Error types for the chunk pipeline.

use std::sync::Arc;
use thiserror::Error;

/// The main error type carried by error chunks and returned by pipeline runs.
///
/// Payloads are shared behind `Arc` so an error can ride along a [`Chunk`]
/// and still be cloned cheaply.
///
/// [`Chunk`]: crate::core::Chunk
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A source failed to produce a chunk
    #[error("Source error: {0}")]
    Source(Arc<dyn std::error::Error + Send + Sync>),

    /// A filter failed to transform a chunk
    #[error("Filter error: {0}")]
    Filter(Arc<dyn std::error::Error + Send + Sync>),

    /// A sink failed to consume a chunk
    #[error("Sink error: {0}")]
    Sink(Arc<dyn std::error::Error + Send + Sync>),

    /// Invalid construction parameters
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The sink returned `false` for a delivered chunk
    #[error("Sink refused chunk")]
    SinkRefused,

    /// The pipeline hit its configured step limit before end of stream
    #[error("Step limit of {limit} reached before end of stream")]
    StepLimit { limit: usize },

    /// A custom error with a message
    #[error("{0}")]
    Custom(String),
}

// Convenience constructors
impl Error {
    /// Create a source error from any error type
    pub fn source<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Source(Arc::new(error))
    }

    /// Create a filter error from any error type
    pub fn filter<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Filter(Arc::new(error))
    }

    /// Create a sink error from any error type
    pub fn sink<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Sink(Arc::new(error))
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom(message.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Custom(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Custom(s.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Helper trait for converting foreign errors into our Error type
pub trait IntoError<T> {
    fn into_source_error(self) -> Result<T>;
    fn into_filter_error(self) -> Result<T>;
    fn into_sink_error(self) -> Result<T>;
}

impl<T, E> IntoError<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_source_error(self) -> Result<T> {
        self.map_err(Error::source)
    }

    fn into_filter_error(self) -> Result<T> {
        self.map_err(Error::filter)
    }

    fn into_sink_error(self) -> Result<T> {
        self.map_err(Error::sink)
    }
}
