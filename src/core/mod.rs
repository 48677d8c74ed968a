//! Core traits and types for the chunkpump library.
//!
//! This module contains the chunk representation, the error type and the
//! three contracts that every pipeline stage implements.

pub mod chunk;
pub mod error;
pub mod traits;

// Re-export core items
pub use chunk::{Chunk, BLOCK_SIZE};
pub use error::{Error, IntoError, Result};
pub use traits::{Filter, FilterExt, Sink, SinkExt, Source, SourceExt};
