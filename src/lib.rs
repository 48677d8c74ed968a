//! # Composable chunk pipelines for Rust
//!
//! This crate provides a small, synchronous composition algebra for moving
//! chunks of bytes from a producer to a consumer, transforming them on the
//! way, without committing to any particular I/O framework.
//!
//! ## Core Concepts
//!
//! - **Source**: Produces one chunk per call, then end of stream
//! - **Filter**: Transforms one chunk into another, possibly keeping private state
//! - **Sink**: Consumes chunks and says whether to keep going
//! - **Pump**: Drives a source into a sink, one step or to completion
//!
//! A [`Chunk`](core::Chunk) is always exactly one of: data, empty (nothing
//! this round), end of stream, or an error. The first end of stream or error
//! seen at any stage ends that round for every later stage.
//!
//! ## Example
//!
//! ```rust
//! use bytes::Bytes;
//! use chunkpump::prelude::*;
//!
//! let upper = filter_fn(|b: Bytes| Chunk::data(b.to_ascii_uppercase()));
//! let mut source = StringSource::with_block_size("hello world", 4)?.chain(upper);
//! let mut sink = CollectSink::new();
//!
//! assert!(pump::drain(&mut source, &mut sink));
//! assert_eq!(&sink.concat()[..], b"HELLO WORLD");
//! # Ok::<(), chunkpump::Error>(())
//! ```

pub mod core;
pub mod filters;
pub mod pipeline;
pub mod pump;
pub mod sinks;
pub mod sources;
pub mod util;

// Re-export commonly used items
pub mod prelude {
    pub use crate::core::{
        Chunk, Error, Filter, FilterExt, Result, Sink, SinkExt, Source, SourceExt, BLOCK_SIZE,
    };
    pub use crate::filters::combinators::{ChainTwo, FilterChain};
    pub use crate::filters::{filter_fn, try_filter_fn, Cycle, IdentityFilter};
    pub use crate::pipeline::{Pipeline, PipelineConfig, Report};
    pub use crate::pump::{self, Pump, PumpState};
    pub use crate::sinks::combinators::FilteredSink;
    pub use crate::sinks::{sink_fn, CollectSink, ErrorSink, NullSink, WriterSink};
    pub use crate::sources::combinators::{CatSource, ChainSource, RewindSource};
    pub use crate::sources::{source_fn, EmptySource, ErrorSource, ReaderSource, StringSource};
    pub use crate::util::{SourceIter, SourceStream};
}

// Re-export main error type
pub use crate::core::{Error, Result};

#[cfg(feature = "metrics")]
pub mod metrics;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
