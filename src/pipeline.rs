//! Pipeline assembly and execution.
//!
//! This module provides the pipeline abstraction that connects one source,
//! any number of filters and one sink, and then drives them with a
//! [`Pump`](crate::pump::Pump) while reporting the outcome as a `Result`.

use bytes::Bytes;

use crate::core::{Chunk, Error, Filter, Result, Sink, Source, BLOCK_SIZE};
use crate::filters::combinators::FilterChain;
use crate::pump::{Pump, PumpState};
use crate::sources::StringSource;

/// Configuration for pipeline execution
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Block size used by sources the pipeline builds itself
    pub block_size: usize,
    /// Maximum number of pulls before giving up, if any
    pub step_limit: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            step_limit: None,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration for values that can never make progress
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::config("block size must be greater than zero"));
        }
        if self.step_limit == Some(0) {
            return Err(Error::config("step limit must be greater than zero"));
        }
        Ok(())
    }
}

/// Totals from a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Chunks delivered to the sink
    pub chunks: usize,
    /// Bytes delivered to the sink
    pub bytes: usize,
    /// Pulls from the source, including empty rounds and the final one
    pub steps: usize,
}

/// A source feeding an ordered chain of filters.
///
/// Finish it with [`sink`](Pipeline::sink) to run.
pub struct Pipeline<S> {
    source: S,
    filters: FilterChain,
    config: PipelineConfig,
}

impl<S: Source> Pipeline<S> {
    /// Create a new pipeline with no filters
    pub fn new(source: S) -> Self {
        Self {
            source,
            filters: FilterChain::new(),
            config: PipelineConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the step limit
    pub fn step_limit(mut self, limit: usize) -> Self {
        self.config.step_limit = Some(limit);
        self
    }

    /// Append a filter; filters run in the order they are added
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters = self.filters.add_filter(filter);
        self
    }

    /// Run the pipeline into a sink.
    ///
    /// Succeeds when the source reaches end of stream without error. A
    /// source or filter error is returned as-is; a sink answering `false`
    /// becomes [`Error::SinkRefused`].
    pub fn sink<K: Sink>(self, sink: K) -> Result<Report> {
        self.run_with_sink(sink).map(|(report, _)| report)
    }

    /// Like [`sink`](Pipeline::sink), but hands the sink back on success
    pub fn run_with_sink<K: Sink>(self, sink: K) -> Result<(Report, K)> {
        let Pipeline {
            source,
            filters,
            config,
        } = self;
        config.validate()?;

        let mut failure = None;
        let source = Watch {
            source: Staged { source, filters },
            failure: &mut failure,
        };
        let mut pump = Pump::new(source, sink);

        let mut steps = 0;
        let state = loop {
            if let Some(limit) = config.step_limit {
                if steps >= limit {
                    tracing::debug!(limit, "pipeline step limit reached");
                    return Err(Error::StepLimit { limit });
                }
            }
            steps += 1;
            let state = pump.step();
            if state.is_done() {
                break state;
            }
        };

        let report = Report {
            chunks: pump.chunks(),
            bytes: pump.bytes(),
            steps,
        };
        let (_, sink) = pump.into_parts();

        match state {
            PumpState::DoneOk => {
                tracing::trace!(
                    chunks = report.chunks,
                    bytes = report.bytes,
                    "pipeline finished"
                );
                Ok((report, sink))
            }
            _ => Err(failure.unwrap_or(Error::SinkRefused)),
        }
    }
}

impl Pipeline<StringSource> {
    /// Create a pipeline over a fixed buffer, split using the configured
    /// block size
    pub fn from_bytes(data: impl Into<Bytes>, config: PipelineConfig) -> Result<Self> {
        let source = StringSource::with_block_size(data, config.block_size)?;
        Ok(Pipeline::new(source).config(config))
    }
}

/// The pipeline's source and filter chain as one source
struct Staged<S> {
    source: S,
    filters: FilterChain,
}

impl<S: Source> Source for Staged<S> {
    fn pull(&mut self) -> Chunk {
        let chunk = self.source.pull();
        if chunk.is_terminal() || self.filters.is_empty() {
            return chunk;
        }
        self.filters.filter(chunk)
    }
}

/// Remembers the first upstream error so the run can report it
struct Watch<'a, S> {
    source: S,
    failure: &'a mut Option<Error>,
}

impl<S: Source> Source for Watch<'_, S> {
    fn pull(&mut self) -> Chunk {
        let chunk = self.source.pull();
        if let Chunk::Error(e) = &chunk {
            if self.failure.is_none() {
                *self.failure = Some(e.clone());
            }
        }
        chunk
    }
}
