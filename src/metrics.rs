//! Pump counters reported through the `metrics` facade.
//!
//! Install any `metrics` recorder to collect them.

use metrics::counter;

use crate::pump::PumpState;

/// Chunks accepted by a sink
pub const CHUNKS_TOTAL: &str = "chunkpump_chunks_total";
/// Bytes accepted by a sink
pub const BYTES_TOTAL: &str = "chunkpump_bytes_total";
/// Finished pump runs, labelled by outcome
pub const RUNS_TOTAL: &str = "chunkpump_runs_total";

pub(crate) fn record_chunk(len: usize) {
    counter!(CHUNKS_TOTAL).increment(1);
    counter!(BYTES_TOTAL).increment(len as u64);
}

pub(crate) fn record_outcome(state: PumpState) {
    let outcome = match state {
        PumpState::DoneOk => "ok",
        PumpState::DoneFail => "fail",
        PumpState::Running => return,
    };
    counter!(RUNS_TOTAL, "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{CollectSink, ErrorSink};
    use crate::sources::StringSource;
    use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    /// Keeps every counter in memory, keyed by name and labels.
    #[derive(Default)]
    struct CountingRecorder {
        counters: Mutex<HashMap<String, Arc<AtomicU64>>>,
    }

    impl CountingRecorder {
        fn value(&self, key: &str) -> u64 {
            let counters = self.counters.lock().unwrap();
            counters.get(key).map_or(0, |c| c.load(Ordering::Relaxed))
        }
    }

    fn render(key: &Key) -> String {
        let labels: Vec<String> = key
            .labels()
            .map(|l| format!("{}={}", l.key(), l.value()))
            .collect();
        if labels.is_empty() {
            key.name().to_string()
        } else {
            format!("{}{{{}}}", key.name(), labels.join(","))
        }
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let mut counters = self.counters.lock().unwrap();
            let counter = counters.entry(render(key)).or_default().clone();
            Counter::from_arc(counter)
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[test]
    fn test_drain_counts_chunks_and_outcome() {
        let recorder = CountingRecorder::default();
        let ok = metrics::with_local_recorder(&recorder, || {
            let mut source = StringSource::with_block_size("abcde", 2).unwrap();
            crate::pump::drain(&mut source, &mut CollectSink::new())
        });

        assert!(ok);
        assert_eq!(recorder.value(CHUNKS_TOTAL), 3);
        assert_eq!(recorder.value(BYTES_TOTAL), 5);
        assert_eq!(recorder.value("chunkpump_runs_total{outcome=ok}"), 1);
        assert_eq!(recorder.value("chunkpump_runs_total{outcome=fail}"), 0);
    }

    #[test]
    fn test_refused_run_counts_as_failure() {
        let recorder = CountingRecorder::default();
        metrics::with_local_recorder(&recorder, || {
            crate::pump::drain(&mut StringSource::new("x"), &mut ErrorSink::new())
        });

        assert_eq!(recorder.value(CHUNKS_TOTAL), 0);
        assert_eq!(recorder.value("chunkpump_runs_total{outcome=fail}"), 1);
    }
}
