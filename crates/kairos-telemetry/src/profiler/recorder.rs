// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use kairos_core::Stopwatch;
use std::time::Duration;

/// Accumulates duration samples for one named region across one process run.
///
/// The recorder is a small start/stop state machine: the in-flight interval
/// is the `Option<Stopwatch>`, so "tracking" and "start time" cannot
/// disagree. Samples stay in insertion (chronological) order.
///
/// All operations are total: a `start` while tracking and a `stop` while idle
/// are no-ops, so mismatched calls from the host can never corrupt an
/// interval or produce a phantom sample.
#[derive(Debug)]
pub struct SpanRecorder {
    name: String,
    active: Option<Stopwatch>,
    samples: Vec<Duration>,
}

impl SpanRecorder {
    /// Creates an idle recorder for `name` with no samples.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: None,
            samples: Vec::new(),
        }
    }

    /// Returns the region name this recorder measures.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Begins an interval. No-op if one is already in flight.
    pub fn start(&mut self) {
        if self.active.is_none() {
            self.active = Some(Stopwatch::new());
        }
    }

    /// Ends the in-flight interval and records its duration as a sample.
    /// No-op if no interval is in flight.
    pub fn stop(&mut self) {
        if let Some(watch) = self.active.take() {
            if let Some(elapsed) = watch.elapsed() {
                self.samples.push(elapsed);
            }
        }
    }

    /// Records a duration measured elsewhere (e.g. a GPU timestamp query)
    /// as if it had been a start/stop interval.
    pub fn record(&mut self, sample: Duration) {
        self.samples.push(sample);
    }

    /// Whether an interval is currently in flight.
    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Read-only view of the accumulated samples, in insertion order.
    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_start_stop_records_one_sample() {
        let mut recorder = SpanRecorder::new("region");
        assert!(!recorder.is_tracking());

        recorder.start();
        assert!(recorder.is_tracking());
        thread::sleep(Duration::from_millis(5));
        recorder.stop();

        assert!(!recorder.is_tracking());
        assert_eq!(recorder.samples().len(), 1);
        assert!(recorder.samples()[0] >= Duration::from_millis(5));
    }

    #[test]
    fn test_double_start_keeps_first_interval() {
        let mut recorder = SpanRecorder::new("region");
        recorder.start();
        thread::sleep(Duration::from_millis(10));
        // A nested start must not reset the running interval.
        recorder.start();
        recorder.stop();

        assert_eq!(recorder.samples().len(), 1);
        assert!(recorder.samples()[0] >= Duration::from_millis(10));
    }

    #[test]
    fn test_stop_without_start_is_a_no_op() {
        let mut recorder = SpanRecorder::new("region");
        recorder.stop();
        assert!(recorder.samples().is_empty());

        // Stop twice after one interval: exactly one sample.
        recorder.start();
        recorder.stop();
        recorder.stop();
        assert_eq!(recorder.samples().len(), 1);
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut recorder = SpanRecorder::new("region");
        recorder.record(Duration::from_millis(30));
        recorder.record(Duration::from_millis(10));
        assert_eq!(
            recorder.samples(),
            &[Duration::from_millis(30), Duration::from_millis(10)]
        );
    }
}
