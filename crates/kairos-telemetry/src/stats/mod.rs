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

//! Pure statistical reduction of span samples.

use kairos_core::profiling::MetricLabel;
use serde::Serialize;
use std::time::Duration;

/// Minimum number of samples before the 5% tail metrics are reported.
///
/// Below this the 95th/5th-percentile indices land on or next to the extremes
/// and carry no information beyond `worst`/`best`.
pub const TAIL_SAMPLE_THRESHOLD: usize = 40;

/// Summary statistics for one span's sample set within a single run.
#[derive(Debug, Clone, Serialize)]
pub struct SpanSummary {
    /// Number of samples the summary was computed from.
    pub sample_count: usize,
    /// Arithmetic mean.
    pub average: Duration,
    /// Central sample, or the mean of the two central samples for even counts.
    pub median: Duration,
    /// Largest sample.
    pub worst: Duration,
    /// Smallest sample.
    pub best: Duration,
    /// Sample at index `floor(0.95 * n)` of the ascending sort.
    pub worst_5pct: Duration,
    /// Sample at index `floor(0.05 * n)` of the ascending sort.
    pub best_5pct: Duration,
    /// Whether the tail pair is statistically meaningful for this set.
    pub include_tail: bool,
}

impl SpanSummary {
    /// Returns the value of a single metric of this summary.
    pub fn value(&self, label: MetricLabel) -> Duration {
        match label {
            MetricLabel::Average => self.average,
            MetricLabel::Median => self.median,
            MetricLabel::Worst => self.worst,
            MetricLabel::Best => self.best,
            MetricLabel::Worst5 => self.worst_5pct,
            MetricLabel::Best5 => self.best_5pct,
        }
    }

    /// Returns the metrics of this summary as `(label, value)` pairs in
    /// report order. The tail pair is present only when [`Self::include_tail`].
    pub fn labeled_metrics(&self) -> Vec<(MetricLabel, Duration)> {
        MetricLabel::REPORT_ORDER
            .iter()
            .copied()
            .filter(|label| self.include_tail || !label.is_tail())
            .map(|label| (label, self.value(label)))
            .collect()
    }
}

/// Reduces a sample set to its [`SpanSummary`].
///
/// Returns `None` for an empty set; callers skip such spans entirely rather
/// than reporting zeroes.
///
/// The sum accumulates in `u128` nanoseconds, so arbitrarily long runs
/// cannot overflow the average. Percentile indices use truncating
/// multiplication; the resulting boundary behavior (e.g. `floor(0.95 * 40)`
/// = index 38) is deliberate and matched by the reporting thresholds.
pub fn summarize(samples: &[Duration]) -> Option<SpanSummary> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2
    } else {
        sorted[n / 2]
    };

    let total_ns: u128 = sorted.iter().map(|d| d.as_nanos()).sum();
    let average = Duration::from_nanos((total_ns / n as u128) as u64);

    Some(SpanSummary {
        sample_count: n,
        average,
        median,
        worst: sorted[n - 1],
        best: sorted[0],
        worst_5pct: sorted[(0.95 * n as f64) as usize],
        best_5pct: sorted[(0.05 * n as f64) as usize],
        include_tail: n >= TAIL_SAMPLE_THRESHOLD,
    })
}
