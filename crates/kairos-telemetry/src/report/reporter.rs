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

//! The per-region summarize-compare-persist-print sequence.

use crate::baseline::store::BaselineStore;
use crate::report::format::{format_sig, DisplayUnit};
use crate::stats::summarize;
use kairos_core::profiling::{BaselineKey, ProfileResult};
use std::io::Write;
use std::time::Duration;

/// Significant digits used for every numeric value in the report.
const REPORT_SIG_DIGITS: u32 = 4;

/// Writes one region's comparison block against the baseline store.
///
/// The reporter borrows the store for the duration of a reporting pass. It
/// always *reads* baselines so deltas can be shown, but only *writes* new
/// ones when constructed with persistence enabled; runs with persistence
/// off deliberately keep comparing against the last persisted run.
#[derive(Debug)]
pub struct RegressionReporter<'a> {
    store: &'a mut BaselineStore,
    persist: bool,
}

impl<'a> RegressionReporter<'a> {
    /// Creates a reporter over an open store. `persist` gates baseline writes.
    pub fn new(store: &'a mut BaselineStore, persist: bool) -> Self {
        Self { store, persist }
    }

    /// Summarizes `samples`, prints the region block to `sink`, and (when
    /// persisting) writes the new baselines.
    ///
    /// Returns `Ok(false)` without emitting anything when `samples` is empty.
    /// Store and sink failures abort the pass; whatever was already written
    /// to the sink stays there.
    pub fn report_span(
        &mut self,
        sink: &mut dyn Write,
        region: &str,
        samples: &[Duration],
    ) -> ProfileResult<bool> {
        let Some(summary) = summarize(samples) else {
            return Ok(false);
        };
        let unit = DisplayUnit::for_worst(summary.worst);

        writeln!(sink, "---------- {region} ----------")?;

        for (label, current) in summary.labeled_metrics() {
            let key = BaselineKey::new(region, label);
            let current_ns = current.as_nanos() as u64;
            let value = format_sig(unit.scale(current), REPORT_SIG_DIGITS);

            match self.store.get(&key)? {
                Some(baseline_ns) => {
                    let (sign, delta) = percent_delta(current_ns, baseline_ns);
                    writeln!(
                        sink,
                        "{label}: {value} {unit} {sign}{delta}%",
                        delta = format_sig(delta, REPORT_SIG_DIGITS)
                    )?;
                }
                None => writeln!(sink, "{label}: {value} {unit}")?,
            }

            if self.persist {
                self.store.put(&key, current_ns)?;
            }
        }

        Ok(true)
    }
}

/// Computes the signed percentage delta of `current` against `baseline`.
///
/// A faster current value faces negative (improvement), a slower one faces
/// positive (regression). The two formulas are not mirror images: a halving
/// reads `-50%`, a doubling `+100%`.
fn percent_delta(current_ns: u64, baseline_ns: u64) -> (char, f64) {
    let current = current_ns as f64;
    let baseline = baseline_ns as f64;
    if current < baseline {
        ('-', (1.0 - current / baseline) * 100.0)
    } else {
        ('+', (current / baseline - 1.0) * 100.0)
    }
}
