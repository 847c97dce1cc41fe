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

//! Registry of named spans and the reporting entry point.

use crate::baseline::store::{BaselineStore, DEFAULT_STORE_PATH};
use crate::profiler::recorder::SpanRecorder;
use crate::profiler::scope::ScopedSpan;
use crate::report::reporter::RegressionReporter;
use crate::report::snapshot::{RegionSummary, ReportSnapshot};
use crate::stats::summarize;
use kairos_core::profiling::{ProfileError, ProfileResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// Default file name of the report log, relative to the working directory of
/// the host process.
pub const DEFAULT_LOG_PATH: &str = "kairos_profiler.log";

/// The recorder map plus the registration order used for reporting.
#[derive(Debug, Default)]
struct SpanTable {
    spans: HashMap<String, Arc<Mutex<SpanRecorder>>>,
    order: Vec<String>,
}

/// Named collection of [`SpanRecorder`]s and the single entry point hosts
/// call to time regions and trigger the final reporting pass.
///
/// The registry is an explicit value owned by the host's composition root;
/// there is no global instance, which is what makes a fresh registry per
/// test (and per tool invocation) possible.
///
/// Concurrency contract: different regions may be timed from different
/// threads; first-use registration synchronizes on the table's write lock.
/// Interleaving `start`/`stop` for the *same* region from multiple threads
/// is not supported. The per-recorder mutex keeps it memory-safe, but
/// intervals may be discarded as no-ops.
#[derive(Debug)]
pub struct Profiler {
    table: RwLock<SpanTable>,
    persist: AtomicBool,
    store_path: PathBuf,
    log_path: PathBuf,
}

impl Profiler {
    /// Creates an empty registry using the default baseline-store and report
    /// log paths ([`DEFAULT_STORE_PATH`], [`DEFAULT_LOG_PATH`]).
    pub fn new() -> Self {
        Self::with_paths(DEFAULT_STORE_PATH, DEFAULT_LOG_PATH)
    }

    /// Creates an empty registry with explicit store and log paths.
    pub fn with_paths(store_path: impl AsRef<Path>, log_path: impl AsRef<Path>) -> Self {
        Self {
            table: RwLock::new(SpanTable::default()),
            persist: AtomicBool::new(false),
            store_path: store_path.as_ref().to_path_buf(),
            log_path: log_path.as_ref().to_path_buf(),
        }
    }

    /// Begins timing `name`, creating its recorder on first use.
    ///
    /// Never fails: instrumentation must not take the host down, so lock
    /// poisoning degrades to a dropped sample with a warning.
    pub fn start(&self, name: &str) {
        let Some(recorder) = self.recorder_or_insert(name) else {
            return;
        };
        match recorder.lock() {
            Ok(mut guard) => guard.start(),
            Err(_) => log::warn!("span '{name}' recorder poisoned; start dropped"),
        };
    }

    /// Ends timing `name`. No-op for an unknown name or an idle recorder.
    pub fn stop(&self, name: &str) {
        let Some(recorder) = self.recorder(name) else {
            return;
        };
        match recorder.lock() {
            Ok(mut guard) => guard.stop(),
            Err(_) => log::warn!("span '{name}' recorder poisoned; stop dropped"),
        };
    }

    /// Records a duration measured elsewhere under `name`, creating the
    /// recorder on first use.
    pub fn record_duration(&self, name: &str, sample: Duration) {
        let Some(recorder) = self.recorder_or_insert(name) else {
            return;
        };
        match recorder.lock() {
            Ok(mut guard) => guard.record(sample),
            Err(_) => log::warn!("span '{name}' recorder poisoned; sample dropped"),
        };
    }

    /// Starts timing `name` and returns a guard that stops it on drop.
    pub fn scope(&self, name: impl Into<String>) -> ScopedSpan<'_> {
        ScopedSpan::enter(self, name)
    }

    /// Enables baseline persistence for subsequent reporting passes.
    ///
    /// Reads are unaffected: passes always compare against whatever the
    /// last *persisted* run left in the store. Calling this after a pass has
    /// completed does not retroactively write that pass's values.
    pub fn enable_persistence(&self) {
        self.persist.store(true, Ordering::Relaxed);
    }

    /// Whether baseline writes are enabled.
    pub fn persistence_enabled(&self) -> bool {
        self.persist.load(Ordering::Relaxed)
    }

    /// Number of registered spans (with or without samples).
    pub fn span_count(&self) -> usize {
        match self.table.read() {
            Ok(table) => table.spans.len(),
            Err(_) => 0,
        }
    }

    /// Runs the full reporting pass into the fixed-name log file.
    ///
    /// Opens the baseline store, reports every span with samples in
    /// registration order, then closes the store and flushes the log. The
    /// log is flushed even when a region fails mid-pass, so partial output
    /// is durable and nothing leaks into other output streams.
    pub fn log_all(&self) -> ProfileResult<()> {
        let file = File::create(&self.log_path).map_err(ProfileError::Sink)?;
        let mut sink = BufWriter::new(file);

        let result = self.write_report(&mut sink);
        let flushed = sink.flush().map_err(ProfileError::from);

        if let Err(err) = &result {
            log::error!("profiler reporting pass aborted: {err}");
        }
        result.and(flushed)
    }

    /// Runs the reporting pass into an arbitrary sink.
    ///
    /// The baseline store is opened at the start of the pass and dropped
    /// (closed) at the end, whether the pass succeeds or aborts.
    pub fn write_report(&self, sink: &mut dyn Write) -> ProfileResult<()> {
        let mut store = BaselineStore::open(&self.store_path)?;
        let mut reporter = RegressionReporter::new(&mut store, self.persistence_enabled());

        for (name, recorder) in self.spans_in_order() {
            let samples = match recorder.lock() {
                Ok(guard) => guard.samples().to_vec(),
                Err(_) => {
                    log::warn!("span '{name}' recorder poisoned; omitted from report");
                    continue;
                }
            };
            reporter.report_span(sink, &name, &samples)?;
        }
        Ok(())
    }

    /// Returns the current run's statistics for every span with samples, in
    /// registration order, as pure data for external tooling.
    pub fn snapshot(&self) -> ReportSnapshot {
        let mut regions = Vec::new();
        for (name, recorder) in self.spans_in_order() {
            let Ok(guard) = recorder.lock() else {
                continue;
            };
            if let Some(summary) = summarize(guard.samples()) {
                regions.push(RegionSummary {
                    region: name,
                    summary,
                });
            }
        }
        ReportSnapshot { regions }
    }

    /// Looks up an existing recorder without registering anything.
    fn recorder(&self, name: &str) -> Option<Arc<Mutex<SpanRecorder>>> {
        self.table.read().ok()?.spans.get(name).cloned()
    }

    /// Looks up a recorder, registering it on first use.
    ///
    /// The fast path is a shared read lock; only a genuinely new name takes
    /// the write lock, so concurrent first use of the same name races to a
    /// single insertion.
    fn recorder_or_insert(&self, name: &str) -> Option<Arc<Mutex<SpanRecorder>>> {
        if let Some(existing) = self.recorder(name) {
            return Some(existing);
        }

        let mut table = match self.table.write() {
            Ok(table) => table,
            Err(_) => {
                log::warn!("span table poisoned; '{name}' not registered");
                return None;
            }
        };
        if !table.spans.contains_key(name) {
            log::debug!("registered profiling span '{name}'");
            table.order.push(name.to_string());
            table.spans.insert(
                name.to_string(),
                Arc::new(Mutex::new(SpanRecorder::new(name))),
            );
        }
        table.spans.get(name).cloned()
    }

    /// Snapshot of the recorders in registration order.
    fn spans_in_order(&self) -> Vec<(String, Arc<Mutex<SpanRecorder>>)> {
        match self.table.read() {
            Ok(table) => table
                .order
                .iter()
                .filter_map(|name| {
                    table
                        .spans
                        .get(name)
                        .map(|recorder| (name.clone(), recorder.clone()))
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
