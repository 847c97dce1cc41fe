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

//! # Kairos Telemetry
//!
//! Runtime performance instrumentation: times named code regions ("spans")
//! across repeated executions, reduces the samples of each region to summary
//! statistics, and compares them against the baselines persisted by the
//! previous run, surfacing regressions and improvements as signed percentage
//! deltas.
//!
//! The [`Profiler`] registry is the single entry point hosts interact with:
//!
//! ```no_run
//! use kairos_telemetry::Profiler;
//!
//! let profiler = Profiler::new();
//! {
//!     let _span = profiler.scope("Game Constructor");
//!     // ... the code being measured ...
//! }
//! profiler.log_all().expect("reporting pass failed");
//! ```

#![warn(missing_docs)]

pub mod baseline;
pub mod logging;
pub mod profiler;
pub mod report;
pub mod stats;

pub use baseline::store::{BaselineStore, DEFAULT_STORE_PATH};
pub use profiler::registry::{Profiler, DEFAULT_LOG_PATH};
pub use profiler::recorder::SpanRecorder;
pub use profiler::scope::ScopedSpan;
pub use report::reporter::RegressionReporter;
pub use report::snapshot::{RegionSummary, ReportSnapshot};
pub use stats::{summarize, SpanSummary, TAIL_SAMPLE_THRESHOLD};
