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

//! Machine-readable form of a reporting pass.

use crate::stats::SpanSummary;
use serde::Serialize;

/// Summary of one region within a [`ReportSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    /// The region's name.
    pub region: String,
    /// The statistics computed from the region's samples.
    pub summary: SpanSummary,
}

/// All regions with recorded samples, in registration order, as pure data.
///
/// This is the JSON-facing counterpart of the text report: no baselines, no
/// deltas, just the current run's statistics for external tooling to diff
/// however it likes.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    /// One entry per region with a non-empty sample set.
    pub regions: Vec<RegionSummary>,
}

impl ReportSnapshot {
    /// Serializes the snapshot as a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
