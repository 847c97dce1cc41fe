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

//! Structured identifiers for persisted baseline values.

use serde::Serialize;
use std::fmt::Display;

/// The summary metrics a reporting pass produces for one span.
///
/// The display form of each label is what appears both in the report log and
/// as the label half of a [`BaselineKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricLabel {
    /// Arithmetic mean of all samples.
    Average,
    /// Central sample (odd count) or mean of the two central samples (even count).
    Median,
    /// Largest sample.
    Worst,
    /// Smallest sample.
    Best,
    /// Sample at the 95th-percentile index. Only reported for large sample sets.
    Worst5,
    /// Sample at the 5th-percentile index. Only reported for large sample sets.
    Best5,
}

impl MetricLabel {
    /// All labels, in the order a reporting pass prints them.
    pub const REPORT_ORDER: [MetricLabel; 6] = [
        MetricLabel::Average,
        MetricLabel::Median,
        MetricLabel::Worst,
        MetricLabel::Best,
        MetricLabel::Worst5,
        MetricLabel::Best5,
    ];

    /// Returns the label text used in reports and baseline keys.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricLabel::Average => "Average",
            MetricLabel::Median => "Median",
            MetricLabel::Worst => "Worst",
            MetricLabel::Best => "Best",
            MetricLabel::Worst5 => "Worst5%",
            MetricLabel::Best5 => "Best5%",
        }
    }

    /// Whether this label belongs to the 5% tail pair that is only reported
    /// once a span has enough samples to make it meaningful.
    pub const fn is_tail(&self) -> bool {
        matches!(self, MetricLabel::Worst5 | MetricLabel::Best5)
    }
}

impl Display for MetricLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unique, structured identifier for one persisted baseline value.
///
/// A baseline is keyed by the span's region name together with the metric
/// label. Keeping the two halves separate (rather than concatenating them
/// into one string) makes collisions between different region/label pairs
/// unrepresentable, whatever characters a region name contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaselineKey {
    /// The named code region the value was measured for.
    pub region: String,
    /// The summary metric the value belongs to.
    pub label: MetricLabel,
}

impl BaselineKey {
    /// Creates a new key for a region/metric pair.
    pub fn new(region: impl Into<String>, label: MetricLabel) -> Self {
        Self {
            region: region.into(),
            label,
        }
    }

    /// Returns a formatted representation for diagnostics (e.g. `"Frame/Average"`).
    ///
    /// Storage never uses this form; it keeps the halves as separate columns.
    pub fn to_string_formatted(&self) -> String {
        format!("{}/{}", self.region, self.label)
    }
}

impl Display for BaselineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_formatted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_text() {
        assert_eq!(MetricLabel::Average.as_str(), "Average");
        assert_eq!(MetricLabel::Worst5.as_str(), "Worst5%");
        assert_eq!(MetricLabel::Best5.as_str(), "Best5%");
    }

    #[test]
    fn test_report_order() {
        // The tail pair comes last so short sample sets can simply stop early.
        assert_eq!(MetricLabel::REPORT_ORDER[0], MetricLabel::Average);
        assert_eq!(MetricLabel::REPORT_ORDER[3], MetricLabel::Best);
        assert!(MetricLabel::REPORT_ORDER[4].is_tail());
        assert!(MetricLabel::REPORT_ORDER[5].is_tail());
    }

    #[test]
    fn test_key_structure_avoids_collisions() {
        // "AB" + "Worst" and "A" + "BWorst" would collide as concatenated
        // strings; as structured keys they stay distinct.
        let a = BaselineKey::new("Frame", MetricLabel::Worst);
        let b = BaselineKey::new("FrameWorst", MetricLabel::Average);
        assert_ne!(a, b);

        let c = BaselineKey::new("Frame", MetricLabel::Worst);
        assert_eq!(a, c);
    }

    #[test]
    fn test_key_formatting() {
        let key = BaselineKey::new("Game Constructor", MetricLabel::Median);
        assert_eq!(key.to_string_formatted(), "Game Constructor/Median");
    }
}
