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

//! Display scaling and numeric formatting for report output.

use std::fmt::Display;
use std::time::Duration;

/// The display unit chosen for one region in one reporting pass.
///
/// The unit is picked once per region from its worst sample, so every metric
/// line of that region scales the same way and stays comparable by eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUnit {
    suffix: &'static str,
    divisor_ns: u64,
}

impl DisplayUnit {
    /// Selects the unit for a region from its worst (maximum) sample.
    pub fn for_worst(worst: Duration) -> Self {
        let ns = worst.as_nanos();
        let (suffix, divisor_ns) = if ns < 1_000 {
            ("ns", 1)
        } else if ns < 1_000_000 {
            ("μs", 1_000)
        } else if ns < 1_000_000_000 {
            ("ms", 1_000_000)
        } else {
            ("s", 1_000_000_000)
        };
        Self { suffix, divisor_ns }
    }

    /// Scales a duration into this unit.
    pub fn scale(&self, value: Duration) -> f64 {
        value.as_nanos() as f64 / self.divisor_ns as f64
    }

    /// Returns the unit suffix (`"ns"`, `"μs"`, `"ms"` or `"s"`).
    pub fn suffix(&self) -> &'static str {
        self.suffix
    }
}

impl Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix)
    }
}

/// Formats `value` with `sig` significant digits.
///
/// Non-finite values (a delta against a zero baseline divides by zero) are
/// passed through as-is rather than panicking.
pub fn format_sig(value: f64, sig: u32) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return format!("{value:.prec$}", prec = sig.saturating_sub(1) as usize);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (sig as i32 - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_selection_thresholds() {
        assert_eq!(DisplayUnit::for_worst(Duration::from_nanos(999)).suffix(), "ns");
        assert_eq!(DisplayUnit::for_worst(Duration::from_nanos(1_000)).suffix(), "μs");
        assert_eq!(DisplayUnit::for_worst(Duration::from_nanos(999_999)).suffix(), "μs");
        assert_eq!(DisplayUnit::for_worst(Duration::from_nanos(1_000_000)).suffix(), "ms");
        assert_eq!(
            DisplayUnit::for_worst(Duration::from_nanos(999_999_999)).suffix(),
            "ms"
        );
        assert_eq!(DisplayUnit::for_worst(Duration::from_secs(1)).suffix(), "s");
        assert_eq!(DisplayUnit::for_worst(Duration::from_secs(3600)).suffix(), "s");
    }

    #[test]
    fn test_scaling() {
        let unit = DisplayUnit::for_worst(Duration::from_millis(30));
        assert_eq!(unit.suffix(), "ms");
        assert_eq!(unit.scale(Duration::from_millis(20)), 20.0);
        assert_eq!(unit.scale(Duration::from_micros(1_500)), 1.5);
    }

    #[test]
    fn test_format_sig_four_digits() {
        assert_eq!(format_sig(20.0, 4), "20.00");
        assert_eq!(format_sig(1.5, 4), "1.500");
        assert_eq!(format_sig(100.0, 4), "100.0");
        assert_eq!(format_sig(1234.9, 4), "1235");
        assert_eq!(format_sig(0.5, 4), "0.5000");
        assert_eq!(format_sig(0.0, 4), "0.000");
    }

    #[test]
    fn test_format_sig_large_values_keep_integer_digits() {
        // More integer digits than significant digits: no decimals, no
        // truncation of the integer part.
        assert_eq!(format_sig(123456.0, 4), "123456");
    }

    #[test]
    fn test_format_sig_non_finite_passthrough() {
        assert_eq!(format_sig(f64::INFINITY, 4), "inf");
        assert_eq!(format_sig(f64::NAN, 4), "NaN");
    }
}
