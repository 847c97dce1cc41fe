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

//! Provides an RAII-based guard for automatically timing a scope.
//! (RAII = Resource Acquisition Is Initialization)

use crate::profiler::registry::Profiler;

/// Times the enclosing scope and records the sample when dropped.
///
/// This leverages the RAII pattern to ensure the interval is always closed,
/// even on early returns or panics, so a scope that unwinds still contributes
/// a sample instead of leaving its recorder tracking forever.
#[derive(Debug)]
pub struct ScopedSpan<'a> {
    profiler: &'a Profiler,
    name: String,
}

impl<'a> ScopedSpan<'a> {
    /// Starts timing `name` on `profiler`. Prefer [`Profiler::scope`].
    pub(crate) fn enter(profiler: &'a Profiler, name: impl Into<String>) -> Self {
        let name = name.into();
        profiler.start(&name);
        Self { profiler, name }
    }

    /// The region name this guard times.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ScopedSpan<'_> {
    fn drop(&mut self) {
        self.profiler.stop(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn isolated(dir: &tempfile::TempDir) -> Profiler {
        Profiler::with_paths(dir.path().join("baseline.db"), dir.path().join("out.log"))
    }

    #[test]
    fn test_guard_records_exactly_one_sample() {
        let dir = tempfile::tempdir().unwrap();
        let profiler = isolated(&dir);

        {
            let span = profiler.scope("setup");
            assert_eq!(span.name(), "setup");
            std::thread::sleep(Duration::from_millis(2));
        }

        let snapshot = profiler.snapshot();
        assert_eq!(snapshot.regions.len(), 1);
        assert_eq!(snapshot.regions[0].summary.sample_count, 1);
    }

    #[test]
    fn test_guard_closes_interval_on_early_drop() {
        let dir = tempfile::tempdir().unwrap();
        let profiler = isolated(&dir);

        let span = profiler.scope("early");
        drop(span);

        let snapshot = profiler.snapshot();
        assert_eq!(snapshot.regions[0].summary.sample_count, 1);

        // A second scope for the same region appends rather than replaces.
        {
            let _span = profiler.scope("early");
        }
        let snapshot = profiler.snapshot();
        assert_eq!(snapshot.regions[0].summary.sample_count, 2);
    }
}
