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

// Kairos profiling harness
// Demo host: times a few synthetic workload regions across worker threads,
// then runs the reporting pass. Pass a thread count as the first argument to
// also enable baseline persistence, e.g. `profiling-harness 4`; run it twice
// to see the cross-run deltas.

use anyhow::Result;
use kairos_core::Stopwatch;
use kairos_telemetry::{logging, Profiler};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const FRAMES: u32 = 120;

fn simulate_frame(frame: u32) {
    // A cheap deterministic workload with a little frame-to-frame variance.
    let spin = 50_000 + (frame % 7) as u64 * 10_000;
    let mut acc = 0u64;
    for i in 0..spin {
        acc = acc.wrapping_mul(31).wrapping_add(i);
    }
    std::hint::black_box(acc);
}

fn worker(profiler: Arc<Profiler>, index: usize) {
    let region = format!("Worker {index}");
    for frame in 0..FRAMES {
        let _span = profiler.scope(region.as_str());
        simulate_frame(frame);
    }
}

fn main() -> Result<()> {
    logging::init();

    let profiler = Arc::new(Profiler::new());

    // Mirror the original host's contract: any argument turns persistence on
    // and doubles as the worker count.
    let mut workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    if let Some(arg) = std::env::args().nth(1) {
        profiler.enable_persistence();
        match arg.parse::<usize>() {
            Ok(requested) => workers = requested.clamp(1, workers),
            Err(err) => log::warn!("invalid worker count '{arg}', using {workers} ({err})"),
        }
    }
    log::info!(
        "running {workers} workers, persistence {}",
        if profiler.persistence_enabled() { "on" } else { "off" }
    );

    {
        let _span = profiler.scope("Game Constructor");
        thread::sleep(Duration::from_millis(25));
    }

    let total = Stopwatch::new();
    let handles: Vec<_> = (0..workers)
        .map(|index| {
            let profiler = Arc::clone(&profiler);
            thread::spawn(move || worker(profiler, index))
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
    }
    if let Some(elapsed) = total.elapsed_secs_f64() {
        log::info!("workload finished in {elapsed:.3}s across {workers} workers");
    }

    profiler.log_all()?;
    log::info!("report written, {} spans recorded", profiler.span_count());
    Ok(())
}
