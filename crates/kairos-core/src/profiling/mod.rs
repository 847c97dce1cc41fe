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

//! Provides the foundational data types for span profiling.
//!
//! This module defines the "common language" shared by the recording and
//! reporting halves of the subsystem: the summary-metric labels, the
//! structured keys under which baselines are persisted, and the error type
//! every fallible profiling operation returns. `kairos-telemetry` builds the
//! concrete recorder, store, and reporter on top of these contracts.

pub mod error;
pub mod key;

pub use self::error::{ProfileError, ProfileResult, StoreOp};
pub use self::key::{BaselineKey, MetricLabel};
