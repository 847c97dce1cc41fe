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

//! Error types for the profiling subsystem.

use std::fmt::Display;

/// The store operation that failed, for diagnostics.
///
/// A reporting pass aborts on the first store failure; the operation tag
/// tells the operator which phase of the pass to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    /// Opening the baseline database (or creating its schema).
    Open,
    /// Reading a baseline value.
    Read,
    /// Writing a new baseline value.
    Write,
    /// Committing a write transaction.
    Commit,
}

impl StoreOp {
    /// Returns the operation name used in diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StoreOp::Open => "open",
            StoreOp::Read => "read",
            StoreOp::Write => "write",
            StoreOp::Commit => "commit",
        }
    }
}

impl Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A specialized `Result` type for profiling operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// An error that can occur during a reporting pass.
///
/// Recording (`start`/`stop`) is infallible by contract; only the reporting
/// pass produces these, and they are fatal to that pass alone, never to the
/// instrumented program.
#[derive(Debug)]
pub enum ProfileError {
    /// The baseline store failed during the tagged operation.
    Storage {
        /// The store operation that failed.
        op: StoreOp,
        /// The underlying storage layer's description of the failure.
        reason: String,
    },
    /// Writing to the report sink failed.
    Sink(std::io::Error),
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::Storage { op, reason } => {
                write!(f, "baseline store {op} failed: {reason}")
            }
            ProfileError::Sink(err) => write!(f, "report sink write failed: {err}"),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::Storage { .. } => None,
            ProfileError::Sink(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(err: std::io::Error) -> Self {
        ProfileError::Sink(err)
    }
}
