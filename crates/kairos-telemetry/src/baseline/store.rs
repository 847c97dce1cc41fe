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

use kairos_core::profiling::{BaselineKey, ProfileError, ProfileResult, StoreOp};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Default file name of the baseline database, relative to the working
/// directory of the host process.
pub const DEFAULT_STORE_PATH: &str = "kairos_baseline.db";

/// Single-file embedded store mapping `(region, label)` to the last observed
/// duration for that metric.
///
/// Each value is a single slot, not a series: a write fully replaces whatever
/// the previous run left there. The store is opened once per reporting pass
/// and closed (dropped) when the pass ends, so an instrumented process that
/// never reports holds no file handle.
///
/// Values are stored as ASCII decimal nanosecond counts. The composite
/// primary key keeps region and label as separate columns, so no combination
/// of region names can alias another entry.
#[derive(Debug)]
pub struct BaselineStore {
    conn: Connection,
}

impl BaselineStore {
    /// Opens (creating if necessary) the baseline database at `path`.
    pub fn open(path: impl AsRef<Path>) -> ProfileResult<Self> {
        let conn = Connection::open(path).map_err(|err| storage(StoreOp::Open, err))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS baseline (
                 region TEXT NOT NULL,
                 label  TEXT NOT NULL,
                 value  TEXT NOT NULL,
                 PRIMARY KEY (region, label)
             )",
        )
        .map_err(|err| storage(StoreOp::Open, err))?;
        Ok(Self { conn })
    }

    /// Returns the persisted value for `key` in nanoseconds, or `None` if the
    /// key has never been written.
    ///
    /// Key-not-found is a normal outcome (the first run for a region), kept
    /// distinct from a stored zero. Anything else (a query failure or an
    /// unparsable stored value) is a read error.
    pub fn get(&self, key: &BaselineKey) -> ProfileResult<Option<u64>> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM baseline WHERE region = ?1 AND label = ?2",
                params![key.region, key.label.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| storage(StoreOp::Read, err))?;

        match row {
            None => Ok(None),
            Some(text) => text.parse::<u64>().map(Some).map_err(|err| {
                ProfileError::Storage {
                    op: StoreOp::Read,
                    reason: format!("stored value for [{key}] is not a duration count: {err}"),
                }
            }),
        }
    }

    /// Upserts the value for `key`, replacing any previous run's entry.
    ///
    /// The write runs inside its own transaction: a reader never observes a
    /// partial write, and an abrupt termination mid-call leaves the previous
    /// value intact.
    pub fn put(&mut self, key: &BaselineKey, value_ns: u64) -> ProfileResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|err| storage(StoreOp::Write, err))?;
        tx.execute(
            "INSERT INTO baseline (region, label, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (region, label) DO UPDATE SET value = excluded.value",
            params![key.region, key.label.as_str(), value_ns.to_string()],
        )
        .map_err(|err| storage(StoreOp::Write, err))?;
        tx.commit().map_err(|err| storage(StoreOp::Commit, err))
    }

    /// Returns the number of persisted entries. Mainly useful to verify that
    /// a pass with persistence disabled wrote nothing.
    pub fn entry_count(&self) -> ProfileResult<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM baseline", [], |row| row.get::<_, i64>(0))
            .map(|count| count as usize)
            .map_err(|err| storage(StoreOp::Read, err))
    }
}

fn storage(op: StoreOp, err: rusqlite::Error) -> ProfileError {
    ProfileError::Storage {
        op,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_core::profiling::MetricLabel;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = BaselineStore::open(dir.path().join("baseline.db")).unwrap();
        let key = BaselineKey::new("Frame", MetricLabel::Average);

        assert_eq!(store.get(&key).unwrap(), None);
        store.put(&key, 123_456_789).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(123_456_789));
    }

    #[test]
    fn test_second_write_fully_replaces_first() {
        let dir = tempdir().unwrap();
        let mut store = BaselineStore::open(dir.path().join("baseline.db")).unwrap();
        let key = BaselineKey::new("Frame", MetricLabel::Worst);

        store.put(&key, 100).unwrap();
        store.put(&key, 75).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(75));
        assert_eq!(store.entry_count().unwrap(), 1);
    }

    #[test]
    fn test_stored_zero_is_distinct_from_not_found() {
        let dir = tempdir().unwrap();
        let mut store = BaselineStore::open(dir.path().join("baseline.db")).unwrap();
        let written = BaselineKey::new("Frame", MetricLabel::Best);
        let missing = BaselineKey::new("Frame", MetricLabel::Median);

        store.put(&written, 0).unwrap();
        assert_eq!(store.get(&written).unwrap(), Some(0));
        assert_eq!(store.get(&missing).unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("baseline.db");
        let key = BaselineKey::new("Physics Step", MetricLabel::Average);

        {
            let mut store = BaselineStore::open(&path).unwrap();
            store.put(&key, 42_000).unwrap();
        }

        let store = BaselineStore::open(&path).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(42_000));
    }

    #[test]
    fn test_regions_with_same_label_do_not_collide() {
        let dir = tempdir().unwrap();
        let mut store = BaselineStore::open(dir.path().join("baseline.db")).unwrap();

        // Concatenated these would both read "FrameWorst"; structured keys
        // keep them apart.
        let a = BaselineKey::new("Frame", MetricLabel::Worst);
        let b = BaselineKey::new("FrameWorst", MetricLabel::Average);
        store.put(&a, 1).unwrap();
        store.put(&b, 2).unwrap();
        assert_eq!(store.get(&a).unwrap(), Some(1));
        assert_eq!(store.get(&b).unwrap(), Some(2));
    }

    #[test]
    fn test_open_failure_is_tagged() {
        // A directory path is not a valid database file.
        let dir = tempdir().unwrap();
        let err = BaselineStore::open(dir.path()).unwrap_err();
        match err {
            ProfileError::Storage { op, .. } => assert_eq!(op, StoreOp::Open),
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
