// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ReadinessTracker is the only point where workers and the
//! writer meet.  A worker that has finished a row hands it over here,
//! under the one lock; the writer blocks on the condition variable
//! until the row it needs next has arrived and then takes the whole
//! contiguous run of finished rows starting there.
//!
//! A row handed over is a shared slice: once published, nothing can
//! write to it again.

use std::sync::{Condvar, Mutex, MutexGuard};

use crate::errors::NewtonError;
use crate::newton::PixelResult;

struct Rows<'a> {
    published: Vec<Option<&'a [PixelResult]>>,
    abandoned: bool,
}

/// Per-row readiness, plus the finished rows themselves.
pub struct ReadinessTracker<'a> {
    rows: Mutex<Rows<'a>>,
    changed: Condvar,
}

impl<'a> ReadinessTracker<'a> {
    /// A tracker for `rows` rows, none of them ready.
    pub fn new(rows: usize) -> Self {
        ReadinessTracker {
            rows: Mutex::new(Rows {
                published: vec![None; rows],
                abandoned: false,
            }),
            changed: Condvar::new(),
        }
    }

    // The state behind the lock stays consistent even if a holder
    // panicked, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<Rows<'a>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publish a finished row.  Each row is published exactly once.
    pub fn mark_ready(&self, row: usize, data: &'a [PixelResult]) {
        {
            let mut rows = self.lock();
            assert!(rows.published[row].is_none(), "row {} published twice", row);
            rows.published[row] = Some(data);
        }
        self.changed.notify_all();
    }

    /// Number of rows tracked.
    pub fn len(&self) -> usize {
        self.lock().published.len()
    }

    /// True if there are no rows to track.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of the readiness flags.
    pub fn snapshot(&self) -> Vec<bool> {
        self.lock().published.iter().map(Option::is_some).collect()
    }

    /// Record that some row will never be published, waking the writer
    /// so it can give up.
    pub fn abandon(&self) {
        self.lock().abandoned = true;
        self.changed.notify_all();
    }

    /// Block until `cursor` is ready, then return the maximal run of
    /// ready rows starting at `cursor`.  The lock is released before
    /// returning.
    pub fn wait_for_run(&self, cursor: usize) -> Result<Vec<&'a [PixelResult]>, NewtonError> {
        let mut rows = self.lock();
        while rows.published[cursor].is_none() {
            if rows.abandoned {
                return Err(NewtonError::Abandoned(cursor));
            }
            rows = self
                .changed
                .wait(rows)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        Ok(rows.published[cursor..]
            .iter()
            .take_while(|row| row.is_some())
            .filter_map(|row| *row)
            .collect())
    }
}

/// Held by a worker for as long as it runs.  If the worker unwinds,
/// the tracker is abandoned so the writer does not wait forever.
pub struct AbandonOnPanic<'t, 'a>(pub &'t ReadinessTracker<'a>);

impl<'t, 'a> Drop for AbandonOnPanic<'t, 'a> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abandon();
        }
    }
}
