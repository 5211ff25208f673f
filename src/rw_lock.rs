// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Blocking read-write lock built from two coordination monitors.
// - `readers` counts admitted readers.
// - `writer` is set while a writer is claiming or holding the lock.
// Readers park on the reader gate while `writer` is set. Writers claim
// `writer` under the writer gate, then drain readers on the reader gate.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::trace;

use crate::monitor::Monitor;
use crate::{ReadGuard, WriteGuard};

/// Conceptual state of a [`ReadWriteLock`], as observed by
/// [`ReadWriteLock::state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockState {
    /// No readers and no writer.
    Idle,
    /// `n > 0` readers hold the lock and no writer has claimed it.
    ReadActive(usize),
    /// A writer has claimed the lock and is waiting for `draining`
    /// already-admitted readers to release.
    WriterClaiming { draining: usize },
    /// A writer holds the lock exclusively.
    WriteActive,
}

/// A reader-writer lock that parks blocked threads instead of spinning.
///
/// Any number of readers may hold the lock while no writer is present.
/// A writer first claims the lock, which stops new readers from being
/// admitted, then waits for the readers already inside to leave.
///
/// The lock only gates timing. It owns no data; whatever it protects
/// is accessed by the caller while a guard (or a raw acquisition) is held.
///
/// Ordering among blocked readers, or among blocked writers, is
/// unspecified. The lock is not reentrant: a thread holding a write
/// acquisition that calls [`acquire_write`](Self::acquire_write) or
/// [`acquire_read`](Self::acquire_read) again deadlocks.
pub struct ReadWriteLock {
    readers: AtomicUsize,
    writer: AtomicBool,
    reader_gate: Monitor,
    writer_gate: Monitor,
}

impl ReadWriteLock {
    /// Create a new, idle lock.
    pub const fn new() -> Self {
        Self {
            readers: AtomicUsize::new(0),
            writer: AtomicBool::new(false),
            reader_gate: Monitor::new("reader gate"),
            writer_gate: Monitor::new("writer gate"),
        }
    }

    /// Acquire shared access, blocking while a writer has claimed the lock.
    ///
    /// Prefer [`read`](Self::read), which releases automatically.
    ///
    /// # Panics
    /// Panics if the reader count would overflow `usize`.
    pub fn acquire_read(&self) {
        // Check and increment happen under the reader gate, which a
        // claiming writer passes through before it counts readers.
        self.reader_gate.wait_while_then(
            || self.writer.load(Ordering::SeqCst),
            || {
                self.readers
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
                    .unwrap_or_else(|_| panic!("too many readers"));
            },
        );
    }

    /// Release shared access obtained with [`acquire_read`](Self::acquire_read).
    ///
    /// # Panics
    /// Panics if no read acquisition is outstanding. The count is left at 0.
    pub fn release_read(&self) {
        let prev = self
            .readers
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .unwrap_or_else(|_| panic!("release_read called without a matching acquire_read"));

        self.reader_gate.broadcast();
        if prev == 1 {
            self.writer_gate.broadcast();
        }
    }

    /// Acquire exclusive access.
    ///
    /// Blocks until no other writer holds or claims the lock, claims it,
    /// then blocks until every reader admitted before the claim has
    /// released. No reader is admitted between the claim and the matching
    /// [`release_write`](Self::release_write).
    ///
    /// Prefer [`write`](Self::write), which releases automatically.
    ///
    /// # Deadlocks
    /// Calling this while the current thread already holds the lock
    /// (for reading or writing) never returns.
    pub fn acquire_write(&self) {
        // Claim: only one writer can observe the flag clear and set it.
        self.writer_gate.wait_while_then(
            || self.writer.load(Ordering::SeqCst),
            || self.writer.store(true, Ordering::SeqCst),
        );

        // Drain: passing through the reader gate lets any reader that saw
        // the flag clear finish its increment before we count.
        self.reader_gate.broadcast();
        let draining = self.readers.load(Ordering::SeqCst);
        if draining > 0 {
            trace!("writer claimed lock, draining {draining} reader(s)");
        }
        self.reader_gate.wait_while(|| self.readers.load(Ordering::SeqCst) > 0);
    }

    /// Release exclusive access obtained with [`acquire_write`](Self::acquire_write).
    ///
    /// # Panics
    /// Panics if the lock is not write-claimed.
    pub fn release_write(&self) {
        let was_claimed = self.writer.swap(false, Ordering::SeqCst);
        assert!(
            was_claimed,
            "release_write called without a matching acquire_write"
        );

        self.writer_gate.broadcast();
        self.reader_gate.broadcast();
    }

    /// Acquire shared access for the lifetime of the returned guard.
    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn read(&self) -> ReadGuard<'_> {
        self.acquire_read();
        ReadGuard::new(self)
    }

    /// Acquire exclusive access for the lifetime of the returned guard.
    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn write(&self) -> WriteGuard<'_> {
        self.acquire_write();
        WriteGuard::new(self)
    }

    /// Number of readers currently admitted. Snapshot only.
    pub fn readers(&self) -> usize {
        self.readers.load(Ordering::SeqCst)
    }

    /// Whether a writer is claiming or holding the lock. Snapshot only.
    pub fn is_write_claimed(&self) -> bool {
        self.writer.load(Ordering::SeqCst)
    }

    /// Snapshot of the lock's conceptual state.
    ///
    /// The two counters are read separately, so under contention the
    /// result may combine values from slightly different instants. A
    /// writer that has claimed the lock but not yet re-checked the reader
    /// count is reported as [`LockState::WriteActive`] once the count is 0.
    pub fn state(&self) -> LockState {
        let readers = self.readers();
        match (self.is_write_claimed(), readers) {
            (false, 0) => LockState::Idle,
            (false, n) => LockState::ReadActive(n),
            (true, 0) => LockState::WriteActive,
            (true, n) => LockState::WriterClaiming { draining: n },
        }
    }
}

impl Default for ReadWriteLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReadWriteLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadWriteLock")
            .field("state", &self.state())
            .finish()
    }
}
