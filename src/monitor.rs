// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Coordination monitor: a mutex + condition-variable pair used to park
// and wake threads on a predicate. The predicate state itself lives in
// atomics owned by the caller; the monitor only orders the wait/notify.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use log::trace;

/// A mutex paired with a condition variable.
///
/// The mutex guards no data of its own. Callers keep their state in
/// atomics and use the monitor to serialize predicate checks against
/// each other and against [`Monitor::broadcast`].
pub(crate) struct Monitor {
    name: &'static str,
    lock: Mutex<()>,
    cond: Condvar,
}

impl Monitor {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            lock: Mutex::new(()),
            cond: Condvar::new(),
        }
    }

    // The mutex protects `()`, so a poisoned lock carries no torn state.
    fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until `pred` returns `false`, then run `then` with the
    /// monitor still held.
    ///
    /// `pred` is re-evaluated after every wakeup, spurious or not.
    pub(crate) fn wait_while_then<P, F, R>(&self, mut pred: P, then: F) -> R
    where
        P: FnMut() -> bool,
        F: FnOnce() -> R,
    {
        let mut guard = self.enter();
        if pred() {
            trace!("{}: parking", self.name);
            while pred() {
                guard = self.cond.wait(guard).unwrap_or_else(PoisonError::into_inner);
            }
            trace!("{}: predicate cleared", self.name);
        }
        let out = then();
        drop(guard);
        out
    }

    /// Block until `pred` returns `false`.
    pub(crate) fn wait_while<P>(&self, pred: P)
    where
        P: FnMut() -> bool,
    {
        self.wait_while_then(pred, || ());
    }

    /// Wake all waiters.
    pub(crate) fn broadcast(&self) {
        // Barrier: a waiter that saw the old state is inside `cond.wait`
        // (and has released the mutex) before we notify.
        drop(self.enter());
        self.cond.notify_all();
    }
}
