// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// RAII guards returned by `ReadWriteLock::read` / `ReadWriteLock::write`.
// Each releases its acquisition exactly once, on drop.

use std::fmt;

use crate::ReadWriteLock;

/// RAII guard for shared access: releases the read acquisition on drop.
///
/// Not `Clone`; moving the guard moves the responsibility to release.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ReadGuard<'a> {
    lock: &'a ReadWriteLock,
}

impl<'a> ReadGuard<'a> {
    // Caller must already hold a read acquisition on `lock`.
    pub(crate) fn new(lock: &'a ReadWriteLock) -> Self {
        Self { lock }
    }

    /// The lock this guard holds.
    pub fn lock(&self) -> &'a ReadWriteLock {
        self.lock
    }
}

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        self.lock.release_read();
    }
}

impl fmt::Debug for ReadGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadGuard").field("lock", self.lock).finish()
    }
}

/// RAII guard for exclusive access: releases the write acquisition on drop.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct WriteGuard<'a> {
    lock: &'a ReadWriteLock,
}

impl<'a> WriteGuard<'a> {
    // Caller must already hold the write acquisition on `lock`.
    pub(crate) fn new(lock: &'a ReadWriteLock) -> Self {
        Self { lock }
    }

    /// The lock this guard holds.
    pub fn lock(&self) -> &'a ReadWriteLock {
        self.lock
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.lock.release_write();
    }
}

impl fmt::Debug for WriteGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteGuard").field("lock", self.lock).finish()
    }
}
