// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Blocking reader-writer lock built from explicit mutex + condition-variable
// pairs. Readers share, writers exclude everyone, blocked threads sleep.

mod monitor;

mod rw_lock;
pub use rw_lock::{LockState, ReadWriteLock};

mod guard;
pub use guard::{ReadGuard, WriteGuard};
