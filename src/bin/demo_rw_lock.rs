// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Readers and writers sharing one counter behind a ReadWriteLock.
//
// Usage:
//   demo_rw_lock [readers] [writers] [read_iters] [write_iters]
//
// Defaults: 4 readers x 3 reads, 2 writers x 2 writes. Each reader holds
// the lock for 50ms and pauses 10ms; each writer increments the counter,
// holds for 100ms and pauses 20ms. The final counter must equal
// writers * write_iters.
//
// Set RUST_LOG=trace to see threads park and wake.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rwmonitor::ReadWriteLock;

const READ_HOLD: Duration = Duration::from_millis(50);
const READ_PAUSE: Duration = Duration::from_millis(10);
const WRITE_HOLD: Duration = Duration::from_millis(100);
const WRITE_PAUSE: Duration = Duration::from_millis(20);

struct Config {
    readers: usize,
    writers: usize,
    read_iters: usize,
    write_iters: usize,
}

fn usage() -> ! {
    eprintln!("usage: demo_rw_lock [readers] [writers] [read_iters] [write_iters]");
    std::process::exit(1);
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 4 {
        usage();
    }
    let mut values = [4usize, 2, 3, 2];
    for (slot, arg) in values.iter_mut().zip(&args) {
        *slot = match arg.parse() {
            Ok(v) => v,
            Err(_) => {
                eprintln!("invalid count: {arg}");
                usage();
            }
        };
    }
    let [readers, writers, read_iters, write_iters] = values;
    Config {
        readers,
        writers,
        read_iters,
        write_iters,
    }
}

fn reader(id: usize, iters: usize, lock: Arc<ReadWriteLock>, value: Arc<AtomicI64>) {
    for _ in 0..iters {
        {
            let _guard = lock.read();
            println!("Reader {id}: Read value = {}", value.load(Ordering::Relaxed));
            thread::sleep(READ_HOLD);
        }
        thread::sleep(READ_PAUSE);
    }
}

fn writer(id: usize, iters: usize, lock: Arc<ReadWriteLock>, value: Arc<AtomicI64>) {
    for _ in 0..iters {
        {
            let _guard = lock.write();
            // Load + store, not fetch_add: the lock alone must keep writes isolated.
            let v = value.load(Ordering::Relaxed) + 1;
            value.store(v, Ordering::Relaxed);
            println!("Writer {id}: Wrote value = {v}");
            thread::sleep(WRITE_HOLD);
        }
        thread::sleep(WRITE_PAUSE);
    }
}

fn main() {
    env_logger::init();
    let cfg = parse_args();

    println!("ReadWriteLock demo\n");

    let lock = Arc::new(ReadWriteLock::new());
    let value = Arc::new(AtomicI64::new(0));

    let mut handles = Vec::with_capacity(cfg.readers + cfg.writers);
    for id in 1..=cfg.writers {
        let (lock, value) = (Arc::clone(&lock), Arc::clone(&value));
        let iters = cfg.write_iters;
        handles.push(thread::spawn(move || writer(id, iters, lock, value)));
    }
    for id in 1..=cfg.readers {
        let (lock, value) = (Arc::clone(&lock), Arc::clone(&value));
        let iters = cfg.read_iters;
        handles.push(thread::spawn(move || reader(id, iters, lock, value)));
    }

    for h in handles {
        if h.join().is_err() {
            eprintln!("worker thread panicked");
            std::process::exit(1);
        }
    }

    let final_value = value.load(Ordering::Relaxed);
    println!("\nFinal shared value: {final_value}");

    let expected = (cfg.writers * cfg.write_iters) as i64;
    if final_value != expected {
        eprintln!("expected {expected}, lost or duplicated writes");
        std::process::exit(1);
    }
    println!("Demo completed successfully!");
}
