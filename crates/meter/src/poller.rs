//! Periodic recomputation driver
//!
//! Runs a [`PollTarget`] on a dedicated OS thread at a fixed cadence. A failing
//! or panicking poll is recorded and logged; the next tick still happens.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, select};
use parking_lot::Mutex;

use crate::error::{PollerError, RecomputeError};

/// Work performed on every tick
pub trait PollTarget: Send + Sync {
    fn poll(&self) -> Result<(), RecomputeError>;

    /// Name used for the poller thread and in logs
    fn name(&self) -> &str {
        "poll-target"
    }
}

/// Counters for the current (or last) run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerStats {
    pub ticks: u64,
    pub failures: u64,
    pub last_error: Option<String>,
}

#[derive(Default)]
struct Record {
    ticks: AtomicU64,
    failures: AtomicU64,
    last_error: Mutex<Option<String>>,
}

impl Record {
    fn clear(&self) {
        self.ticks.store(0, Ordering::SeqCst);
        self.failures.store(0, Ordering::SeqCst);
        *self.last_error.lock() = None;
    }
}

/// Handle to a running poll thread
struct Running {
    handle: JoinHandle<()>,
    /// Dropping this wakes the thread and ends the loop
    shutdown: Sender<()>,
}

/// Fixed-cadence driver for a [`PollTarget`]
///
/// At most one poll runs at a time. `stop` joins the thread, so once it
/// returns no further poll can happen.
pub struct Poller {
    interval: Duration,
    record: Arc<Record>,
    running: Option<Running>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            record: Arc::new(Record::default()),
            running: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start polling `target` every interval
    ///
    /// Fails if already running. Counters restart from zero.
    pub fn start(&mut self, target: Arc<dyn PollTarget>) -> Result<(), PollerError> {
        if self.running.is_some() {
            return Err(PollerError::AlreadyRunning);
        }
        self.record.clear();

        let (shutdown, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
        let ticker = crossbeam_channel::tick(self.interval);
        let record = self.record.clone();
        let name = target.name().to_string();

        let handle = thread::Builder::new()
            .name(format!("poller-{}", name))
            .spawn(move || Self::poll_loop(target, ticker, shutdown_rx, record))?;

        log::debug!("Poller for {} started ({:?} interval)", name, self.interval);
        self.running = Some(Running { handle, shutdown });
        Ok(())
    }

    /// Stop polling and wait for any in-flight poll to finish
    ///
    /// Stopping a poller that is not running does nothing.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        drop(running.shutdown);
        if running.handle.join().is_err() {
            log::error!("Poller thread panicked outside of a poll");
        }
        log::debug!(
            "Poller stopped after {} ticks ({} failed)",
            self.record.ticks.load(Ordering::SeqCst),
            self.record.failures.load(Ordering::SeqCst)
        );
    }

    pub fn stats(&self) -> PollerStats {
        PollerStats {
            ticks: self.record.ticks.load(Ordering::SeqCst),
            failures: self.record.failures.load(Ordering::SeqCst),
            last_error: self.record.last_error.lock().clone(),
        }
    }

    fn poll_loop(
        target: Arc<dyn PollTarget>,
        ticker: Receiver<std::time::Instant>,
        shutdown: Receiver<()>,
        record: Arc<Record>,
    ) {
        loop {
            select! {
                recv(shutdown) -> _ => break,
                recv(ticker) -> _ => Self::poll_once(target.as_ref(), &record),
            }
        }
    }

    fn poll_once(target: &dyn PollTarget, record: &Record) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| target.poll()))
            .unwrap_or_else(|payload| Err(RecomputeError::Panicked(panic_message(payload))));
        record.ticks.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = result {
            let failures = record.failures.fetch_add(1, Ordering::SeqCst) + 1;
            log::warn!(
                "{} poll failed ({} so far), retrying next tick: {}",
                target.name(),
                failures,
                e
            );
            *record.last_error.lock() = Some(e.to_string());
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
