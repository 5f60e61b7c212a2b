//! Bounded wait for a container that another part of the UI creates.
//!
//! The cue panel is built asynchronously by code outside the engine, so
//! marker scanning first polls for it at a fixed interval and gives up
//! once the timeout has elapsed. [`ReadinessPoll`] holds the wait state
//! for hosts that advance it from their own timer; `wait_until` and
//! `wait_for_container` block the calling thread instead. The owner of the
//! session can cancel a pending wait through a [`CancelToken`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::dom::{ContainerPath, CueDom};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can guard the next wait.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Found { polls: u32 },
    TimedOut { polls: u32 },
    Cancelled { polls: u32 },
}

impl WaitOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn polls(&self) -> u32 {
        match self {
            Self::Found { polls } | Self::TimedOut { polls } | Self::Cancelled { polls } => *polls,
        }
    }
}

/// Timing state of one bounded wait, advanced by the caller.
///
/// The host drives it from its own timer (`poll` with the current
/// instant), so the UI that builds the container keeps running between
/// checks. A check runs at most once per `interval`, the first one an
/// interval after `start`. The check that crosses `timeout` is still made
/// before the wait gives up.
#[derive(Debug, Clone)]
pub struct ReadinessPoll {
    timeout: Duration,
    interval: Duration,
    started: Instant,
    last_check: Option<Instant>,
    polls: u32,
    cancel: CancelToken,
}

impl ReadinessPoll {
    /// A zero interval is raised to one millisecond so a caller polling in
    /// a loop never spins.
    pub fn start(
        timeout: Duration,
        interval: Duration,
        cancel: CancelToken,
        now: Instant,
    ) -> Self {
        Self {
            timeout,
            interval: interval.max(Duration::from_millis(1)),
            started: now,
            last_check: None,
            polls: 0,
            cancel,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Advance the wait to `now`. `None` while it is still pending.
    pub fn poll(&mut self, now: Instant, check: impl FnOnce() -> bool) -> Option<WaitOutcome> {
        if self.cancel.is_cancelled() {
            return Some(WaitOutcome::Cancelled { polls: self.polls });
        }
        let since = now.saturating_duration_since(self.last_check.unwrap_or(self.started));
        if since < self.interval {
            return None;
        }

        self.last_check = Some(now);
        self.polls += 1;
        if check() {
            return Some(WaitOutcome::Found { polls: self.polls });
        }
        if now.saturating_duration_since(self.started) >= self.timeout {
            return Some(WaitOutcome::TimedOut { polls: self.polls });
        }
        None
    }

    /// Look for `path` in `dom`.
    pub fn poll_container(
        &mut self,
        now: Instant,
        dom: &dyn CueDom,
        path: &ContainerPath,
    ) -> Option<WaitOutcome> {
        let outcome = self.poll(now, || dom.container_exists(path));
        if let Some(outcome) = outcome {
            debug!("Wait for {} ended: {:?}", path, outcome);
        }
        outcome
    }
}

/// Block the calling thread, checking every `interval` until `check`
/// returns true or `timeout` passes.
pub fn wait_until(
    mut check: impl FnMut() -> bool,
    timeout: Duration,
    interval: Duration,
    cancel: &CancelToken,
) -> WaitOutcome {
    let mut wait = ReadinessPoll::start(timeout, interval, cancel.clone(), Instant::now());
    loop {
        thread::sleep(wait.interval());
        if let Some(outcome) = wait.poll(Instant::now(), &mut check) {
            return outcome;
        }
    }
}

/// Wait for a nested container path to exist in `dom`.
pub fn wait_for_container(
    dom: &dyn CueDom,
    path: &ContainerPath,
    timeout: Duration,
    interval: Duration,
    cancel: &CancelToken,
) -> WaitOutcome {
    let mut wait = ReadinessPoll::start(timeout, interval, cancel.clone(), Instant::now());
    loop {
        thread::sleep(wait.interval());
        if let Some(outcome) = wait.poll_container(Instant::now(), dom, path) {
            return outcome;
        }
    }
}

/// `true` the first poll the container exists, `false` on timeout or cancel.
pub fn wait_for(
    dom: &dyn CueDom,
    path: &ContainerPath,
    timeout: Duration,
    interval: Duration,
) -> bool {
    wait_for_container(dom, path, timeout, interval, &CancelToken::new()).is_found()
}
