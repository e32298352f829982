//! Recurring timer primitives used by the refresh scheduler.
//!
//! The scheduler never sleeps or spawns on its own; it asks a
//! [`TimerDriver`] to arm and cancel timers and is told about ticks by
//! whoever owns the event loop. [`ManualTimer`] lets tests fire ticks by
//! hand, [`TokioTimer`] backs the real runtime.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::scheduler::types::TimerId;

pub trait TimerDriver {
    /// Arm a recurring timer. The first tick fires one `period` from now.
    fn arm(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Timer driver that only records what was asked of it.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    active: BTreeMap<TimerId, Duration>,
    armed_total: usize,
    cancelled: Vec<TimerId>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers currently armed.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn period_of(&self, id: TimerId) -> Option<Duration> {
        self.active.get(&id).copied()
    }

    /// Number of `arm` calls over the driver's lifetime.
    pub fn armed_total(&self) -> usize {
        self.armed_total
    }

    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }
}

impl TimerDriver for ManualTimer {
    fn arm(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.active.insert(id, period);
        self.armed_total += 1;
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if self.active.remove(&id).is_some() {
            self.cancelled.push(id);
        }
    }
}

/// Timer driver backed by `tokio::time::interval`.
///
/// Each armed timer is a task that forwards its ticks, tagged with its
/// [`TimerId`], into the channel returned by [`TokioTimer::new`]. Cancelling
/// aborts the task, so a cancelled timer stops producing ticks; ticks it
/// already queued are filtered out by the scheduler.
pub struct TokioTimer {
    next_id: u64,
    ticks: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (ticks, rx) = mpsc::unbounded_channel();
        let timer = Self {
            next_id: 0,
            ticks,
            tasks: HashMap::new(),
        };
        (timer, rx)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TimerDriver for TokioTimer {
    fn arm(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let ticks = self.ticks.clone();
        let first_tick = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if ticks.send(id).is_err() {
                    break;
                }
            }
        });

        debug!(
            event = "core.timer.armed",
            timer_id = id.0,
            period_secs = period.as_secs()
        );
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            debug!(event = "core.timer.cancelled", timer_id = id.0);
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_tracks_active() {
        let mut timer = ManualTimer::new();
        let first = timer.arm(Duration::from_secs(10));
        let second = timer.arm(Duration::from_secs(30));

        assert_ne!(first, second);
        assert_eq!(timer.active_count(), 2);

        timer.cancel(first);
        timer.cancel(first);

        assert_eq!(timer.active_count(), 1);
        assert!(!timer.is_active(first));
        assert_eq!(timer.period_of(second), Some(Duration::from_secs(30)));
        assert_eq!(timer.cancelled(), &[first]);
        assert_eq!(timer.armed_total(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_ticks_after_period() {
        let (mut timer, mut ticks) = TokioTimer::new();
        let id = timer.arm(Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(ticks.try_recv().is_err(), "no tick before the first period");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(ticks.recv().await, Some(id));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.recv().await, Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_cancel_stops_ticks() {
        let (mut timer, mut ticks) = TokioTimer::new();
        let id = timer.arm(Duration::from_secs(3));
        timer.cancel(id);
        assert_eq!(timer.active_count(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(ticks.try_recv().is_err());
    }
}
