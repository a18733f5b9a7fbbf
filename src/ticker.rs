//! Cancellable once-per-second refresh.
//!
//! `RefreshTimer` owns at most one periodic task. Re-arming replaces it and
//! dropping the timer aborts it, so no refresh outlives its owner.
//! `ClockSession` re-arms on every selection change and publishes snapshots
//! on a watch channel.

use crate::clock::{Selection, Snapshot};
use chrono::Utc;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Refresh period of the display.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// A single periodic task that can be replaced or cancelled.
#[derive(Default)]
pub struct RefreshTimer {
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running task and start calling `tick` every `period`.
    ///
    /// The first call happens one full period after arming. Must be called
    /// from within a tokio runtime.
    pub fn arm<F>(&mut self, period: Duration, mut tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.cancel();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        });
        self.handle = Some(handle);
    }

    /// Stop the running task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::trace!("refresh timer cancelled");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Two selections, a refresh timer, and the latest snapshot.
pub struct ClockSession {
    selection: Arc<RwLock<Selection>>,
    timer: RefreshTimer,
    period: Duration,
    tx: watch::Sender<Option<Snapshot>>,
}

impl ClockSession {
    pub fn new() -> Self {
        Self::with_period(REFRESH_PERIOD)
    }

    /// Create a session with a custom refresh period (for testing).
    pub fn with_period(period: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            selection: Arc::new(RwLock::new(Selection::default())),
            timer: RefreshTimer::new(),
            period,
            tx,
        }
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.tx.subscribe()
    }

    pub fn selection(&self) -> Selection {
        self.selection.read().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn select_first(&mut self, name: Option<String>) {
        self.update(|s| s.first = name);
    }

    pub fn select_second(&mut self, name: Option<String>) {
        self.update(|s| s.second = name);
    }

    /// Replace both slots at once (one re-arm).
    pub fn select(&mut self, selection: Selection) {
        self.update(|s| *s = selection);
    }

    /// Stop refreshing. Also happens on drop.
    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_armed()
    }

    fn update(&mut self, change: impl FnOnce(&mut Selection)) {
        if let Ok(mut guard) = self.selection.write() {
            change(&mut guard);
            tracing::debug!(first = ?guard.first, second = ?guard.second, "selection changed");
        }
        self.rearm();
    }

    fn rearm(&mut self) {
        let selection = Arc::clone(&self.selection);
        let tx = self.tx.clone();
        self.timer.arm(self.period, move || {
            let current = match selection.read() {
                Ok(guard) => guard.clone(),
                Err(_) => return,
            };
            if let Some(snapshot) = Snapshot::capture(&current, Utc::now()) {
                tx.send_replace(Some(snapshot));
            }
        });
    }
}

impl Default for ClockSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ticks_every_period() {
        let (count, tick) = counter();
        let mut timer = RefreshTimer::new();
        timer.arm(Duration::from_secs(1), tick);
        assert!(timer.is_armed());

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0, "first tick waits a full period");

        time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_cancel_stops_ticks() {
        let (count, tick) = counter();
        let mut timer = RefreshTimer::new();
        timer.arm(Duration::from_secs(1), tick);
        time::sleep(Duration::from_millis(1500)).await;
        timer.cancel();
        assert!(!timer.is_armed());

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_previous_task() {
        let (old_count, old_tick) = counter();
        let (new_count, new_tick) = counter();
        let mut timer = RefreshTimer::new();
        timer.arm(Duration::from_secs(1), old_tick);
        time::sleep(Duration::from_millis(1500)).await;
        timer.arm(Duration::from_secs(1), new_tick);

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(old_count.load(Ordering::SeqCst), 1);
        assert_eq!(new_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (count, tick) = counter();
        {
            let mut timer = RefreshTimer::new();
            timer.arm(Duration::from_secs(1), tick);
        }
        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        // The closure (and its Arc clone) was dropped with the task.
        assert_eq!(Arc::strong_count(&count), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_publishes_when_both_selected() {
        let mut session = ClockSession::new();
        let mut rx = session.subscribe();

        session.select_first(Some("Korea".into()));
        assert!(session.is_running());
        time::sleep(Duration::from_millis(2500)).await;
        assert!(rx.borrow().is_none(), "half a selection publishes nothing");

        session.select_second(Some("New York".into()));
        time::sleep(Duration::from_millis(1500)).await;
        assert!(rx.has_changed().unwrap());
        let snap = rx.borrow_and_update().clone().unwrap();
        assert_eq!(snap.first.name, "Korea");
        assert_eq!(snap.second.name, "New York");
        assert_eq!(snap.distance, "11052.58 km");
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_unknown_name_keeps_last_snapshot() {
        let mut session = ClockSession::new();
        let mut rx = session.subscribe();
        session.select(Selection::new("Japan", "France"));
        time::sleep(Duration::from_millis(1500)).await;
        let before = rx.borrow_and_update().clone().unwrap();

        session.select_second(Some("Atlantis".into()));
        time::sleep(Duration::from_millis(3500)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow().as_ref(), Some(&before));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_stop() {
        let mut session = ClockSession::new();
        session.select(Selection::new("Toronto", "Vancouver"));
        assert_eq!(session.selection(), Selection::new("Toronto", "Vancouver"));
        session.stop();
        assert!(!session.is_running());
    }
}
