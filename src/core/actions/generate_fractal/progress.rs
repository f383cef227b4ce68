use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Counts finished rows and forwards `rows_done / total_rows` to a callback,
/// at most once per `interval`.
///
/// The row counter is bumped for every row; only the callback is throttled.
/// Called concurrently from row tasks, so the callback must be `Sync`.
pub struct RowProgress<F> {
    on_progress: F,
    total_rows: u32,
    rows_done: AtomicU32,
    started: Instant,
    interval: Duration,
    last_notified_ms: AtomicU64,
}

impl<F> RowProgress<F>
where
    F: Fn(f32) + Sync,
{
    pub fn new(total_rows: u32, interval: Duration, on_progress: F) -> Self {
        Self {
            on_progress,
            total_rows,
            rows_done: AtomicU32::new(0),
            started: Instant::now(),
            interval,
            last_notified_ms: AtomicU64::new(0),
        }
    }

    /// Records a finished row. Returns whether the callback was invoked.
    pub fn row_finished(&self) -> bool {
        let done = self.rows_done.fetch_add(1, Ordering::AcqRel) + 1;

        if !self.claim_notification() {
            return false;
        }

        let fraction = done as f32 / self.total_rows as f32;
        log::trace!("progress {}/{} rows", done, self.total_rows);
        (self.on_progress)(fraction);
        true
    }

    #[must_use]
    pub fn rows_done(&self) -> u32 {
        self.rows_done.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn total_rows(&self) -> u32 {
        self.total_rows
    }

    fn claim_notification(&self) -> bool {
        if self.interval.is_zero() {
            return true;
        }

        let now_ms = millis(self.started.elapsed());
        let last_ms = self.last_notified_ms.load(Ordering::Acquire);

        if now_ms.saturating_sub(last_ms) < millis(self.interval) {
            return false;
        }

        // Losing the race means another row just notified for this window.
        self.last_notified_ms
            .compare_exchange(last_ms, now_ms, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl RowProgress<fn(f32)> {
    /// Counts rows without reporting them anywhere.
    #[must_use]
    pub fn silent(total_rows: u32) -> Self {
        Self::new(total_rows, Duration::MAX, |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;

    #[test]
    fn zero_interval_reports_every_row() {
        let reported = Mutex::new(Vec::new());
        let progress = RowProgress::new(4, Duration::ZERO, |f| reported.lock().unwrap().push(f));

        for _ in 0..4 {
            assert!(progress.row_finished());
        }

        assert_eq!(*reported.lock().unwrap(), vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn throttle_suppresses_callbacks_but_not_counting() {
        let calls = AtomicU32::new(0);
        let progress = RowProgress::new(100, Duration::from_secs(3600), |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        });

        for _ in 0..100 {
            progress.row_finished();
        }

        assert_eq!(progress.rows_done(), 100);
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn notifies_again_once_interval_has_passed() {
        let calls = AtomicU32::new(0);
        let progress = RowProgress::new(3, Duration::from_millis(200), |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        });

        thread::sleep(Duration::from_millis(250));
        assert!(progress.row_finished());
        assert!(!progress.row_finished());

        thread::sleep(Duration::from_millis(250));
        assert!(progress.row_finished());
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn concurrent_rows_are_never_lost() {
        let progress = RowProgress::new(800, Duration::from_millis(100), |_| {});

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        progress.row_finished();
                    }
                });
            }
        });

        assert_eq!(progress.rows_done(), 800);
    }

    #[test]
    fn silent_progress_only_counts() {
        let progress = RowProgress::silent(2);

        assert!(!progress.row_finished());
        assert!(!progress.row_finished());
        assert_eq!(progress.rows_done(), progress.total_rows());
    }
}
