use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A pixel buffer that generation sessions take turns writing into.
///
/// Every session registers itself with [`begin_session`](Self::begin_session),
/// which invalidates whatever session was registered before. Row tasks of a
/// superseded session observe this through their cancel token and stop. The
/// pass lock makes the new session wait until the old one has drained, so two
/// sessions never write the same buffer at once.
#[derive(Debug)]
pub struct RenderTarget {
    buffer: PixelBuffer,
    latest_session: AtomicU64,
    pass: Mutex<()>,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Result<Self, PixelBufferError> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height)?,
            latest_session: AtomicU64::new(0),
            pass: Mutex::new(()),
        })
    }

    /// Safe to read at any time; rows of a running session show up as they
    /// finish.
    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Id of the most recently started session, `0` before the first one.
    #[must_use]
    pub fn latest_session(&self) -> u64 {
        self.latest_session.load(Ordering::Acquire)
    }

    pub(crate) fn begin_session(&self) -> u64 {
        self.latest_session.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[inline]
    pub(crate) fn is_superseded(&self, session: u64) -> bool {
        self.latest_session.load(Ordering::Relaxed) != session
    }

    /// Held by a session for the whole raster pass.
    pub(crate) fn lock_pass(&self) -> MutexGuard<'_, ()> {
        // the guarded value is `()`, a panicking pass leaves nothing torn
        self.pass.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_target_has_no_sessions() {
        let target = RenderTarget::new(4, 3).unwrap();

        assert_eq!(target.latest_session(), 0);
        assert_eq!((target.width(), target.height()), (4, 3));
    }

    #[test]
    fn test_rejects_empty_buffer() {
        assert_eq!(
            RenderTarget::new(0, 3).unwrap_err(),
            PixelBufferError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    fn test_new_session_supersedes_previous() {
        let target = RenderTarget::new(1, 1).unwrap();

        let first = target.begin_session();
        assert!(!target.is_superseded(first));

        let second = target.begin_session();
        assert!(second > first);
        assert!(target.is_superseded(first));
        assert!(!target.is_superseded(second));
        assert_eq!(target.latest_session(), second);
    }

    #[test]
    fn test_pass_lock_serializes_passes() {
        let target = Arc::new(RenderTarget::new(1, 1).unwrap());
        let first_done = Arc::new(AtomicBool::new(false));

        let guard = target.lock_pass();
        let waiter = {
            let target = Arc::clone(&target);
            let first_done = Arc::clone(&first_done);
            thread::spawn(move || {
                let _guard = target.lock_pass();
                first_done.load(Ordering::Acquire)
            })
        };

        thread::sleep(Duration::from_millis(50));
        first_done.store(true, Ordering::Release);
        drop(guard);

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_poisoned_pass_lock_is_recovered() {
        let target = Arc::new(RenderTarget::new(1, 1).unwrap());

        let poisoner = Arc::clone(&target);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock_pass();
            panic!("row task panicked");
        })
        .join();

        drop(target.lock_pass());
    }
}
