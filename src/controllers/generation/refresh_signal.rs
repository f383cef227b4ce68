use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
}

#[derive(Debug, Default)]
struct SignalState {
    active_sessions: u32,
    needs_refresh: bool,
}

impl SignalState {
    fn generation_state(&self) -> GenerationState {
        if self.active_sessions > 0 {
            GenerationState::Generating
        } else {
            GenerationState::Idle
        }
    }
}

/// Tells the render loop when the pixel buffer is worth uploading again.
///
/// Generation threads mark it from their progress and completion callbacks;
/// the render loop clears it. The generating state lives behind the same lock
/// as the refresh flag, so a reader never sees one updated without the other.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RefreshSignal {
    state: Arc<Mutex<SignalState>>,
}

impl RefreshSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `Idle -> Generating`. Sessions may overlap while a superseded one
    /// drains; the state stays `Generating` until every one has finished.
    pub fn session_started(&self) {
        self.lock().active_sessions += 1;
    }

    /// Called from progress callbacks.
    pub fn mark_dirty(&self) {
        self.lock().needs_refresh = true;
    }

    /// Called once per session from its completion callback.
    pub fn session_finished(&self) {
        let mut state = self.lock();
        state.active_sessions = state.active_sessions.saturating_sub(1);
        state.needs_refresh = true;
    }

    /// Undoes [`session_started`](Self::session_started) for a session that
    /// was rejected before writing anything.
    pub fn session_rejected(&self) {
        let mut state = self.lock();
        state.active_sessions = state.active_sessions.saturating_sub(1);
    }

    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.lock().generation_state()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.state() == GenerationState::Generating
    }

    /// Returns and clears the refresh flag. Called once per display frame.
    pub fn take_refresh(&self) -> bool {
        std::mem::take(&mut self.lock().needs_refresh)
    }

    /// Per-frame check plus the render loop's periodic timer: on a timer tick
    /// a running generation always counts as a refresh, since the progress
    /// throttle may have swallowed the last notification.
    pub fn poll(&self, timer_tick: bool) -> bool {
        let mut state = self.lock();
        let generating = state.generation_state() == GenerationState::Generating;

        std::mem::take(&mut state.needs_refresh) || (timer_tick && generating)
    }

    fn lock(&self) -> MutexGuard<'_, SignalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
