use crate::controllers::generation::config::EngineConfig;
use crate::controllers::generation::refresh_signal::RefreshSignal;
use crate::controllers::generation::render_target::RenderTarget;
use crate::controllers::generation::session::{
    GenerateError, GenerationHandle, GenerationOutcome, generate,
};
use crate::core::actions::zoom_at::{ScreenSize, ZoomDirection, zoom_at};
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::backend::{Backend, ParseBackendError};
use std::sync::Arc;
use std::thread;

/// Interactive surface driven by a window layer: owns the live viewport,
/// zooms on clicks and keeps one generation session running against its
/// render target.
pub struct Explorer {
    config: EngineConfig,
    backend: Backend,
    viewport: Viewport,
    target: Arc<RenderTarget>,
    signal: RefreshSignal,
    current: Option<GenerationHandle>,
}

impl Explorer {
    pub fn new(
        width: u32,
        height: u32,
        viewport: Viewport,
        backend: Backend,
        config: EngineConfig,
    ) -> Result<Self, GenerateError> {
        viewport.validate()?;

        Ok(Self {
            config,
            backend,
            viewport,
            target: Arc::new(RenderTarget::new(width, height)?),
            signal: RefreshSignal::new(),
            current: None,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
    }

    /// Switches backend by name for the next session; `"big"` runs at the
    /// config's `big_precision`.
    pub fn select_backend(&mut self, name: &str) -> Result<Backend, ParseBackendError> {
        self.backend = self.config.backend(name)?;
        Ok(self.backend)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn target(&self) -> &Arc<RenderTarget> {
        &self.target
    }

    #[must_use]
    pub fn signal(&self) -> &RefreshSignal {
        &self.signal
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.signal.is_generating()
    }

    /// Starts a session for the current viewport, superseding the previous
    /// one.
    pub fn regenerate(&mut self) -> Result<(), GenerateError> {
        self.signal.session_started();

        let progress_signal = self.signal.clone();
        let done_signal = self.signal.clone();
        let result = generate(
            &self.target,
            &self.viewport,
            self.backend,
            &self.config,
            move |_| progress_signal.mark_dirty(),
            move |_| done_signal.session_finished(),
        );

        match result {
            Ok(handle) => {
                self.current = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.signal.session_rejected();
                Err(err)
            }
        }
    }

    /// Zooms one step towards the clicked screen position and regenerates.
    /// A non-finite click leaves the viewport as it was.
    pub fn click(
        &mut self,
        screen_x: f64,
        screen_y: f64,
        direction: ZoomDirection,
    ) -> Result<(), GenerateError> {
        let screen = ScreenSize {
            width: f64::from(self.target.width()),
            height: f64::from(self.target.height()),
        };

        zoom_at(&mut self.viewport, screen, screen_x, screen_y, direction)?;
        self.regenerate()
    }

    /// RGBA bytes of the current buffer when a refresh is due, `None`
    /// otherwise. Pass `timer_tick` on the render loop's periodic timer.
    pub fn poll_frame(&self, timer_tick: bool) -> Option<Vec<u8>> {
        self.signal
            .poll(timer_tick)
            .then(|| self.target.buffer().to_rgba_bytes())
    }

    /// Copies the current buffer into `frame` when a refresh is due. Returns
    /// whether anything was copied.
    pub fn write_frame(&self, frame: &mut [u8], timer_tick: bool) -> Result<bool, GenerateError> {
        let buffer = self.target.buffer();

        if frame.len() != buffer.byte_len() {
            return Err(GenerateError::BufferMismatch {
                width: buffer.width(),
                height: buffer.height(),
                expected: buffer.byte_len(),
                actual: frame.len(),
            });
        }

        if !self.signal.poll(timer_tick) {
            return Ok(false);
        }

        frame.copy_from_slice(&buffer.to_rgba_bytes());

        Ok(true)
    }

    /// Blocks until the latest session has finished.
    pub fn wait(&mut self) -> Option<thread::Result<GenerationOutcome>> {
        self.current.take().map(GenerationHandle::wait)
    }

    /// Cancels the latest session without waiting for it.
    pub fn cancel(&self) {
        if let Some(handle) = &self.current {
            handle.cancel();
        }
    }
}
