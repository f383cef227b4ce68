use crate::controllers::generation::config::EngineConfig;
use crate::controllers::generation::render_target::RenderTarget;
use crate::core::actions::cancellation::{CancelFlag, CancelToken, Cancelled};
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_fractal::progress::RowProgress;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::mandelbrot::backend::Backend;
use crate::core::fractals::mandelbrot::big::MandelbrotBig;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::float64::MandelbrotFloat64;
use crate::core::fractals::mandelbrot::palette::{Palette, PaletteError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Every row was written.
    Completed,
    /// Stopped through [`GenerationHandle::cancel`] or by a newer session on
    /// the same target. The buffer holds a mix of old and new rows.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Viewport(#[from] ViewportError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Escape(#[from] MandelbrotError),

    #[error(transparent)]
    PixelBuffer(#[from] PixelBufferError),

    #[error("frame of {actual} bytes does not match {width}x{height} buffer of {expected} bytes")]
    BufferMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// The evaluator a session was launched with, already bound to its viewport
/// snapshot and raster size.
#[derive(Debug, Clone)]
enum Evaluator {
    Float64(MandelbrotFloat64),
    Big(MandelbrotBig),
}

impl Evaluator {
    fn new(backend: Backend, viewport: &Viewport, width: u32, height: u32, config: &EngineConfig) -> Result<Self, GenerateError> {
        viewport.validate()?;
        let params = config.escape_params()?;

        Ok(match backend {
            Backend::Float64 => Self::Float64(MandelbrotFloat64::new(viewport, width, height, params)),
            Backend::Big { precision } => {
                let snapshot = viewport.with_precision(precision);
                Self::Big(MandelbrotBig::new(&snapshot, width, height, params))
            }
        })
    }

    fn raster<C, F>(
        &self,
        buffer: &PixelBuffer,
        palette: &Palette,
        cancel: &C,
        progress: &RowProgress<F>,
        parallel: bool,
    ) -> Result<(), Cancelled>
    where
        C: CancelToken,
        F: Fn(f32) + Sync,
    {
        match self {
            Self::Float64(algorithm) => raster(buffer, algorithm, palette, cancel, progress, parallel),
            Self::Big(algorithm) => raster(buffer, algorithm, palette, cancel, progress, parallel),
        }
    }
}

fn raster<Alg, C, F>(
    buffer: &PixelBuffer,
    algorithm: &Alg,
    palette: &Palette,
    cancel: &C,
    progress: &RowProgress<F>,
    parallel: bool,
) -> Result<(), Cancelled>
where
    Alg: FractalAlgorithm,
    C: CancelToken,
    F: Fn(f32) + Sync,
{
    if parallel {
        generate_fractal_parallel_rayon(buffer, algorithm, palette, cancel, progress)
    } else {
        generate_fractal_serial(buffer, algorithm, palette, cancel, progress)
    }
}

/// A running (or finished) session started by [`generate`].
///
/// Dropping the handle detaches the session; it keeps running and still
/// calls its completion callback.
#[derive(Debug)]
pub struct GenerationHandle {
    session: u64,
    cancel: CancelFlag,
    thread: JoinHandle<GenerationOutcome>,
}

impl GenerationHandle {
    #[must_use]
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Asks the session to stop. Rows already in flight still finish.
    pub fn cancel(&self) {
        log::debug!("session {} cancel requested", self.session);
        self.cancel.cancel();
    }

    /// `true` once the completion callback has returned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the session has finished. `Err` carries the panic payload
    /// of a panicking callback.
    pub fn wait(self) -> thread::Result<GenerationOutcome> {
        self.thread.join()
    }
}

/// Launches one raster pass of `viewport` into `target` and returns without
/// waiting for it.
///
/// The viewport is captured before this returns, so the caller may keep
/// mutating its own copy. Escape parameters and the palette are validated
/// here; nothing runs if they are invalid.
///
/// `on_progress` is called with the fraction of finished rows, from any row
/// task's thread, at most once per `config.progress_interval`. `on_done` is
/// called exactly once, after every row task of this session has stopped.
///
/// Starting a session supersedes any session still running on `target`: the
/// older one is cancelled, and this one waits for it to drain before it
/// writes a single pixel.
pub fn generate<P, D>(
    target: &Arc<RenderTarget>,
    viewport: &Viewport,
    backend: Backend,
    config: &EngineConfig,
    on_progress: P,
    on_done: D,
) -> Result<GenerationHandle, GenerateError>
where
    P: Fn(f32) + Send + Sync + 'static,
    D: FnOnce(GenerationOutcome) + Send + 'static,
{
    let (width, height) = (target.width(), target.height());
    let evaluator = Evaluator::new(backend, viewport, width, height, config)?;
    let palette = config.palette()?;

    let session = target.begin_session();
    log::debug!(
        "session {session} started: {backend}, {width}x{height}, {} iterations",
        config.max_iterations
    );

    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();
    let worker_target = Arc::clone(target);
    let interval = config.progress_interval;
    let parallel = config.parallel;

    let thread = thread::spawn(move || {
        let progress = RowProgress::new(height, interval, on_progress);
        let outcome = run_session(
            &worker_target,
            session,
            &evaluator,
            &palette,
            &worker_cancel,
            &progress,
            parallel,
        );
        on_done(outcome);
        outcome
    });

    Ok(GenerationHandle {
        session,
        cancel,
        thread,
    })
}

fn run_session<F>(
    target: &RenderTarget,
    session: u64,
    evaluator: &Evaluator,
    palette: &Palette,
    cancel: &CancelFlag,
    progress: &RowProgress<F>,
    parallel: bool,
) -> GenerationOutcome
where
    F: Fn(f32) + Sync,
{
    let _pass = target.lock_pass();
    let cancel_token = || cancel.is_cancelled() || target.is_superseded(session);

    let start = Instant::now();
    let result = evaluator.raster(target.buffer(), palette, &cancel_token, progress, parallel);

    match result {
        Ok(()) => {
            log::info!(
                "session {session} generated {}x{} in {:?}",
                target.width(),
                target.height(),
                start.elapsed()
            );
            GenerationOutcome::Completed
        }
        Err(Cancelled) => {
            let reason = if target.is_superseded(session) {
                "superseded"
            } else {
                "cancelled"
            };
            log::debug!(
                "session {session} {reason} after {}/{} rows",
                progress.rows_done(),
                progress.total_rows()
            );
            GenerationOutcome::Cancelled
        }
    }
}

/// Renders `viewport` into `buffer` and blocks until the pass is over.
///
/// Same validation and evaluation as [`generate`], for batch callers that own
/// their buffer outright.
pub fn generate_into<C, F>(
    buffer: &PixelBuffer,
    viewport: &Viewport,
    backend: Backend,
    config: &EngineConfig,
    cancel: &C,
    on_progress: F,
) -> Result<GenerationOutcome, GenerateError>
where
    C: CancelToken,
    F: Fn(f32) + Sync,
{
    let evaluator = Evaluator::new(backend, viewport, buffer.width(), buffer.height(), config)?;
    let palette = config.palette()?;
    let progress = RowProgress::new(buffer.height(), config.progress_interval, on_progress);

    Ok(
        match evaluator.raster(buffer, &palette, cancel, &progress, config.parallel) {
            Ok(()) => GenerationOutcome::Completed,
            Err(Cancelled) => GenerationOutcome::Cancelled,
        },
    )
}
