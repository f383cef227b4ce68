use crate::core::actions::generate_fractal::progress::DEFAULT_PROGRESS_INTERVAL;
use crate::core::data::precision::Precision;
use crate::core::fractals::mandelbrot::backend::{Backend, ParseBackendError};
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::palette::{Palette, PaletteError, PaletteKind};
use crate::core::fractals::mandelbrot::params::{
    DEFAULT_ESCAPE_RADIUS, DEFAULT_MAX_ITERATIONS, EscapeParams,
};
use std::time::Duration;

pub const DEFAULT_PALETTE_SIZE: usize = 256;

/// Knobs shared by every generation session.
///
/// Setters store values as given; [`generate`](super::session::generate)
/// validates them before any row task starts.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub palette_size: usize,
    pub palette_kind: PaletteKind,
    pub progress_interval: Duration,
    /// Precision [`backend`](Self::backend) gives the `"big"` backend.
    pub big_precision: Precision,
    /// Rows on rayon's pool, or one after another on the session thread.
    pub parallel: bool,
}

impl EngineConfig {
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_escape_radius(mut self, escape_radius: f64) -> Self {
        self.escape_radius = escape_radius;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, kind: PaletteKind, size: usize) -> Self {
        self.palette_kind = kind;
        self.palette_size = size;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    #[must_use]
    pub fn with_big_precision(mut self, precision: Precision) -> Self {
        self.big_precision = precision;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolves a backend name, giving `"big"` this config's
    /// `big_precision`.
    pub fn backend(&self, name: &str) -> Result<Backend, ParseBackendError> {
        Ok(match name.parse()? {
            Backend::Float64 => Backend::Float64,
            Backend::Big { .. } => Backend::Big {
                precision: self.big_precision,
            },
        })
    }

    pub fn escape_params(&self) -> Result<EscapeParams, MandelbrotError> {
        EscapeParams::new(self.max_iterations, self.escape_radius)
    }

    pub fn palette(&self) -> Result<Palette, PaletteError> {
        self.palette_kind.build(self.palette_size)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            palette_size: DEFAULT_PALETTE_SIZE,
            palette_kind: PaletteKind::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            big_precision: Precision::DEFAULT,
            parallel: true,
        }
    }
}
