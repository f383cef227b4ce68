mod controllers;
mod core;

pub use crate::controllers::explorer::Explorer;
pub use crate::controllers::generation::config::{DEFAULT_PALETTE_SIZE, EngineConfig};
pub use crate::controllers::generation::refresh_signal::{GenerationState, RefreshSignal};
pub use crate::controllers::generation::render_target::RenderTarget;
pub use crate::controllers::generation::session::{
    GenerateError, GenerationHandle, GenerationOutcome, generate, generate_into,
};

pub use crate::core::actions::cancellation::{CancelFlag, CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
pub use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
pub use crate::core::actions::generate_fractal::ports::colour_map::ColourMap;
pub use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::generate_fractal::progress::{DEFAULT_PROGRESS_INTERVAL, RowProgress};
pub use crate::core::actions::zoom_at::{ScreenSize, ZoomDirection, zoom_at};
pub use crate::core::actions::zoom_sequence::zoom_sequence;

pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer, PixelBufferError};
pub use crate::core::data::point::Point;
pub use crate::core::data::precision::Precision;
pub use crate::core::data::viewport::{Viewport, ViewportError};

pub use crate::core::fractals::mandelbrot::backend::{Backend, ParseBackendError};
pub use crate::core::fractals::mandelbrot::big::{MandelbrotBig, escape_time_big};
pub use crate::core::fractals::mandelbrot::errors::MandelbrotError;
pub use crate::core::fractals::mandelbrot::float64::{MandelbrotFloat64, escape_time_f64};
pub use crate::core::fractals::mandelbrot::palette::{Palette, PaletteError, PaletteKind};
pub use crate::core::fractals::mandelbrot::params::{
    DEFAULT_ESCAPE_RADIUS, DEFAULT_MAX_ITERATIONS, EscapeParams,
};
