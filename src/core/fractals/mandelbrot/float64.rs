use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::params::EscapeParams;
use rug::Float;

/// Escape-time value of `c` using native doubles.
///
/// Returns `i / max_iterations` for the first iteration `i` whose iterate lies
/// outside the escape radius, or `0.0` when the cap is reached.
#[inline]
#[must_use]
pub fn escape_time_f64(c: Complex, params: &EscapeParams) -> f32 {
    let radius_squared = params.escape_radius_squared();
    let mut z = Complex::ZERO;

    for iteration in 0..params.max_iterations() {
        if z.magnitude_squared() > radius_squared {
            return params.normalize(iteration);
        }
        z = z.square() + c;
    }

    0.0
}

/// Maps pixels to world coordinates in `f64` and evaluates them with
/// [`escape_time_f64`].
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotFloat64 {
    min_x: f64,
    min_y: f64,
    step_x: f64,
    step_y: f64,
    params: EscapeParams,
}

impl MandelbrotFloat64 {
    /// Precomputes the top-left corner and per-pixel steps for a
    /// `width` x `height` raster of `viewport`.
    ///
    /// The division happens at the viewport's precision; only the results are
    /// rounded to `f64`.
    #[must_use]
    pub fn new(viewport: &Viewport, width: u32, height: u32, params: EscapeParams) -> Self {
        let bits = viewport.precision().bits();
        let (min_x, min_y) = viewport.top_left();
        let step_x = Float::with_val(bits, viewport.physical_width() / width);
        let step_y = Float::with_val(bits, viewport.physical_height() / height);

        Self {
            min_x: min_x.to_f64(),
            min_y: min_y.to_f64(),
            step_x: step_x.to_f64(),
            step_y: step_y.to_f64(),
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &EscapeParams {
        &self.params
    }
}

impl FractalAlgorithm for MandelbrotFloat64 {
    type Row = f64;

    fn prepare_row(&self, y: u32) -> Self::Row {
        self.min_y + f64::from(y) * self.step_y
    }

    fn compute(&self, world_y: &Self::Row, x: u32) -> f32 {
        let world_x = self.min_x + f64::from(x) * self.step_x;
        escape_time_f64(Complex::new(world_x, *world_y), &self.params)
    }
}
