use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::precision::Precision;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::params::EscapeParams;
use rug::{Assign, Float};

/// Escape-time value of `x + iy` at the precision of `x`.
///
/// Same contract as [`escape_time_f64`](super::float64::escape_time_f64).
/// The magnitude test compares `re² + im²` against the squared radius, so no
/// square root is taken per iteration.
#[must_use]
pub fn escape_time_big(x: &Float, y: &Float, params: &EscapeParams) -> f32 {
    let bits = x.prec();
    let radius_squared = Float::with_val(bits, params.escape_radius_squared());

    let mut zr = Float::new(bits);
    let mut zi = Float::new(bits);
    let mut zr2 = Float::new(bits);
    let mut zi2 = Float::new(bits);
    let mut norm = Float::new(bits);

    for iteration in 0..params.max_iterations() {
        zr2.assign(zr.square_ref());
        zi2.assign(zi.square_ref());
        norm.assign(&zr2 + &zi2);

        if norm > radius_squared {
            return params.normalize(iteration);
        }

        // zi = 2·zr·zi + y, zr = zr² - zi² + x
        zi *= &zr;
        zi *= 2u32;
        zi += y;
        zr.assign(&zr2 - &zi2);
        zr += x;
    }

    0.0
}

/// Arbitrary-precision counterpart of
/// [`MandelbrotFloat64`](super::float64::MandelbrotFloat64).
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotBig {
    precision: Precision,
    min_x: Float,
    min_y: Float,
    step_x: Float,
    step_y: Float,
    params: EscapeParams,
}

impl MandelbrotBig {
    /// `viewport` must already carry the precision the evaluation should run
    /// at; see [`Viewport::with_precision`].
    #[must_use]
    pub fn new(viewport: &Viewport, width: u32, height: u32, params: EscapeParams) -> Self {
        let precision = viewport.precision();
        let bits = precision.bits();
        let (min_x, min_y) = viewport.top_left();

        Self {
            precision,
            min_x,
            min_y,
            step_x: Float::with_val(bits, viewport.physical_width() / width),
            step_y: Float::with_val(bits, viewport.physical_height() / height),
            params,
        }
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[must_use]
    pub fn params(&self) -> &EscapeParams {
        &self.params
    }
}

impl FractalAlgorithm for MandelbrotBig {
    type Row = Float;

    fn prepare_row(&self, y: u32) -> Self::Row {
        let mut world_y = Float::with_val(self.precision.bits(), &self.step_y * y);
        world_y += &self.min_y;
        world_y
    }

    fn compute(&self, world_y: &Self::Row, x: u32) -> f32 {
        let mut world_x = Float::with_val(self.precision.bits(), &self.step_x * x);
        world_x += &self.min_x;
        escape_time_big(&world_x, world_y, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use crate::core::fractals::mandelbrot::float64::{escape_time_f64, MandelbrotFloat64};

    fn big(value: f64) -> Float {
        Float::with_val(128, value)
    }

    /// At 53 bits every rounding step matches the `f64` recurrence exactly.
    fn double(value: f64) -> Float {
        Float::with_val(Precision::F64.bits(), value)
    }

    #[test]
    fn test_origin_is_in_set() {
        let params = EscapeParams::new(64, 3.0).unwrap();

        assert_eq!(escape_time_big(&big(0.0), &big(0.0), &params), 0.0);
    }

    #[test]
    fn test_far_point_escapes_after_first_iteration() {
        let params = EscapeParams::default();

        assert_eq!(escape_time_big(&big(10.0), &big(10.0), &params), 1.0 / 256.0);
    }

    #[test]
    fn test_uses_both_components_in_norm() {
        // |c|² = 9 + 9 = 18 > 16, but neither component alone exceeds 4
        let params = EscapeParams::new(10, 4.0).unwrap();

        assert_eq!(escape_time_big(&big(3.0), &big(3.0), &params), 0.1);
        assert_eq!(
            escape_time_big(&big(3.0), &big(3.0), &params),
            escape_time_f64(Complex::new(3.0, 3.0), &params)
        );
    }

    #[test]
    fn test_agrees_with_float64_on_sample_grid() {
        let params = EscapeParams::new(100, 4.0).unwrap();

        for i in 0..30 {
            for j in 0..20 {
                let x = -2.2 + i as f64 * 0.1;
                let y = -1.0 + j as f64 * 0.1;
                assert_eq!(
                    escape_time_big(&double(x), &double(y), &params),
                    escape_time_f64(Complex::new(x, y), &params),
                    "at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_default_frame_matches_float64_backend() {
        let viewport = Viewport::default().with_precision(Precision::F64);
        let params = EscapeParams::default();
        let fast = MandelbrotFloat64::new(&viewport, 64, 48, params);
        let slow = MandelbrotBig::new(&viewport, 64, 48, params);

        for y in [0, 7, 24, 47] {
            let (fast_row, slow_row) = (fast.prepare_row(y), slow.prepare_row(y));
            for x in [0, 13, 32, 63] {
                assert_eq!(fast.compute(&fast_row, x), slow.compute(&slow_row, x));
            }
        }
    }

    #[test]
    fn test_rows_use_viewport_precision() {
        let viewport = Viewport::default().with_precision(Precision::new(256).unwrap());
        let algorithm = MandelbrotBig::new(&viewport, 10, 10, EscapeParams::default());

        assert_eq!(algorithm.precision().bits(), 256);
        assert_eq!(algorithm.prepare_row(3).prec(), 256);
    }

    #[test]
    fn test_deep_zoom_distinguishes_pixels_float64_cannot() {
        // pixel step of 1e-20 around a point is below f64 resolution
        let viewport = Viewport::parse(
            "-0.743643887037158704752191506114774",
            "0.131825904205311970493132056385139",
            "1e-20",
            Precision::new(192).unwrap(),
        )
        .unwrap();
        let algorithm = MandelbrotBig::new(&viewport, 4, 4, EscapeParams::default());
        let row = algorithm.prepare_row(0);

        let x0 = Float::with_val(192, &algorithm.step_x * 0u32) + &algorithm.min_x;
        let x1 = Float::with_val(192, &algorithm.step_x * 1u32) + &algorithm.min_x;
        assert_ne!(x0, x1);
        assert_eq!(x0.to_f64(), x1.to_f64());
        assert!((0.0..1.0).contains(&algorithm.compute(&row, 1)));
    }
}
