use crate::core::fractals::mandelbrot::errors::MandelbrotError;

pub const DEFAULT_MAX_ITERATIONS: u32 = 256;

/// Radius 4.0 rather than the 3.0 some older renders used; it changes the
/// boundary shading slightly but never misclassifies an escaping point.
pub const DEFAULT_ESCAPE_RADIUS: f64 = 4.0;

/// Iteration cap and escape radius shared by both evaluator backends.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EscapeParams {
    max_iterations: u32,
    escape_radius: f64,
}

impl EscapeParams {
    pub fn new(max_iterations: u32, escape_radius: f64) -> Result<Self, MandelbrotError> {
        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterations);
        }

        if !escape_radius.is_finite() || escape_radius <= 0.0 {
            return Err(MandelbrotError::InvalidEscapeRadius {
                radius: escape_radius,
            });
        }

        Ok(Self {
            max_iterations,
            escape_radius,
        })
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    #[must_use]
    pub fn escape_radius_squared(&self) -> f64 {
        self.escape_radius * self.escape_radius
    }

    /// `iteration / max_iterations` as reported for an escaping point.
    #[inline]
    #[must_use]
    pub fn normalize(&self, iteration: u32) -> f32 {
        iteration as f32 / self.max_iterations as f32
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = EscapeParams::default();

        assert_eq!(params.max_iterations(), 256);
        assert_eq!(params.escape_radius(), 4.0);
        assert_eq!(params.escape_radius_squared(), 16.0);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert_eq!(
            EscapeParams::new(0, 4.0),
            Err(MandelbrotError::ZeroMaxIterations)
        );
    }

    #[test]
    fn test_bad_radius_rejected() {
        for radius in [0.0, -1.0, f64::INFINITY] {
            assert!(matches!(
                EscapeParams::new(10, radius),
                Err(MandelbrotError::InvalidEscapeRadius { .. })
            ));
        }
        assert!(EscapeParams::new(10, f64::NAN).is_err());
    }

    #[test]
    fn test_normalize() {
        let params = EscapeParams::new(256, 4.0).unwrap();

        assert_eq!(params.normalize(0), 0.0);
        assert_eq!(params.normalize(1), 1.0 / 256.0);
        assert_eq!(params.normalize(128), 0.5);
    }
}
