use crate::core::data::precision::Precision;
use rug::Float;
use rug::ops::SubFrom;
use std::cmp::Ordering;

pub const DEFAULT_CENTER_X: f64 = -0.7;
pub const DEFAULT_CENTER_Y: f64 = 0.0;
pub const DEFAULT_SCALE: f64 = 1.0;

/// World extent framed at scale 1.0. Fixes the 3:2 aspect ratio.
pub const REFERENCE_PHYSICAL_WIDTH: f64 = 3.0;
pub const REFERENCE_PHYSICAL_HEIGHT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("viewport {field} must be positive and finite, got {value}")]
    InvalidViewport { field: &'static str, value: f64 },

    #[error("viewport {field} must be finite, got {value}")]
    NonFiniteCenter { field: &'static str, value: f64 },

    #[error("precision must be between {min} and {max} bits, got {bits}")]
    InvalidPrecision { bits: u32, min: u32, max: u32 },

    #[error("screen {field} out of range: {value}")]
    InvalidScreen { field: &'static str, value: f64 },

    #[error("cannot parse viewport {field} from {input:?}")]
    Parse { field: &'static str, input: String },
}

/// The world-space region mapped onto the pixel buffer.
///
/// Every real is rounded to the same [`Precision`] when the viewport is
/// built, and [`Viewport::with_precision`] is the only way to change it, so
/// the fields can never disagree about their bit width.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    precision: Precision,
    center_x: Float,
    center_y: Float,
    scale: Float,
    physical_width: Float,
    physical_height: Float,
}

impl Viewport {
    /// Builds a viewport whose physical extent is the 3×2 reference frame
    /// multiplied by `scale`.
    pub fn new(
        center_x: f64,
        center_y: f64,
        scale: f64,
        precision: Precision,
    ) -> Result<Self, ViewportError> {
        let bits = precision.bits();
        let scale = Float::with_val(bits, scale);

        let physical_width = Float::with_val(bits, &scale * REFERENCE_PHYSICAL_WIDTH);
        let physical_height = Float::with_val(bits, &scale * REFERENCE_PHYSICAL_HEIGHT);

        Self::from_floats(
            Float::with_val(bits, center_x),
            Float::with_val(bits, center_y),
            scale,
            physical_width,
            physical_height,
            precision,
        )
    }

    /// Parses decimal coordinates at full `precision`, for deep zooms whose
    /// center does not survive a round trip through `f64`.
    pub fn parse(
        center_x: &str,
        center_y: &str,
        scale: &str,
        precision: Precision,
    ) -> Result<Self, ViewportError> {
        let bits = precision.bits();
        let scale = parse_float("scale", scale, bits)?;

        let physical_width = Float::with_val(bits, &scale * REFERENCE_PHYSICAL_WIDTH);
        let physical_height = Float::with_val(bits, &scale * REFERENCE_PHYSICAL_HEIGHT);

        Self::from_floats(
            parse_float("center_x", center_x, bits)?,
            parse_float("center_y", center_y, bits)?,
            scale,
            physical_width,
            physical_height,
            precision,
        )
    }

    /// Builds a viewport from explicit parts, re-rounding each one to
    /// `precision`.
    pub fn from_floats(
        center_x: Float,
        center_y: Float,
        scale: Float,
        physical_width: Float,
        physical_height: Float,
        precision: Precision,
    ) -> Result<Self, ViewportError> {
        let bits = precision.bits();
        let viewport = Self {
            precision,
            center_x: Float::with_val(bits, center_x),
            center_y: Float::with_val(bits, center_y),
            scale: Float::with_val(bits, scale),
            physical_width: Float::with_val(bits, physical_width),
            physical_height: Float::with_val(bits, physical_height),
        };

        viewport.validate()?;
        Ok(viewport)
    }

    /// Returns a copy with every field re-rounded to `precision`.
    #[must_use]
    pub fn with_precision(&self, precision: Precision) -> Self {
        let bits = precision.bits();

        Self {
            precision,
            center_x: Float::with_val(bits, &self.center_x),
            center_y: Float::with_val(bits, &self.center_y),
            scale: Float::with_val(bits, &self.scale),
            physical_width: Float::with_val(bits, &self.physical_width),
            physical_height: Float::with_val(bits, &self.physical_height),
        }
    }

    /// Rejects non-positive or non-finite extents and non-finite centers.
    pub fn validate(&self) -> Result<(), ViewportError> {
        check_finite("center_x", &self.center_x)?;
        check_finite("center_y", &self.center_y)?;
        check_positive("scale", &self.scale)?;
        check_positive("physical_width", &self.physical_width)?;
        check_positive("physical_height", &self.physical_height)?;

        Ok(())
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[must_use]
    pub fn center_x(&self) -> &Float {
        &self.center_x
    }

    #[must_use]
    pub fn center_y(&self) -> &Float {
        &self.center_y
    }

    #[must_use]
    pub fn scale(&self) -> &Float {
        &self.scale
    }

    #[must_use]
    pub fn physical_width(&self) -> &Float {
        &self.physical_width
    }

    #[must_use]
    pub fn physical_height(&self) -> &Float {
        &self.physical_height
    }

    /// World coordinate of the top-left corner: `center - extent / 2`.
    #[must_use]
    pub fn top_left(&self) -> (Float, Float) {
        let bits = self.precision.bits();
        let mut min_x = Float::with_val(bits, &self.physical_width / 2u32);
        let mut min_y = Float::with_val(bits, &self.physical_height / 2u32);

        min_x.sub_from(&self.center_x);
        min_y.sub_from(&self.center_y);

        (min_x, min_y)
    }

    pub(crate) fn translate(&mut self, offset_x: &Float, offset_y: &Float) {
        self.center_x += offset_x;
        self.center_y += offset_y;
    }

    /// Multiplies scale and both physical extents by the same factor.
    pub(crate) fn rescale(&mut self, factor: f64) {
        self.scale *= factor;
        self.physical_width *= factor;
        self.physical_height *= factor;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let bits = Precision::DEFAULT.bits();

        Self {
            precision: Precision::DEFAULT,
            center_x: Float::with_val(bits, DEFAULT_CENTER_X),
            center_y: Float::with_val(bits, DEFAULT_CENTER_Y),
            scale: Float::with_val(bits, DEFAULT_SCALE),
            physical_width: Float::with_val(bits, REFERENCE_PHYSICAL_WIDTH),
            physical_height: Float::with_val(bits, REFERENCE_PHYSICAL_HEIGHT),
        }
    }
}

fn parse_float(field: &'static str, input: &str, bits: u32) -> Result<Float, ViewportError> {
    Float::parse(input.trim())
        .map(|parsed| Float::with_val(bits, parsed))
        .map_err(|_| ViewportError::Parse {
            field,
            input: input.to_owned(),
        })
}

fn check_finite(field: &'static str, value: &Float) -> Result<(), ViewportError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ViewportError::NonFiniteCenter {
            field,
            value: value.to_f64(),
        })
    }
}

fn check_positive(field: &'static str, value: &Float) -> Result<(), ViewportError> {
    if value.is_finite() && value.cmp0() == Some(Ordering::Greater) {
        Ok(())
    } else {
        Err(ViewportError::InvalidViewport {
            field,
            value: value.to_f64(),
        })
    }
}
