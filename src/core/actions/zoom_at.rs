use crate::core::data::viewport::{Viewport, ViewportError};
use rug::Float;

const ZOOM_FACTOR_DELTA: f64 = 0.1;

/// Fraction of the clicked offset applied per step, so a click drifts the
/// center towards the point instead of jumping onto it.
const OFFSET_DAMPING: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// `0.9` for zoom-in, `1.1` for zoom-out. Not inverses of each other.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::In => 1.0 - ZOOM_FACTOR_DELTA,
            Self::Out => 1.0 + ZOOM_FACTOR_DELTA,
        }
    }
}

/// Size of the screen that click coordinates are measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

/// Moves the viewport towards (or away from) a clicked screen point and
/// zooms one step.
///
/// The click is normalized to `[-1, 1]` on both axes, scaled by the physical
/// extent and damped by 0.2, then added to the center. Scale and physical
/// extent are multiplied by the direction's factor afterwards, so the offset
/// uses the extent from before the zoom. All arithmetic runs at the
/// viewport's precision.
///
/// A non-positive or non-finite screen size, or a non-finite click, is
/// rejected before the viewport is touched.
pub fn zoom_at(
    viewport: &mut Viewport,
    screen: ScreenSize,
    screen_x: f64,
    screen_y: f64,
    direction: ZoomDirection,
) -> Result<(), ViewportError> {
    check_screen("width", screen.width, true)?;
    check_screen("height", screen.height, true)?;
    check_screen("x", screen_x, false)?;
    check_screen("y", screen_y, false)?;

    let bits = viewport.precision().bits();
    let norm_x = (screen_x / screen.width - 0.5) * 2.0;
    let norm_y = (screen_y / screen.height - 0.5) * 2.0;

    let mut offset_x = Float::with_val(bits, norm_x);
    offset_x *= viewport.physical_width();
    offset_x *= OFFSET_DAMPING;

    let mut offset_y = Float::with_val(bits, norm_y);
    offset_y *= viewport.physical_height();
    offset_y *= OFFSET_DAMPING;

    viewport.translate(&offset_x, &offset_y);
    viewport.rescale(direction.factor());
    Ok(())
}

fn check_screen(field: &'static str, value: f64, positive: bool) -> Result<(), ViewportError> {
    if value.is_finite() && (!positive || value > 0.0) {
        Ok(())
    } else {
        Err(ViewportError::InvalidScreen { field, value })
    }
}
