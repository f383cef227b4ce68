use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::colour_map::ColourMap;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_buffer::store_pixel;
use std::sync::atomic::AtomicU32;

/// Evaluates and colours every pixel of row `y`.
///
/// Only this row's slots are touched. The token is polled at the start of
/// the row and every [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels after that.
pub(crate) fn render_row<Alg, CMap, C>(
    y: u32,
    row: &[AtomicU32],
    algorithm: &Alg,
    colour_map: &CMap,
    cancel: &C,
) -> Result<(), Cancelled>
where
    Alg: FractalAlgorithm,
    CMap: ColourMap,
    C: CancelToken,
{
    let prepared = algorithm.prepare_row(y);

    for (x, slot) in row.iter().enumerate() {
        if x % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
            return Err(Cancelled);
        }

        let value = algorithm.compute(&prepared, x as u32);
        store_pixel(slot, colour_map.map(value));
    }

    Ok(())
}
