use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::colour_map::ColourMap;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_fractal::progress::RowProgress;
use crate::core::actions::generate_fractal::render_row::render_row;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Renders every row of `buffer` in parallel on rayon's work-stealing pool.
///
/// Each row is one task: it evaluates its pixels, maps them through
/// `colour_map` and writes them into its own row, so no task touches another
/// task's pixels. Finished rows are counted through `progress`.
///
/// Returns [`Cancelled`] as soon as a row observes `cancel`; rows already in
/// flight finish, rows not yet started are skipped. The buffer then holds a
/// mix of old and new rows.
pub fn generate_fractal_parallel_rayon<Alg, CMap, C, F>(
    buffer: &PixelBuffer,
    algorithm: &Alg,
    colour_map: &CMap,
    cancel: &C,
    progress: &RowProgress<F>,
) -> Result<(), Cancelled>
where
    Alg: FractalAlgorithm,
    CMap: ColourMap,
    C: CancelToken,
    F: Fn(f32) + Sync,
{
    let width = buffer.width() as usize;

    buffer
        .pixels()
        .par_chunks(width)
        .enumerate()
        .try_for_each(|(y, row)| {
            render_row(y as u32, row, algorithm, colour_map, cancel)?;
            progress.row_finished();
            Ok(())
        })
}
