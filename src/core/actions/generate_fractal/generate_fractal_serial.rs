use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::colour_map::ColourMap;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_fractal::progress::RowProgress;
use crate::core::actions::generate_fractal::render_row::render_row;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Renders the rows of `buffer` one after another on the calling thread.
///
/// Same row kernel and progress accounting as
/// [`generate_fractal_parallel_rayon`](super::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon),
/// used as the reference output and for single-threaded callers.
pub fn generate_fractal_serial<Alg, CMap, C, F>(
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
    for (y, row) in buffer.rows().enumerate() {
        render_row(y as u32, row, algorithm, colour_map, cancel)?;
        progress.row_finished();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::colour::Colour;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct RowAlgorithm;

    impl FractalAlgorithm for RowAlgorithm {
        type Row = f32;

        fn prepare_row(&self, y: u32) -> Self::Row {
            y as f32 / 10.0
        }

        fn compute(&self, row: &Self::Row, _x: u32) -> f32 {
            *row
        }
    }

    struct Grey;

    impl ColourMap for Grey {
        fn map(&self, value: f32) -> Colour {
            Colour::grey((value * 100.0) as u8)
        }
    }

    #[test]
    fn test_serial_reports_rows_in_order() {
        let buffer = PixelBuffer::new(3, 4).unwrap();
        let reported = Mutex::new(Vec::new());
        let progress = RowProgress::new(4, Duration::ZERO, |f| reported.lock().unwrap().push(f));

        generate_fractal_serial(&buffer, &RowAlgorithm, &Grey, &NeverCancel, &progress).unwrap();

        assert_eq!(*reported.lock().unwrap(), vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_serial_stops_at_first_cancelled_row() {
        let buffer = PixelBuffer::new(3, 4).unwrap();
        let polls = AtomicUsize::new(0);
        let cancel_token = || polls.fetch_add(1, Ordering::Relaxed) >= 2;
        let progress = RowProgress::silent(4);

        let result = generate_fractal_serial(&buffer, &RowAlgorithm, &Grey, &cancel_token, &progress);

        assert_eq!(result, Err(Cancelled));
        assert_eq!(progress.rows_done(), 2);
        // rows 0 and 1 written, rows 2 and 3 untouched
        let bytes = buffer.to_rgba_bytes();
        assert_eq!(&bytes[12..16], &[10, 10, 10, 255]);
        assert!(bytes[24..].iter().all(|&b| b == 0));
    }
}
