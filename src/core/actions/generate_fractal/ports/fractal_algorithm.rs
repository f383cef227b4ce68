/// Per-pixel escape-time evaluation over a fixed raster.
///
/// `prepare_row` runs once per row so backends can derive the row's world-y
/// (and anything else shared by the row) before the column loop calls
/// `compute` for every pixel.
pub trait FractalAlgorithm: Sync {
    type Row;

    fn prepare_row(&self, y: u32) -> Self::Row;

    /// Normalized escape value in `[0, 1)`; `0` means the point did not
    /// escape.
    fn compute(&self, row: &Self::Row, x: u32) -> f32;
}
