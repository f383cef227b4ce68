#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MandelbrotError {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,

    #[error("escape radius must be positive and finite, got {radius}")]
    InvalidEscapeRadius { radius: f64 },
}
