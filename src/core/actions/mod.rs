pub mod cancellation;
pub mod generate_fractal;
pub mod zoom_at;
pub mod zoom_sequence;
