pub mod explorer;
pub mod generation;
