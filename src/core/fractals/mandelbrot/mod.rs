pub mod backend;
pub mod big;
pub mod errors;
pub mod float64;
pub mod palette;
pub mod params;
