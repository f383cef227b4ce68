pub mod config;
pub mod refresh_signal;
pub mod render_target;
pub mod session;
