use crate::core::data::colour::Colour;

/// Maps a normalized escape value in `[0, 1)` to a display colour.
pub trait ColourMap: Sync {
    fn map(&self, value: f32) -> Colour;
}
