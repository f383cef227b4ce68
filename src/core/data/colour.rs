#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const BLACK: Self = Self::grey(0);
    pub const WHITE: Self = Self::grey(255);

    /// Opaque grey with all three channels set to `value`.
    #[must_use]
    pub const fn grey(value: u8) -> Self {
        Self {
            r: value,
            g: value,
            b: value,
            a: 255,
        }
    }

    /// Packs the colour as little-endian RGBA so that `to_le_bytes` yields
    /// `[r, g, b, a]`.
    #[must_use]
    pub const fn to_packed(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grey_is_opaque() {
        let colour = Colour::grey(42);

        assert_eq!(colour, Colour { r: 42, g: 42, b: 42, a: 255 });
    }

    #[test]
    fn test_packed_round_trip_keeps_channel_order() {
        let colour = Colour { r: 1, g: 2, b: 3, a: 4 };

        assert_eq!(colour.to_packed().to_le_bytes(), [1, 2, 3, 4]);
        assert_eq!(Colour::from_packed(colour.to_packed()), colour);
    }

    #[test]
    fn test_black_and_white_constants() {
        assert_eq!(Colour::BLACK, Colour { r: 0, g: 0, b: 0, a: 255 });
        assert_eq!(Colour::WHITE, Colour { r: 255, g: 255, b: 255, a: 255 });
    }
}
