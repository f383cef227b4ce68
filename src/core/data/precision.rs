use crate::core::data::viewport::ViewportError;

/// Bit width shared by every arbitrary-precision real in a viewport.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u32);

impl Precision {
    pub const DEFAULT: Self = Self(128);
    /// Mantissa width of an IEEE-754 double.
    pub const F64: Self = Self(53);

    pub fn new(bits: u32) -> Result<Self, ViewportError> {
        let min = rug::float::prec_min();
        let max = rug::float::prec_max();

        if bits < min || bits > max {
            return Err(ViewportError::InvalidPrecision { bits, min, max });
        }

        Ok(Self(bits))
    }

    #[must_use]
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_usual_widths() {
        assert_eq!(Precision::new(53).unwrap(), Precision::F64);
        assert_eq!(Precision::new(1024).unwrap().bits(), 1024);
    }

    #[test]
    fn test_new_rejects_zero_bits() {
        let result = Precision::new(0);

        assert!(matches!(
            result,
            Err(ViewportError::InvalidPrecision { bits: 0, .. })
        ));
    }
}
