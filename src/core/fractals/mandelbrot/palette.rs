use crate::core::actions::generate_fractal::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("palette must hold at least one colour, {requested} requested")]
    InvalidPaletteSize { requested: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    /// Ramps that get shorter at every bisection step, ending on white.
    #[default]
    GrayscaleRecursive,
    GrayscaleLinear,
}

impl PaletteKind {
    pub fn build(self, size: usize) -> Result<Palette, PaletteError> {
        match self {
            Self::GrayscaleRecursive => Palette::grayscale_recursive(size),
            Self::GrayscaleLinear => Palette::grayscale_linear(size),
        }
    }
}

/// Fixed-size colour table indexed by a normalized escape value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    pub fn from_colours(colours: Vec<Colour>) -> Result<Self, PaletteError> {
        if colours.is_empty() {
            return Err(PaletteError::InvalidPaletteSize { requested: 0 });
        }

        Ok(Self { colours })
    }

    /// Builds the grayscale palette by recursive bisection of `[0, size-1]`.
    ///
    /// The left half `l..=mid` gets a ramp from 0 towards 255 with
    /// `step = 255 / (mid - l)`, then the right half is bisected again. A
    /// single remaining index is white. The result is a series of ever shorter
    /// ramps rather than one linear gradient.
    pub fn grayscale_recursive(size: usize) -> Result<Self, PaletteError> {
        if size == 0 {
            return Err(PaletteError::InvalidPaletteSize { requested: 0 });
        }

        let mut colours = vec![Colour::WHITE; size];
        let (mut l, r) = (0, size - 1);

        while l < r {
            let mid = l + (r - l) / 2;

            if mid == l {
                // one-element ramp: only its starting value exists
                colours[l] = Colour::BLACK;
            } else {
                let step = 255.0 / (mid - l) as f64;
                for (offset, colour) in colours[l..=mid].iter_mut().enumerate() {
                    *colour = Colour::grey((offset as f64 * step) as u8);
                }
            }

            l = mid + 1;
        }

        Ok(Self { colours })
    }

    /// Evenly spaced greys `i * (256 / size)`, using integer division for the
    /// step.
    pub fn grayscale_linear(size: usize) -> Result<Self, PaletteError> {
        if size == 0 {
            return Err(PaletteError::InvalidPaletteSize { requested: 0 });
        }

        let step = (256 / size) as f64;
        let colours = (0..size)
            .map(|i| Colour::grey((i as f64 * step) as u8))
            .collect();

        Ok(Self { colours })
    }

    /// Never zero: construction rejects empty palettes.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Looks up `floor(len * value)`, clamped into range.
    #[must_use]
    pub fn colour_at(&self, value: f32) -> Colour {
        let last = self.colours.len() - 1;
        let index = (self.colours.len() as f32 * value) as usize;

        self.colours[index.min(last)]
    }
}

impl ColourMap for Palette {
    fn map(&self, value: f32) -> Colour {
        self.colour_at(value)
    }
}
