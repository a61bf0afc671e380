//! Pixel-art sprite designs and their shared palette
//!
//! Designs are `'static` and shared by reference; particles never copy pixels.

use rand::Rng;

use crate::error::CatalogError;

/// Palette index meaning "no pixel"
pub const TRANSPARENT: u8 = 0;

/// A CSS color string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub &'static str);

/// Index → color lookup; index 0 and unknown indices are transparent
#[derive(Debug, Clone, Copy)]
pub struct Palette(pub &'static [Option<Color>]);

impl Palette {
    #[inline]
    pub fn color(&self, index: u8) -> Option<Color> {
        if index == TRANSPARENT {
            return None;
        }
        self.0.get(index as usize).copied().flatten()
    }
}

/// A fixed grid of palette indices (row-major)
#[derive(Debug)]
pub struct SpriteDesign {
    pub name: &'static str,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    pub pixels: &'static [u8],
}

impl SpriteDesign {
    /// Width on the surface (pixels)
    #[inline]
    pub fn pixel_width(&self, cell_size: f32) -> f32 {
        self.width as f32 * cell_size
    }

    /// Height on the surface (pixels)
    #[inline]
    pub fn pixel_height(&self, cell_size: f32) -> f32 {
        self.height as f32 * cell_size
    }

    /// Non-transparent cells as (column, row, palette index)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, index)| **index != TRANSPARENT)
            .map(move |(i, &index)| (i % width, i / width, index))
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.width == 0 || self.height == 0 {
            return Err(CatalogError::ZeroSized(self.name));
        }
        let expected = self.width * self.height;
        if self.pixels.len() != expected {
            return Err(CatalogError::PixelCount {
                name: self.name,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

/// Immutable, non-empty set of designs plus their palette
#[derive(Debug, Clone, Copy)]
pub struct SpriteCatalog {
    designs: &'static [SpriteDesign],
    palette: Palette,
}

impl SpriteCatalog {
    /// Build a custom catalog; every design must be well-formed
    pub fn new(designs: &'static [SpriteDesign], palette: Palette) -> Result<Self, CatalogError> {
        if designs.is_empty() {
            return Err(CatalogError::Empty);
        }
        for design in designs {
            design.check()?;
        }
        Ok(Self { designs, palette })
    }

    /// The built-in food catalog
    pub fn food() -> Self {
        Self {
            designs: &FOOD_DESIGNS,
            palette: FOOD_PALETTE,
        }
    }

    pub fn designs(&self) -> &'static [SpriteDesign] {
        self.designs
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Uniformly random design
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static SpriteDesign {
        let designs = self.designs;
        &designs[rng.random_range(0..designs.len())]
    }
}

// ============================================================================
// BUILT-IN FOOD SPRITES
// ============================================================================

const FOOD_PALETTE: Palette = Palette(&[
    None,
    Some(Color("#2b2118")), // 1 outline / patty
    Some(Color("#f4c95d")), // 2 cheese
    Some(Color("#e63946")), // 3 red
    Some(Color("#b5651d")), // 4 bun / dough
    Some(Color("#57a773")), // 5 lettuce
    Some(Color("#f1faee")), // 6 rice / sesame
    Some(Color("#1d3557")), // 7 nori
    Some(Color("#f28482")), // 8 salmon / frosting
    Some(Color("#ffb703")), // 9 shell
]);

#[rustfmt::skip]
static FOOD_DESIGNS: [SpriteDesign; 6] = [
    SpriteDesign {
        name: "pizza",
        width: 8,
        height: 8,
        pixels: &[
            4, 4, 4, 4, 4, 4, 4, 4,
            2, 2, 3, 2, 2, 2, 3, 2,
            0, 2, 2, 2, 3, 2, 2, 0,
            0, 2, 3, 2, 2, 2, 2, 0,
            0, 0, 2, 2, 2, 3, 0, 0,
            0, 0, 2, 3, 2, 2, 0, 0,
            0, 0, 0, 2, 2, 0, 0, 0,
            0, 0, 0, 2, 0, 0, 0, 0,
        ],
    },
    SpriteDesign {
        name: "burger",
        width: 8,
        height: 7,
        pixels: &[
            0, 0, 4, 4, 4, 4, 0, 0,
            0, 4, 4, 6, 4, 4, 4, 0,
            4, 4, 4, 4, 4, 6, 4, 4,
            5, 5, 5, 5, 5, 5, 5, 5,
            3, 3, 3, 3, 3, 3, 3, 3,
            1, 1, 1, 1, 1, 1, 1, 1,
            0, 4, 4, 4, 4, 4, 4, 0,
        ],
    },
    SpriteDesign {
        name: "sushi",
        width: 6,
        height: 5,
        pixels: &[
            0, 8, 8, 8, 8, 0,
            8, 8, 6, 8, 8, 8,
            6, 6, 6, 6, 6, 6,
            7, 6, 6, 6, 6, 7,
            7, 7, 7, 7, 7, 7,
        ],
    },
    SpriteDesign {
        name: "donut",
        width: 7,
        height: 7,
        pixels: &[
            0, 0, 8, 8, 8, 0, 0,
            0, 8, 8, 6, 8, 8, 0,
            8, 8, 4, 4, 4, 8, 8,
            8, 6, 4, 0, 4, 8, 8,
            8, 8, 4, 4, 4, 6, 8,
            0, 8, 8, 8, 8, 8, 0,
            0, 0, 4, 4, 4, 0, 0,
        ],
    },
    SpriteDesign {
        name: "taco",
        width: 8,
        height: 5,
        pixels: &[
            0, 0, 5, 3, 5, 5, 0, 0,
            0, 9, 5, 5, 3, 5, 9, 0,
            9, 9, 1, 1, 1, 1, 9, 9,
            9, 9, 9, 9, 9, 9, 9, 9,
            0, 9, 9, 9, 9, 9, 9, 0,
        ],
    },
    SpriteDesign {
        name: "apple",
        width: 6,
        height: 7,
        pixels: &[
            0, 0, 0, 1, 5, 0,
            0, 0, 1, 5, 0, 0,
            0, 3, 3, 3, 3, 0,
            3, 3, 6, 3, 3, 3,
            3, 3, 3, 3, 3, 3,
            3, 3, 3, 3, 3, 3,
            0, 3, 3, 0, 3, 0,
        ],
    },
];
