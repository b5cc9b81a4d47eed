//! core::graph::color
//!
//! Deterministic branch-name to color mapping.
//!
//! Names are hashed with a polynomial string hash (multiplier 31 over
//! character code points, wrapping at 32 bits) and reduced modulo the
//! palette size. The palette is deliberately small, so distinct names may
//! share a color.

use crate::core::types::{Color, TypeError};

/// Palette used when none is configured.
pub const DEFAULT_PALETTE: [(u8, u8, u8); 6] = [
    (0x4f, 0x9d, 0xde),
    (0xe0, 0x6c, 0x75),
    (0x98, 0xc3, 0x79),
    (0xe5, 0xc0, 0x7b),
    (0xc6, 0x78, 0xdd),
    (0x56, 0xb6, 0xc2),
];

/// Color for edges whose child carries no label.
pub const DEFAULT_NEUTRAL: (u8, u8, u8) = (0x8b, 0x94, 0x9e);

/// Stable 32-bit polynomial hash of `name`.
///
/// # Example
///
/// ```
/// use lanegraph::core::graph::color::name_hash;
///
/// assert_eq!(name_hash(""), 0);
/// assert_eq!(name_hash("a"), 97);
/// assert_eq!(name_hash("main"), 3343801);
/// ```
pub fn name_hash(name: &str) -> u32 {
    name.chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as u32))
}

/// Maps ref names onto a fixed palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchColorizer {
    palette: Vec<Color>,
    neutral: Color,
}

impl BranchColorizer {
    /// Create a colorizer.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptyPalette` if `palette` is empty.
    pub fn new(palette: Vec<Color>, neutral: Color) -> Result<Self, TypeError> {
        if palette.is_empty() {
            return Err(TypeError::EmptyPalette);
        }
        Ok(Self { palette, neutral })
    }

    /// Color for `name`. Same name, same color, every time.
    ///
    /// # Example
    ///
    /// ```
    /// use lanegraph::core::graph::BranchColorizer;
    ///
    /// let colors = BranchColorizer::default();
    /// assert_eq!(colors.color_of("main"), colors.color_of("main"));
    /// ```
    pub fn color_of(&self, name: &str) -> &Color {
        let index = name_hash(name) as usize % self.palette.len();
        &self.palette[index]
    }

    /// Color for unlabeled chains.
    pub fn neutral(&self) -> &Color {
        &self.neutral
    }

    /// The palette in index order.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}

impl Default for BranchColorizer {
    fn default() -> Self {
        let palette = DEFAULT_PALETTE
            .iter()
            .map(|&(r, g, b)| Color::from_rgb(r, g, b))
            .collect();
        let (r, g, b) = DEFAULT_NEUTRAL;

        Self {
            palette,
            neutral: Color::from_rgb(r, g, b),
        }
    }
}
