//! Colors and the category color table

use crate::error::{Error, Result};
use crate::point::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
    pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0);
    pub const PURPLE: Color = Color::new(0.5, 0.0, 1.0);
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to 8-bit channels, clamping out-of-range components
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// True when every component lies in `[0, 1]`
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Qualitative palette used when no explicit colors are given.
/// The first three entries match the species colors of the Iris plot.
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::MAGENTA,
    Color::CYAN,
    Color::ORANGE,
    Color::PURPLE,
    Color::GRAY,
];

/// Total, immutable mapping from category to color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColorMap {
    colors: BTreeMap<Category, Color>,
}

impl CategoryColorMap {
    /// Build a map from explicit entries; duplicates and invalid colors are rejected
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Category, Color)>,
    {
        let mut colors = BTreeMap::new();
        for (category, color) in entries {
            if !color.is_valid() {
                return Err(Error::Configuration(format!(
                    "Color for category {} is out of range",
                    category
                )));
            }
            if colors.insert(category, color).is_some() {
                return Err(Error::Configuration(format!(
                    "Category {} assigned twice",
                    category
                )));
            }
        }
        Ok(Self { colors })
    }

    /// Assign palette colors to categories `0..count`
    pub fn from_palette(count: usize, palette: &[Color]) -> Result<Self> {
        if count > palette.len() {
            return Err(Error::Configuration(format!(
                "{} categories but the palette only has {} colors",
                count,
                palette.len()
            )));
        }
        Self::new((0..count).map(|i| (Category(i), palette[i])))
    }

    /// Assign [`DEFAULT_PALETTE`] colors to categories `0..count`
    pub fn with_default_palette(count: usize) -> Result<Self> {
        Self::from_palette(count, &DEFAULT_PALETTE)
    }

    pub fn get(&self, category: Category) -> Option<Color> {
        self.colors.get(&category).copied()
    }

    /// True when some category uses exactly this color
    pub fn uses_color(&self, color: Color) -> bool {
        self.colors.values().any(|&c| c == color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entries in ascending category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Color)> + '_ {
        self.colors.iter().map(|(&k, &v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_matches_species_colors() {
        let map = CategoryColorMap::with_default_palette(3).unwrap();
        assert_eq!(map.get(Category(0)), Some(Color::RED));
        assert_eq!(map.get(Category(1)), Some(Color::GREEN));
        assert_eq!(map.get(Category(2)), Some(Color::BLUE));
        assert_eq!(map.get(Category(3)), None);
        assert!(!map.uses_color(Color::YELLOW));
    }

    #[test]
    fn test_palette_too_small() {
        assert!(CategoryColorMap::from_palette(3, &[Color::RED]).is_err());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let result = CategoryColorMap::new(vec![
            (Category(0), Color::RED),
            (Category(0), Color::BLUE),
        ]);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_color_hex_display() {
        assert_eq!(Color::YELLOW.to_string(), "#ffff00");
        assert_eq!(Color::new(0.0, 2.0, -1.0).to_string(), "#00ff00");
    }
}
