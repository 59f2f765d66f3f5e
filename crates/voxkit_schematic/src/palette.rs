//! # Color Palette
//!
//! Ordered list of the distinct colors a schematic has used, capped at
//! [`MAX_COLORS_IN_PALETTE`].
//!
//! A self-managed palette keeps itself sorted descending by raw value, so a
//! color's index moves whenever a larger color is registered. Always ask
//! [`ColorPalette::index_of`] again after an insertion.
//!
//! A fixed palette keeps the caller's order. New colors are still appended
//! while there is room.

use crate::index::MAX_COLORS_IN_PALETTE;

/// Bounded ordered color list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<u32>,
    fixed: bool,
}

impl ColorPalette {
    /// Empty palette that sorts itself descending.
    #[must_use]
    pub const fn self_managed() -> Self {
        Self {
            colors: Vec::new(),
            fixed: false,
        }
    }

    /// Palette that keeps `colors` in the given order.
    #[must_use]
    pub const fn fixed(colors: Vec<u32>) -> Self {
        Self {
            colors,
            fixed: true,
        }
    }

    /// True if the order is caller-defined.
    #[inline]
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Registers a color. Returns `true` if it was added.
    ///
    /// Known colors and colors arriving once the palette is full are ignored.
    pub fn register(&mut self, color: u32) -> bool {
        if self.colors.len() >= MAX_COLORS_IN_PALETTE || self.colors.contains(&color) {
            return false;
        }
        if self.fixed {
            self.colors.push(color);
        } else {
            let at = self.colors.partition_point(|&c| c > color);
            self.colors.insert(at, color);
        }
        true
    }

    /// Current index of `color`.
    #[must_use]
    pub fn index_of(&self, color: u32) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Color at `index`, `0` when out of range.
    #[must_use]
    pub fn color_at(&self, index: usize) -> u32 {
        self.colors.get(index).copied().unwrap_or(0)
    }

    /// Number of colors.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if no color was ever registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in palette order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_managed_sorts_descending() {
        let mut palette = ColorPalette::self_managed();
        for color in [5, 9, 1, 9, 7] {
            palette.register(color);
        }
        assert_eq!(palette.as_slice(), &[9, 7, 5, 1]);
        assert_eq!(palette.index_of(5), Some(2));

        palette.register(6);
        assert_eq!(palette.index_of(5), Some(3));
    }

    #[test]
    fn test_fixed_keeps_order() {
        let mut palette = ColorPalette::fixed(vec![1, 3, 2]);
        assert!(palette.register(10));
        assert!(!palette.register(3));
        assert_eq!(palette.as_slice(), &[1, 3, 2, 10]);
    }

    #[test]
    fn test_capacity() {
        let mut palette = ColorPalette::self_managed();
        for color in 1..=300 {
            palette.register(color);
        }
        assert_eq!(palette.len(), MAX_COLORS_IN_PALETTE);
        assert_eq!(palette.color_at(0), 256);
        assert_eq!(palette.index_of(257), None);
        assert_eq!(palette.color_at(256), 0);
    }
}
