//! # Voxel Grid
//!
//! One rectangular frame of a scene file. Addressing is dense
//! (`index = wide * tall * z + wide * y + x`) but storage is sparse: only
//! cells that were explicitly set occupy memory.
//!
//! Each dimension is the declared size plus one cell of padding, so a frame
//! declared as 2x2x2 addresses 3x3x3 cells.

use std::collections::HashMap;

/// Sparse, densely-addressed palette-index grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    wide: usize,
    tall: usize,
    deep: usize,
    colors: HashMap<usize, u8>,
}

impl VoxelGrid {
    /// Creates an empty grid for a frame of the declared size.
    #[must_use]
    pub fn new(wide: usize, tall: usize, deep: usize) -> Self {
        let mut grid = Self::default();
        grid.resize(wide, tall, deep);
        grid
    }

    /// Re-dimensions the grid to a new declared size and clears all cells.
    pub fn resize(&mut self, wide: usize, tall: usize, deep: usize) {
        self.wide = wide + 1;
        self.tall = tall + 1;
        self.deep = deep + 1;
        self.colors.clear();
    }

    /// Padded width (declared + 1).
    #[inline]
    #[must_use]
    pub const fn wide(&self) -> usize {
        self.wide
    }

    /// Padded height (declared + 1).
    #[inline]
    #[must_use]
    pub const fn tall(&self) -> usize {
        self.tall
    }

    /// Padded depth (declared + 1).
    #[inline]
    #[must_use]
    pub const fn deep(&self) -> usize {
        self.deep
    }

    /// Padded dimensions as `(wide, tall, deep)`.
    #[inline]
    #[must_use]
    pub const fn volume_size(&self) -> (usize, usize, usize) {
        (self.wide, self.tall, self.deep)
    }

    /// True once a SIZE has been applied (a default grid has no extent).
    #[inline]
    #[must_use]
    pub const fn is_sized(&self) -> bool {
        self.wide != 0
    }

    /// Number of addressable cells, `None` if it does not fit in `usize`.
    #[must_use]
    pub const fn volume(&self) -> Option<usize> {
        match self.wide.checked_mul(self.tall) {
            Some(layer) => layer.checked_mul(self.deep),
            None => None,
        }
    }

    /// Linear index of a coordinate, `None` if it overflows `usize`.
    #[inline]
    #[must_use]
    pub const fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let Some(layer) = self.wide.checked_mul(self.tall) else {
            return None;
        };
        let Some(plane) = layer.checked_mul(z) else {
            return None;
        };
        let Some(row) = self.wide.checked_mul(y) else {
            return None;
        };
        match plane.checked_add(row) {
            Some(base) => base.checked_add(x),
            None => None,
        }
    }

    /// Inverse of [`Self::index`].
    #[must_use]
    pub const fn position_of(&self, index: usize) -> (usize, usize, usize) {
        let layer = self.wide * self.tall;
        if layer == 0 {
            return (index, 0, 0);
        }
        let z = index / layer;
        let rest = index - z * layer;
        (rest % self.wide, rest / self.wide, z)
    }

    /// Returns true if `(x, y, z)` lies inside the padded extent.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.wide && y < self.tall && z < self.deep
    }

    /// Stores a palette index at a coordinate. Returns `false`, storing
    /// nothing, if the coordinate has no linear index.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u8) -> bool {
        let Some(index) = self.index(x, y, z) else {
            return false;
        };
        self.colors.insert(index, value);
        true
    }

    /// Stores a palette index at a precomputed linear index.
    pub fn set_index(&mut self, index: usize, value: u8) {
        self.colors.insert(index, value);
    }

    /// Strict lookup: `None` for cells that were never set.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        self.index(x, y, z).and_then(|index| self.get_index(index))
    }

    /// Strict lookup by linear index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<u8> {
        self.colors.get(&index).copied()
    }

    /// Safe lookup: 0 for unset or out-of-bounds cells.
    #[must_use]
    pub fn get_safe(&self, x: usize, y: usize, z: usize) -> u8 {
        if !self.in_bounds(x, y, z) {
            return 0;
        }
        self.get(x, y, z).unwrap_or(0)
    }

    /// Returns true if the cell was explicitly set (even to 0).
    #[must_use]
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        self.index(x, y, z)
            .is_some_and(|index| self.colors.contains_key(&index))
    }

    /// Number of set cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if no cell was set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates `(linear index, palette index)` for every set cell, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.colors.iter().map(|(&index, &color)| (index, color))
    }

    /// Iterates `((x, y, z), palette index)` for every non-zero cell.
    pub fn voxels(&self) -> impl Iterator<Item = ((usize, usize, usize), u8)> + '_ {
        self.iter()
            .filter(|&(_, color)| color != 0)
            .map(|(index, color)| (self.position_of(index), color))
    }

    /// Halves the resolution by majority vote over 2x2x2 blocks.
    ///
    /// Each output cell takes the most frequent non-zero color among the
    /// sampled corners, the larger color on a tie, or an explicit 0 when all
    /// corners are empty. The corner `(x+1, y+1, z+1)` is sampled twice and
    /// `(x+1, y, z+1)` is never sampled.
    #[must_use]
    pub fn to_smaller(&self) -> Self {
        let mut result = Self::new(
            (self.wide + 1) >> 1,
            (self.tall + 1) >> 1,
            (self.deep + 1) >> 1,
        );
        for z in (0..self.deep).step_by(2) {
            let z1 = z + 1;
            for y in (0..self.tall).step_by(2) {
                let y1 = y + 1;
                for x in (0..self.wide).step_by(2) {
                    let x1 = x + 1;
                    let work = [
                        self.get_safe(x, y, z),
                        self.get_safe(x1, y, z),
                        self.get_safe(x, y1, z),
                        self.get_safe(x1, y1, z),
                        self.get_safe(x, y, z1),
                        self.get_safe(x1, y1, z1),
                        self.get_safe(x, y1, z1),
                        self.get_safe(x1, y1, z1),
                    ];
                    result.set(x / 2, y / 2, z / 2, majority_color(&work));
                }
            }
        }
        result
    }
}

/// Most frequent non-zero value, ties broken by the larger value. 0 if all zero.
fn majority_color(work: &[u8; 8]) -> u8 {
    let mut best = (0usize, 0u8);
    for &color in work.iter().filter(|&&c| c != 0) {
        let count = work.iter().filter(|&&c| c == color).count();
        if (count, color) > best {
            best = (count, color);
        }
    }
    best.1
}
