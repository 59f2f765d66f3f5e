//! # Regions
//!
//! A region is one cubic partition of world space. It owns every voxel whose
//! coordinates floor-divide into it, keyed by the voxel's world index.

use std::collections::HashMap;

use crate::index::voxel_index;

/// One stored voxel. Color `0` never appears here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Voxel {
    /// World X.
    pub x: u16,
    /// World Y.
    pub y: u16,
    /// World Z.
    pub z: u16,
    /// Raw packed color.
    pub color: u32,
}

impl Voxel {
    /// Creates a voxel.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, z: u16, color: u32) -> Self {
        Self { x, y, z, color }
    }

    /// World index of this voxel's position.
    #[inline]
    #[must_use]
    pub fn index(&self) -> i64 {
        voxel_index(self.x.into(), self.y.into(), self.z.into())
    }
}

/// Sparse voxel storage for one cubic partition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    origin: [i32; 3],
    voxels: HashMap<i64, Voxel>,
}

impl Region {
    /// Creates an empty region whose minimum corner is `origin`.
    #[must_use]
    pub fn new(origin: [i32; 3]) -> Self {
        Self {
            origin,
            voxels: HashMap::new(),
        }
    }

    /// World coordinates of the region's minimum corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> [i32; 3] {
        self.origin
    }

    /// Voxel at a world coordinate, if stored here.
    #[must_use]
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        self.voxels.get(&voxel_index(x, y, z))
    }

    /// Color at a world coordinate, `0` if nothing is stored there.
    #[must_use]
    pub fn color_at(&self, x: i32, y: i32, z: i32) -> u32 {
        self.voxel(x, y, z).map_or(0, |v| v.color)
    }

    /// Number of stored voxels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// True if no voxel is stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Stored voxels in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.values()
    }

    pub(crate) fn insert(&mut self, voxel: Voxel) {
        self.voxels.insert(voxel.index(), voxel);
    }

    pub(crate) fn get_mut(&mut self, index: i64) -> Option<&mut Voxel> {
        self.voxels.get_mut(&index)
    }

    pub(crate) fn remove(&mut self, index: i64) -> Option<Voxel> {
        self.voxels.remove(&index)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.origin;
        write!(f, "{x} {y} {z}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_world_coordinate() {
        let mut region = Region::new([128, 0, 0]);
        region.insert(Voxel::new(130, 4, 9, 0xFF00_FF00));
        assert_eq!(region.color_at(130, 4, 9), 0xFF00_FF00);
        assert_eq!(region.color_at(131, 4, 9), 0);
        assert_eq!(region.voxel(130, 4, 9).map(|v| v.z), Some(9));
        assert_eq!(region.len(), 1);
        assert_eq!(region.to_string(), "128 0 0");
    }

    #[test]
    fn test_insert_overwrites_same_position() {
        let mut region = Region::default();
        region.insert(Voxel::new(1, 1, 1, 5));
        region.insert(Voxel::new(1, 1, 1, 6));
        assert_eq!(region.len(), 1);
        assert_eq!(region.color_at(1, 1, 1), 6);

        assert_eq!(region.remove(voxel_index(1, 1, 1)).map(|v| v.color), Some(6));
        assert!(region.is_empty());
    }
}
